//! The Product API surface, as this client sees it.

use serde::{Deserialize, Serialize};

use shopledger_catalog::{CategoryId, SubmissionPayload};

use crate::error::ClientError;

/// A category as the backend serializes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// External Product API collaborator.
///
/// Implemented by [`HttpProductApi`](crate::HttpProductApi) for real use
/// and by in-memory doubles in tests.
#[async_trait::async_trait]
pub trait ProductApi: Send + Sync {
    /// List the tenant's existing categories.
    async fn list_categories(&self) -> Result<Vec<Category>, ClientError>;

    /// Create a category and return it with its backend-assigned id.
    async fn create_category(&self, name: &str) -> Result<Category, ClientError>;

    /// Create a product from an assembled payload. Atomic: the product
    /// and its lots land together or not at all.
    async fn create_product(&self, payload: &SubmissionPayload) -> Result<(), ClientError>;
}
