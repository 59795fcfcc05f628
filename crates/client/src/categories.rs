//! Read-through category directory.

use tracing::warn;

use crate::api::{Category, ProductApi};
use crate::error::ClientError;

/// Categories for one editing context, fetched once and appended to as
/// the user creates new ones from the form.
#[derive(Debug, Default)]
pub struct CategoryDirectory {
    categories: Vec<Category>,
}

impl CategoryDirectory {
    /// Fetch the tenant's categories.
    pub async fn load(api: &dyn ProductApi) -> Result<Self, ClientError> {
        let categories = api.list_categories().await?;
        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Create a category and append it to the directory.
    ///
    /// Creation failure is logged and reported as `None` rather than
    /// raised, so the editing session carries on without the category.
    pub async fn add(&mut self, api: &dyn ProductApi, name: &str) -> Option<Category> {
        match api.create_category(name).await {
            Ok(category) => {
                self.categories.push(category.clone());
                Some(category)
            }
            Err(error) => {
                warn!(%error, name, "category creation failed");
                None
            }
        }
    }
}
