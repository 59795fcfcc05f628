//! `shopledger-client` — the transport side of product entry.
//!
//! The catalog crate never performs IO; this crate carries its assembled
//! payloads to the Product API: a tenant-scoped HTTP client, a
//! read-through category directory and the single-attempt submit action.

pub mod api;
pub mod categories;
pub mod error;
pub mod http;
pub mod submit;
pub mod telemetry;

pub use api::{Category, ProductApi};
pub use categories::CategoryDirectory;
pub use error::{ClientError, SubmitError};
pub use http::{HttpProductApi, TenantContext};
pub use submit::submit_draft;
