//! Transport-boundary errors.

use shopledger_core::DomainError;

/// Failure talking to the Product API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Http(String),
    #[error("API error ({status}): {detail}")]
    Api { status: u16, detail: String },
    #[error("decode error: {0}")]
    Decode(String),
}

/// Failure of one submit action: either the draft failed validation at
/// assembly or the transport call failed. Either way the draft is kept
/// so the user can fix and retry.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] DomainError),
    #[error(transparent)]
    Transport(#[from] ClientError),
}
