//! The single submit action.

use tracing::{error, info};

use shopledger_catalog::DraftSession;

use crate::api::ProductApi;
use crate::error::SubmitError;

/// Assemble the session's draft and submit it in one attempt.
///
/// No retry and no partial success: the payload is one atomic product
/// create. On any failure the session is left untouched, so the caller
/// still holds the full draft and can resubmit after fixing the input.
pub async fn submit_draft(
    session: &DraftSession,
    api: &dyn ProductApi,
) -> Result<(), SubmitError> {
    let payload = session.assemble()?;
    match api.create_product(&payload).await {
        Ok(()) => {
            info!(product_name = %payload.product_name, "product submitted");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, product_name = %payload.product_name, "product submission failed");
            Err(e.into())
        }
    }
}
