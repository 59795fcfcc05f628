//! `shopledger-catalog` — the product draft: an in-progress product entry
//! modelled as an aggregate.
//!
//! Every form edit is a command; accepted edits become events that evolve
//! the draft deterministically. The draft is session-local; nothing leaves
//! the process until the assembler turns it into a submission payload for
//! the Product API collaborator.

pub mod assembler;
pub mod draft;
pub mod session;
pub mod unit;

pub use assembler::{assemble, DiscountValue, LotPayload, SubmissionPayload};
pub use draft::{
    CategoryId, Currency, DraftChange, DraftCommand, DraftEvent, DraftId, DraftOp, DraftStatus,
    PriceBlock, PriceClass, PriceField, ProductDraft, ScalarField,
};
pub use session::DraftSession;
pub use unit::Unit;
