//! `shopledger-pricing` — the pure computation components behind the
//! product entry form: price normalization, GST derivation, discount
//! schedules and the free-form attribute list.
//!
//! Everything here is synchronous, deterministic and IO-free; the catalog
//! crate drives these components from draft edit commands.

pub mod attribute;
pub mod discount;
pub mod format;
pub mod tax;

pub use attribute::{Attribute, AttributeField, AttributeList, MAX_ATTRIBUTES};
pub use discount::{DiscountField, DiscountSchedule, DiscountTier, MAX_TIERS};
pub use tax::{GST_RATE_PERCENT, TaxMode};
