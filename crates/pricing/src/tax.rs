//! GST derivation from a selling price and the active tax mode.

use serde::{Deserialize, Serialize};

/// GST rate applied throughout the store, in percent.
pub const GST_RATE_PERCENT: f64 = 12.0;

/// Tax mode for the whole draft, shared by the wholesale and retail tiers.
///
/// The source form presented this as a pair of checkboxes that cleared each
/// other; a single enum makes the mutual exclusion structural.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxMode {
    /// No mode chosen yet; no GST is computed.
    #[default]
    Unset,
    /// The selling price already contains the 12% tax component.
    Included,
    /// Tax must be added on top of the selling price.
    Excluded,
}

/// Derive the GST amount for one price class.
///
/// Returns `None` when no computation was performed: mode unset, or the
/// selling price empty or not yet numeric. That is distinct from a computed
/// zero. The returned value keeps full precision; rounding happens only at
/// presentation time via [`display_gst`].
pub fn gst_for(mode: TaxMode, selling_price: &str) -> Option<f64> {
    if mode == TaxMode::Unset || selling_price.is_empty() {
        return None;
    }
    let price: f64 = selling_price.parse().ok()?;
    match mode {
        TaxMode::Unset => None,
        // Price contains the tax; recover the tax portion.
        TaxMode::Included => Some(price * GST_RATE_PERCENT / (100.0 + GST_RATE_PERCENT)),
        // Price excludes the tax; this is the tax to add.
        TaxMode::Excluded => Some(price * GST_RATE_PERCENT / 100.0),
    }
}

/// Two-decimal rendering of a stored full-precision GST value.
pub fn display_gst(gst: f64) -> String {
    format!("{gst:.2}")
}
