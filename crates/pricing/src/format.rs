//! Canonical price formatting.

/// Normalize a raw numeric string into a canonical two-decimal price.
///
/// Empty input stays empty (no value entered is not an error). Input that
/// is not `digits [ '.' [digits] ]` (a letter, a sign, a second decimal
/// point) is silently discarded and comes back empty; the form keeps
/// whatever the user typed until blur, so rejection never interrupts
/// typing. Accepted values render with exactly two decimals: `"5"` becomes
/// `"5.00"`, `"5.1"` becomes `"5.10"`.
///
/// Pure and idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() || !is_price_shaped(raw) {
        return String::new();
    }
    match raw.parse::<f64>() {
        // Parsing saturates to infinity on overflow, which would render
        // as "inf" rather than a canonical price.
        Ok(value) if value.is_finite() => format!("{value:.2}"),
        _ => String::new(),
    }
}

/// `digits [ '.' [digits] ]`: at least one leading digit, at most one
/// decimal point, nothing else.
fn is_price_shaped(raw: &str) -> bool {
    let mut seen_point = false;
    let mut leading_digits = 0usize;
    for c in raw.chars() {
        match c {
            '0'..='9' => {
                if !seen_point {
                    leading_digits += 1;
                }
            }
            '.' if !seen_point && leading_digits > 0 => seen_point = true,
            _ => return false,
        }
    }
    leading_digits > 0
}
