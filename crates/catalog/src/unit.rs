//! The fixed unit vocabulary products are measured in.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use shopledger_core::DomainError;

/// Unit of measure. The set is closed; the backend stores the label
/// verbatim, so serialized names match the vocabulary exactly (including
/// the capitalized `Ream`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Mm,
    Cm,
    M,
    In,
    Ft,
    Yd,
    Pc,
    Dozen,
    Pack,
    Ctn,
    Pallet,
    #[serde(rename = "Ream")]
    Ream,
    Oz,
    G,
    Kg,
    Lb,
    Ton,
    L,
    C,
    Pt,
    Qt,
    Gal,
    Bbl,
}

impl Unit {
    /// Every unit, in display order.
    pub const ALL: [Unit; 23] = [
        Unit::Mm,
        Unit::Cm,
        Unit::M,
        Unit::In,
        Unit::Ft,
        Unit::Yd,
        Unit::Pc,
        Unit::Dozen,
        Unit::Pack,
        Unit::Ctn,
        Unit::Pallet,
        Unit::Ream,
        Unit::Oz,
        Unit::G,
        Unit::Kg,
        Unit::Lb,
        Unit::Ton,
        Unit::L,
        Unit::C,
        Unit::Pt,
        Unit::Qt,
        Unit::Gal,
        Unit::Bbl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Mm => "mm",
            Unit::Cm => "cm",
            Unit::M => "m",
            Unit::In => "in",
            Unit::Ft => "ft",
            Unit::Yd => "yd",
            Unit::Pc => "pc",
            Unit::Dozen => "dozen",
            Unit::Pack => "pack",
            Unit::Ctn => "ctn",
            Unit::Pallet => "pallet",
            Unit::Ream => "Ream",
            Unit::Oz => "oz",
            Unit::G => "g",
            Unit::Kg => "kg",
            Unit::Lb => "lb",
            Unit::Ton => "ton",
            Unit::L => "l",
            Unit::C => "c",
            Unit::Pt => "pt",
            Unit::Qt => "qt",
            Unit::Gal => "gal",
            Unit::Bbl => "bbl",
        }
    }
}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::ALL
            .into_iter()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown unit: {s}")))
    }
}
