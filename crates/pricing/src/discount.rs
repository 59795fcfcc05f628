//! Discount schedules: a bounded, ordered list of discount tiers per price
//! class, with price ↔ percentage reconciliation.

use serde::{Deserialize, Serialize};
use shopledger_core::{DomainError, DomainResult, ValueObject};

use crate::format;

/// A discount schedule never grows beyond three tiers.
pub const MAX_TIERS: usize = 3;

/// One discount offer, expressible as an absolute price or as a percentage
/// off the reference selling price.
///
/// Invariant: `valid` is true exactly when at least one of the two fields
/// is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountTier {
    pub price: String,
    pub percentage: String,
    pub valid: bool,
}

impl DiscountTier {
    fn with_valid(mut self) -> Self {
        self.valid = !self.price.is_empty() || !self.percentage.is_empty();
        self
    }
}

impl ValueObject for DiscountTier {}

/// Which tier field an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountField {
    Price,
    Percentage,
}

/// Ordered list of discount tiers for one price class.
///
/// Starts with exactly one empty tier and stays within 1..=3 entries. All
/// operations return a new schedule (index-replace, never in-place
/// mutation), so recorded edits are plain values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountSchedule {
    tiers: Vec<DiscountTier>,
}

impl Default for DiscountSchedule {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscountSchedule {
    /// A fresh schedule: one empty (invalid) tier.
    pub fn new() -> Self {
        Self {
            tiers: vec![DiscountTier::default()],
        }
    }

    /// Rehydrate a schedule from tiers produced by an earlier schedule
    /// operation (e.g. replayed from recorded draft events).
    pub fn from_tiers(tiers: Vec<DiscountTier>) -> Self {
        Self { tiers }
    }

    pub fn tiers(&self) -> &[DiscountTier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    fn last_is_valid(&self) -> bool {
        self.tiers.last().is_some_and(|t| t.valid)
    }

    fn tier(&self, index: usize) -> DomainResult<&DiscountTier> {
        self.tiers
            .get(index)
            .ok_or_else(|| DomainError::validation(format!("no discount tier at index {index}")))
    }

    /// Edit one field of one tier.
    ///
    /// A non-empty percentage is authoritative: when it and the reference
    /// selling price both parse, the tier price is re-derived as
    /// `reference - reference * pct / 100`, rendered to two decimals; when
    /// either side is not numeric yet the price is left untouched. A manual
    /// price edit stores the value as typed and clears the percentage, so a
    /// hand-set price never displays next to a stale percentage.
    pub fn edit(
        &self,
        index: usize,
        field: DiscountField,
        value: &str,
        reference_selling_price: &str,
    ) -> DomainResult<Self> {
        let mut tier = self.tier(index)?.clone();
        match field {
            DiscountField::Percentage => {
                tier.percentage = value.to_string();
                if !value.is_empty() {
                    if let (Ok(reference), Ok(pct)) = (
                        reference_selling_price.parse::<f64>(),
                        value.parse::<f64>(),
                    ) {
                        let derived = reference - reference * pct / 100.0;
                        tier.price = format!("{derived:.2}");
                    }
                }
            }
            DiscountField::Price => {
                tier.price = value.to_string();
                tier.percentage.clear();
            }
        }
        Ok(self.replaced(index, tier.with_valid()))
    }

    /// Re-apply canonical formatting to a tier's price (blur handling).
    pub fn commit_price(&self, index: usize) -> DomainResult<Self> {
        let mut tier = self.tier(index)?.clone();
        tier.price = format::normalize(&tier.price);
        Ok(self.replaced(index, tier.with_valid()))
    }

    /// Append a new empty tier.
    ///
    /// Permitted only while the schedule holds fewer than three tiers and
    /// the current last tier is valid.
    pub fn add(&self) -> DomainResult<Self> {
        if self.tiers.len() >= MAX_TIERS {
            return Err(DomainError::invariant(format!(
                "a discount schedule holds at most {MAX_TIERS} tiers"
            )));
        }
        if !self.last_is_valid() {
            return Err(DomainError::invariant(
                "fill in the last discount tier before adding another",
            ));
        }
        let mut tiers = self.tiers.clone();
        tiers.push(DiscountTier::default());
        Ok(Self { tiers })
    }

    /// Remove the tier at `index`; one tier always remains, even if empty.
    pub fn remove(&self, index: usize) -> DomainResult<Self> {
        self.tier(index)?;
        if self.tiers.len() <= 1 {
            return Err(DomainError::invariant(
                "a discount schedule keeps at least one tier",
            ));
        }
        let mut tiers = self.tiers.clone();
        tiers.remove(index);
        Ok(Self { tiers })
    }

    /// Resolved prices of the tiers that carry one, in order. This is what
    /// leaves the editing layer at submission time; percentages never do.
    pub fn resolved_prices(&self) -> Vec<f64> {
        self.tiers
            .iter()
            .filter(|t| !t.price.is_empty())
            .filter_map(|t| t.price.parse().ok())
            .collect()
    }

    fn replaced(&self, index: usize, tier: DiscountTier) -> Self {
        let mut tiers = self.tiers.clone();
        tiers[index] = tier;
        Self { tiers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_schedule_has_one_empty_invalid_tier() {
        let schedule = DiscountSchedule::new();
        assert_eq!(schedule.len(), 1);
        let tier = &schedule.tiers()[0];
        assert!(tier.price.is_empty());
        assert!(tier.percentage.is_empty());
        assert!(!tier.valid);
    }

    #[test]
    fn percentage_derives_price_from_reference() {
        let schedule = DiscountSchedule::new()
            .edit(0, DiscountField::Percentage, "10", "100.00")
            .unwrap();
        let tier = &schedule.tiers()[0];
        assert_eq!(tier.price, "90.00");
        assert_eq!(tier.percentage, "10");
        assert!(tier.valid);
    }

    #[test]
    fn percentage_overwrites_a_manual_price() {
        let schedule = DiscountSchedule::new()
            .edit(0, DiscountField::Price, "80.00", "100.00")
            .unwrap()
            .edit(0, DiscountField::Percentage, "5", "100.00")
            .unwrap();
        assert_eq!(schedule.tiers()[0].price, "95.00");
    }

    #[test]
    fn manual_price_edit_clears_the_stale_percentage() {
        let schedule = DiscountSchedule::new()
            .edit(0, DiscountField::Percentage, "10", "100.00")
            .unwrap()
            .edit(0, DiscountField::Price, "85", "100.00")
            .unwrap();
        let tier = &schedule.tiers()[0];
        assert_eq!(tier.price, "85");
        assert!(tier.percentage.is_empty());
        assert!(tier.valid);
    }

    #[test]
    fn percentage_without_numeric_reference_leaves_price_untouched() {
        let schedule = DiscountSchedule::new()
            .edit(0, DiscountField::Percentage, "10", "")
            .unwrap();
        let tier = &schedule.tiers()[0];
        assert!(tier.price.is_empty());
        assert_eq!(tier.percentage, "10");
        assert!(tier.valid);
    }

    #[test]
    fn clearing_both_fields_invalidates_the_tier() {
        let schedule = DiscountSchedule::new()
            .edit(0, DiscountField::Price, "40", "100.00")
            .unwrap()
            .edit(0, DiscountField::Price, "", "100.00")
            .unwrap();
        assert!(!schedule.tiers()[0].valid);
    }

    #[test]
    fn commit_price_normalizes_on_blur() {
        let schedule = DiscountSchedule::new()
            .edit(0, DiscountField::Price, "85", "100.00")
            .unwrap()
            .commit_price(0)
            .unwrap();
        assert_eq!(schedule.tiers()[0].price, "85.00");
    }

    #[test]
    fn add_requires_a_valid_last_tier() {
        let schedule = DiscountSchedule::new();
        let err = schedule.add().unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn add_caps_the_schedule_at_three_tiers() {
        let mut schedule = DiscountSchedule::new();
        for i in 0..10 {
            schedule = match schedule
                .edit(schedule.len() - 1, DiscountField::Price, &format!("{i}"), "")
                .unwrap()
                .add()
            {
                Ok(next) => next,
                Err(_) => break,
            };
        }
        assert_eq!(schedule.len(), MAX_TIERS);
    }

    #[test]
    fn remove_keeps_the_floor_of_one_tier() {
        let schedule = DiscountSchedule::new();
        let err = schedule.remove(0).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn remove_drops_the_indexed_tier() {
        let schedule = DiscountSchedule::new()
            .edit(0, DiscountField::Price, "10", "")
            .unwrap()
            .add()
            .unwrap()
            .edit(1, DiscountField::Price, "20", "")
            .unwrap()
            .remove(0)
            .unwrap();
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.tiers()[0].price, "20");
    }

    #[test]
    fn out_of_range_edits_are_rejected() {
        let err = DiscountSchedule::new()
            .edit(3, DiscountField::Price, "10", "")
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn resolved_prices_skip_tiers_without_a_price() {
        let schedule = DiscountSchedule::new()
            .edit(0, DiscountField::Price, "90.00", "")
            .unwrap()
            .add()
            .unwrap()
            .edit(1, DiscountField::Percentage, "10", "")
            .unwrap();
        // Second tier has a percentage but no derivable price.
        assert_eq!(schedule.resolved_prices(), vec![90.0]);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Edit(usize, bool, String),
            Commit(usize),
            Add,
            Remove(usize),
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                (0usize..4, any::<bool>(), "[0-9a.]{0,6}")
                    .prop_map(|(i, p, v)| Op::Edit(i, p, v)),
                (0usize..4).prop_map(Op::Commit),
                Just(Op::Add),
                (0usize..4).prop_map(Op::Remove),
            ]
        }

        proptest! {
            /// Property: no operation sequence ever breaks the 1..=3 size
            /// bound or the tier validity invariant.
            #[test]
            fn schedule_invariants_hold_under_any_sequence(
                ops in proptest::collection::vec(op_strategy(), 0..40)
            ) {
                let mut schedule = DiscountSchedule::new();
                for op in ops {
                    let next = match op {
                        Op::Edit(i, true, v) =>
                            schedule.edit(i, DiscountField::Price, &v, "100.00"),
                        Op::Edit(i, false, v) =>
                            schedule.edit(i, DiscountField::Percentage, &v, "100.00"),
                        Op::Commit(i) => schedule.commit_price(i),
                        Op::Add => schedule.add(),
                        Op::Remove(i) => schedule.remove(i),
                    };
                    if let Ok(next) = next {
                        schedule = next;
                    }
                    prop_assert!((1..=MAX_TIERS).contains(&schedule.len()));
                    for tier in schedule.tiers() {
                        prop_assert_eq!(
                            tier.valid,
                            !tier.price.is_empty() || !tier.percentage.is_empty()
                        );
                    }
                }
            }
        }
    }
}
