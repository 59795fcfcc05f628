//! Submission payload assembly.
//!
//! Invoked once per submit action: pulls the current values out of a
//! [`ProductDraft`], validates the required fields in one pass, coerces
//! the string-typed form state into wire types and emits the JSON shape
//! the Product API expects. GST never appears in the payload; it is
//! informational, shown during editing only.

use serde::{Deserialize, Serialize};

use shopledger_core::{DomainError, DomainResult};
use shopledger_pricing::Attribute;

use crate::draft::{CategoryId, PriceClass, ProductDraft};
use crate::unit::Unit;

/// One resolved discount entry. Only the price survives assembly; the
/// percentage is an editing-time aid and is never sent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountValue {
    pub value: f64,
}

/// One purchase batch of the product. The draft edits a single lot, so
/// the payload's `lots` array always carries exactly one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotPayload {
    pub purchased_date: String,
    pub quantity: i64,
    pub expired_date: String,
    pub wholesale_purchase_price: f64,
    pub retail_purchase_price: f64,
    pub wholesale_selling_price: f64,
    pub retail_selling_price: f64,
    pub wholesale_discount_price: Vec<DiscountValue>,
    pub retail_discount_price: Vec<DiscountValue>,
}

/// The product creation request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub product_name: String,
    pub description: String,
    pub category: CategoryId,
    pub unit: Unit,
    pub threshold_value: i64,
    pub attributes: Vec<Attribute>,
    pub lots: Vec<LotPayload>,
}

/// Collects required-field problems across one validation pass so the
/// caller sees every gap at once instead of fixing them one at a time.
#[derive(Debug, Default)]
struct FieldCheck {
    missing: Vec<&'static str>,
}

impl FieldCheck {
    fn require(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.missing.push(field);
        }
    }

    // Counts (threshold, quantity) are non-negative on the backend.
    fn integer(&mut self, field: &'static str, value: &str) -> i64 {
        match value.trim().parse::<i64>() {
            Ok(n) if n >= 0 => n,
            _ => {
                self.missing.push(field);
                0
            }
        }
    }

    fn float(&mut self, field: &'static str, value: &str) -> f64 {
        match value.trim().parse() {
            Ok(n) => n,
            Err(_) => {
                self.missing.push(field);
                0.0
            }
        }
    }

    fn finish(self) -> DomainResult<()> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(format!(
                "missing or invalid fields: {}",
                self.missing.join(", ")
            )))
        }
    }
}

/// Assemble the draft into a submission payload.
///
/// Every required field is checked in the same pass and all failures are
/// reported together in a single `Validation` error. Description is
/// optional; attributes pass through exactly as edited, blank rows
/// included.
pub fn assemble(draft: &ProductDraft) -> DomainResult<SubmissionPayload> {
    let mut check = FieldCheck::default();

    check.require("product_name", draft.name());
    let category = match draft.category() {
        Some(category) => category,
        None => {
            check.missing.push("category");
            CategoryId(0)
        }
    };
    let unit = match draft.unit() {
        Some(unit) => unit,
        None => {
            check.missing.push("unit");
            Unit::Pc
        }
    };
    let threshold_value = check.integer("threshold_value", draft.threshold_value());
    let quantity = check.integer("quantity", draft.quantity());
    check.require("purchased_date", draft.purchased_date());
    check.require("expired_date", draft.expired_date());

    let wholesale = draft.block(PriceClass::Wholesale);
    let retail = draft.block(PriceClass::Retail);
    let wholesale_purchase_price =
        check.float("wholesale_purchase_price", &wholesale.purchase_price);
    let wholesale_selling_price = check.float("wholesale_selling_price", &wholesale.selling_price);
    let retail_purchase_price = check.float("retail_purchase_price", &retail.purchase_price);
    let retail_selling_price = check.float("retail_selling_price", &retail.selling_price);

    check.finish()?;

    let lot = LotPayload {
        purchased_date: draft.purchased_date().to_string(),
        quantity,
        expired_date: draft.expired_date().to_string(),
        wholesale_purchase_price,
        retail_purchase_price,
        wholesale_selling_price,
        retail_selling_price,
        wholesale_discount_price: discount_values(wholesale.discounts.resolved_prices()),
        retail_discount_price: discount_values(retail.discounts.resolved_prices()),
    };

    Ok(SubmissionPayload {
        product_name: draft.name().to_string(),
        description: draft.description().to_string(),
        category,
        unit,
        threshold_value,
        attributes: draft.attributes().entries().to_vec(),
        lots: vec![lot],
    })
}

fn discount_values(prices: Vec<f64>) -> Vec<DiscountValue> {
    prices.into_iter().map(|value| DiscountValue { value }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{
        DraftCommand, DraftId, DraftOp, PriceField, ProductDraft, ScalarField,
    };
    use chrono::Utc;
    use serde_json::json;
    use shopledger_core::{Aggregate, AggregateId, TenantId};
    use shopledger_pricing::{AttributeField, DiscountField, TaxMode};

    struct Form {
        tenant_id: TenantId,
        draft_id: DraftId,
        draft: ProductDraft,
    }

    impl Form {
        fn open() -> Self {
            let tenant_id = TenantId::new();
            let draft_id = DraftId::new(AggregateId::new());
            let mut draft = ProductDraft::empty(draft_id);
            let events = draft
                .handle(&DraftCommand {
                    tenant_id,
                    draft_id,
                    occurred_at: Utc::now(),
                    op: DraftOp::Open,
                })
                .unwrap();
            draft.apply(&events[0]);
            Self {
                tenant_id,
                draft_id,
                draft,
            }
        }

        fn apply(&mut self, op: DraftOp) {
            let events = self
                .draft
                .handle(&DraftCommand {
                    tenant_id: self.tenant_id,
                    draft_id: self.draft_id,
                    occurred_at: Utc::now(),
                    op,
                })
                .unwrap();
            for event in &events {
                self.draft.apply(event);
            }
        }

        fn set(&mut self, field: ScalarField, value: &str) {
            self.apply(DraftOp::SetScalar {
                field,
                value: value.into(),
            });
        }

        fn price(&mut self, class: PriceClass, field: PriceField, value: &str) {
            self.apply(DraftOp::SetPrice {
                class,
                field,
                value: value.into(),
            });
        }

        /// A draft with every required field filled in.
        fn filled() -> Self {
            let mut form = Self::open();
            form.set(ScalarField::Name, "Copy paper");
            form.set(ScalarField::ThresholdValue, "10");
            form.set(ScalarField::Quantity, "40");
            form.set(ScalarField::PurchasedDate, "2026-08-01");
            form.set(ScalarField::ExpiredDate, "2027-08-01");
            form.apply(DraftOp::SelectCategory {
                category: CategoryId(7),
            });
            form.apply(DraftOp::SelectUnit { unit: Unit::Ream });
            form.price(PriceClass::Wholesale, PriceField::Purchase, "150.00");
            form.price(PriceClass::Wholesale, PriceField::Selling, "200.00");
            form.price(PriceClass::Retail, PriceField::Purchase, "160.00");
            form.price(PriceClass::Retail, PriceField::Selling, "220.00");
            form
        }
    }

    #[test]
    fn assembles_a_complete_draft_into_one_lot() {
        let mut form = Form::filled();
        form.set(ScalarField::Description, "A4, 80gsm");
        form.apply(DraftOp::SetTaxMode {
            mode: TaxMode::Excluded,
        });
        form.apply(DraftOp::EditDiscount {
            class: PriceClass::Wholesale,
            index: 0,
            field: DiscountField::Percentage,
            value: "5".into(),
        });

        let payload = assemble(&form.draft).unwrap();
        assert_eq!(payload.product_name, "Copy paper");
        assert_eq!(payload.category, CategoryId(7));
        assert_eq!(payload.threshold_value, 10);
        assert_eq!(payload.lots.len(), 1);

        let lot = &payload.lots[0];
        assert_eq!(lot.quantity, 40);
        assert_eq!(lot.wholesale_selling_price, 200.0);
        assert_eq!(lot.retail_selling_price, 220.0);
        assert_eq!(
            lot.wholesale_discount_price,
            vec![DiscountValue { value: 190.0 }]
        );
        assert!(lot.retail_discount_price.is_empty());

        // GST stays an editing-time display value, outside the payload.
        let gst = form.draft.block(PriceClass::Wholesale).gst.unwrap();
        assert!((gst - 24.0).abs() < 1e-9);
    }

    #[test]
    fn wire_shape_matches_the_product_api() {
        let form = Form::filled();
        let payload = assemble(&form.draft).unwrap();
        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            body,
            json!({
                "product_name": "Copy paper",
                "description": "",
                "category": 7,
                "unit": "Ream",
                "threshold_value": 10,
                "attributes": [{ "name": "", "value": "" }],
                "lots": [{
                    "purchased_date": "2026-08-01",
                    "quantity": 40,
                    "expired_date": "2027-08-01",
                    "wholesale_purchase_price": 150.0,
                    "retail_purchase_price": 160.0,
                    "wholesale_selling_price": 200.0,
                    "retail_selling_price": 220.0,
                    "wholesale_discount_price": [],
                    "retail_discount_price": [],
                }],
            })
        );
    }

    #[test]
    fn blank_attribute_rows_pass_through_unfiltered() {
        let mut form = Form::filled();
        form.apply(DraftOp::EditAttribute {
            index: 0,
            field: AttributeField::Name,
            value: "Color".into(),
        });
        form.apply(DraftOp::EditAttribute {
            index: 0,
            field: AttributeField::Value,
            value: "White".into(),
        });
        form.apply(DraftOp::AddAttribute);

        let payload = assemble(&form.draft).unwrap();
        assert_eq!(payload.attributes.len(), 2);
        assert_eq!(payload.attributes[0].name, "Color");
        // The trailing blank row is sent as-is, not stripped.
        assert!(payload.attributes[1].name.is_empty());
        assert!(payload.attributes[1].value.is_empty());
    }

    #[test]
    fn missing_fields_are_reported_together() {
        let form = Form::open();
        let err = assemble(&form.draft).unwrap_err();
        let DomainError::Validation(message) = err else {
            panic!("expected validation error, got {err:?}");
        };
        for field in [
            "product_name",
            "category",
            "unit",
            "threshold_value",
            "quantity",
            "purchased_date",
            "expired_date",
            "wholesale_purchase_price",
            "wholesale_selling_price",
            "retail_purchase_price",
            "retail_selling_price",
        ] {
            assert!(message.contains(field), "missing {field} in {message}");
        }
    }

    #[test]
    fn description_is_optional() {
        let form = Form::filled();
        let payload = assemble(&form.draft).unwrap();
        assert!(payload.description.is_empty());
    }

    #[test]
    fn non_numeric_counts_fail_validation() {
        let mut form = Form::filled();
        form.set(ScalarField::Quantity, "forty");
        let err = assemble(&form.draft).unwrap_err();
        assert!(matches!(err, DomainError::Validation(m) if m.contains("quantity")));
    }

    #[test]
    fn negative_counts_fail_validation() {
        let mut form = Form::filled();
        form.set(ScalarField::ThresholdValue, "-10");
        form.set(ScalarField::Quantity, "-40");
        let err = assemble(&form.draft).unwrap_err();
        let DomainError::Validation(message) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert!(message.contains("threshold_value"));
        assert!(message.contains("quantity"));
    }

    #[test]
    fn uncommitted_keystroke_prices_still_coerce() {
        let mut form = Form::filled();
        // Typed but never blurred: parseable, so it goes through as-is.
        form.price(PriceClass::Retail, PriceField::Selling, "220.5");
        let payload = assemble(&form.draft).unwrap();
        assert_eq!(payload.lots[0].retail_selling_price, 220.5);
    }
}
