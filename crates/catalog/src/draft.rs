use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopledger_core::{Aggregate, AggregateId, AggregateRoot, DomainError, Event, TenantId};
use shopledger_pricing::{
    format, tax, Attribute, AttributeField, AttributeList, DiscountField, DiscountSchedule,
    DiscountTier, TaxMode,
};

use crate::unit::Unit;

/// Draft identifier (tenant-scoped via `tenant_id` fields in events/commands).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftId(pub AggregateId);

impl DraftId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for DraftId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Reference to an existing category (integer-keyed on the backend).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

impl core::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Currency label. A display tag only, never converted; one setting for
/// the whole draft.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[default]
    #[serde(rename = "LRD")]
    Lrd,
}

/// The two parallel pricing tracks every product carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceClass {
    Wholesale,
    Retail,
}

/// Which price field of a class an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceField {
    Purchase,
    Selling,
}

/// Plain text fields edited as typed, coerced (if at all) at assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarField {
    Name,
    Description,
    Sku,
    ThresholdValue,
    PurchasedDate,
    ExpiredDate,
    Quantity,
}

/// Pricing state for one price class.
///
/// `gst` is derived, never edited: `None` means no computation was
/// performed, which is distinct from a computed zero. The stored value
/// keeps full precision; rendering rounds to two decimals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceBlock {
    pub purchase_price: String,
    pub selling_price: String,
    pub discounts: DiscountSchedule,
    pub gst: Option<f64>,
}

impl PriceBlock {
    fn price(&self, field: PriceField) -> &str {
        match field {
            PriceField::Purchase => &self.purchase_price,
            PriceField::Selling => &self.selling_price,
        }
    }

    fn set_price(&mut self, field: PriceField, value: String) {
        match field {
            PriceField::Purchase => self.purchase_price = value,
            PriceField::Selling => self.selling_price = value,
        }
    }
}

/// Draft lifecycle. Discarding is terminal; a discarded draft rejects
/// every further command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftStatus {
    Editing,
    Discarded,
}

/// Aggregate root: the in-progress product entry.
///
/// All numeric-ish fields hold the raw string as typed; canonical
/// formatting happens on blur commits and coercion at assembly. The draft
/// carries the scalars of one purchase lot alongside the wholesale/retail
/// pricing blocks; the assembler emits them as the payload's single lot.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    id: DraftId,
    tenant_id: Option<TenantId>,
    name: String,
    description: String,
    sku: String,
    threshold_value: String,
    purchased_date: String,
    expired_date: String,
    quantity: String,
    category: Option<CategoryId>,
    unit: Option<Unit>,
    currency: Currency,
    tax_mode: TaxMode,
    wholesale: PriceBlock,
    retail: PriceBlock,
    attributes: AttributeList,
    status: DraftStatus,
    version: u64,
    opened: bool,
}

impl ProductDraft {
    /// Create an empty, not-yet-opened instance for rehydration.
    pub fn empty(id: DraftId) -> Self {
        Self {
            id,
            tenant_id: None,
            name: String::new(),
            description: String::new(),
            sku: String::new(),
            threshold_value: String::new(),
            purchased_date: String::new(),
            expired_date: String::new(),
            quantity: String::new(),
            category: None,
            unit: None,
            currency: Currency::default(),
            tax_mode: TaxMode::Unset,
            wholesale: PriceBlock::default(),
            retail: PriceBlock::default(),
            attributes: AttributeList::new(),
            status: DraftStatus::Editing,
            version: 0,
            opened: false,
        }
    }

    pub fn id_typed(&self) -> DraftId {
        self.id
    }

    pub fn tenant_id(&self) -> Option<TenantId> {
        self.tenant_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn threshold_value(&self) -> &str {
        &self.threshold_value
    }

    pub fn purchased_date(&self) -> &str {
        &self.purchased_date
    }

    pub fn expired_date(&self) -> &str {
        &self.expired_date
    }

    pub fn quantity(&self) -> &str {
        &self.quantity
    }

    pub fn category(&self) -> Option<CategoryId> {
        self.category
    }

    pub fn unit(&self) -> Option<Unit> {
        self.unit
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn tax_mode(&self) -> TaxMode {
        self.tax_mode
    }

    pub fn block(&self, class: PriceClass) -> &PriceBlock {
        match class {
            PriceClass::Wholesale => &self.wholesale,
            PriceClass::Retail => &self.retail,
        }
    }

    pub fn attributes(&self) -> &AttributeList {
        &self.attributes
    }

    pub fn status(&self) -> DraftStatus {
        self.status
    }

    pub fn is_discarded(&self) -> bool {
        self.status == DraftStatus::Discarded
    }

    fn block_mut(&mut self, class: PriceClass) -> &mut PriceBlock {
        match class {
            PriceClass::Wholesale => &mut self.wholesale,
            PriceClass::Retail => &mut self.retail,
        }
    }

    /// GST is a pure function of the post-edit state, so re-deriving it
    /// here keeps `apply` deterministic without carrying it in events.
    fn refresh_gst(&mut self, class: PriceClass) {
        let mode = self.tax_mode;
        let block = self.block_mut(class);
        block.gst = tax::gst_for(mode, &block.selling_price);
    }
}

impl AggregateRoot for ProductDraft {
    type Id = DraftId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Edit operation against a draft; one user interaction each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DraftOp {
    /// Open a fresh, empty draft for an editing session.
    Open,
    /// Assign a plain text field as typed.
    SetScalar { field: ScalarField, value: String },
    SelectCategory { category: CategoryId },
    SelectUnit { unit: Unit },
    SelectCurrency { currency: Currency },
    /// Choose the draft-wide tax mode; GST recomputes for both classes.
    SetTaxMode { mode: TaxMode },
    /// Keystroke edit of a price field, stored as typed, never reformatted.
    SetPrice {
        class: PriceClass,
        field: PriceField,
        value: String,
    },
    /// Blur of a price field; the stored value is canonicalized.
    CommitPrice { class: PriceClass, field: PriceField },
    EditDiscount {
        class: PriceClass,
        index: usize,
        field: DiscountField,
        value: String,
    },
    /// Blur of a discount price cell.
    CommitDiscountPrice { class: PriceClass, index: usize },
    AddDiscountTier { class: PriceClass },
    RemoveDiscountTier { class: PriceClass, index: usize },
    EditAttribute {
        index: usize,
        field: AttributeField,
        value: String,
    },
    AddAttribute,
    RemoveAttribute { index: usize },
    /// Discard the draft; terminal.
    Discard,
}

/// Command envelope: every edit targets one draft within one tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftCommand {
    pub tenant_id: TenantId,
    pub draft_id: DraftId,
    pub occurred_at: DateTime<Utc>,
    pub op: DraftOp,
}

/// Accepted change, recorded as a fact. List-shaped changes carry the
/// resulting list so `apply` is plain assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftChange {
    Opened,
    ScalarSet { field: ScalarField, value: String },
    CategorySelected { category: CategoryId },
    UnitSelected { unit: Unit },
    CurrencySelected { currency: Currency },
    TaxModeSet { mode: TaxMode },
    PriceSet {
        class: PriceClass,
        field: PriceField,
        value: String,
    },
    PriceCommitted {
        class: PriceClass,
        field: PriceField,
        price: String,
    },
    DiscountsChanged {
        class: PriceClass,
        tiers: Vec<DiscountTier>,
    },
    AttributesChanged { entries: Vec<Attribute> },
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftEvent {
    pub tenant_id: TenantId,
    pub draft_id: DraftId,
    pub occurred_at: DateTime<Utc>,
    pub change: DraftChange,
}

impl Event for DraftEvent {
    fn event_type(&self) -> &'static str {
        match self.change {
            DraftChange::Opened => "catalog.draft.opened",
            DraftChange::ScalarSet { .. } => "catalog.draft.field_set",
            DraftChange::CategorySelected { .. } => "catalog.draft.category_selected",
            DraftChange::UnitSelected { .. } => "catalog.draft.unit_selected",
            DraftChange::CurrencySelected { .. } => "catalog.draft.currency_selected",
            DraftChange::TaxModeSet { .. } => "catalog.draft.tax_mode_set",
            DraftChange::PriceSet { .. } => "catalog.draft.price_set",
            DraftChange::PriceCommitted { .. } => "catalog.draft.price_committed",
            DraftChange::DiscountsChanged { .. } => "catalog.draft.discounts_changed",
            DraftChange::AttributesChanged { .. } => "catalog.draft.attributes_changed",
            DraftChange::Discarded => "catalog.draft.discarded",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

impl Aggregate for ProductDraft {
    type Command = DraftCommand;
    type Event = DraftEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match &event.change {
            DraftChange::Opened => {
                self.id = event.draft_id;
                self.tenant_id = Some(event.tenant_id);
                self.status = DraftStatus::Editing;
                self.opened = true;
            }
            DraftChange::ScalarSet { field, value } => match field {
                ScalarField::Name => self.name = value.clone(),
                ScalarField::Description => self.description = value.clone(),
                ScalarField::Sku => self.sku = value.clone(),
                ScalarField::ThresholdValue => self.threshold_value = value.clone(),
                ScalarField::PurchasedDate => self.purchased_date = value.clone(),
                ScalarField::ExpiredDate => self.expired_date = value.clone(),
                ScalarField::Quantity => self.quantity = value.clone(),
            },
            DraftChange::CategorySelected { category } => self.category = Some(*category),
            DraftChange::UnitSelected { unit } => self.unit = Some(*unit),
            DraftChange::CurrencySelected { currency } => self.currency = *currency,
            DraftChange::TaxModeSet { mode } => {
                self.tax_mode = *mode;
                self.refresh_gst(PriceClass::Wholesale);
                self.refresh_gst(PriceClass::Retail);
            }
            DraftChange::PriceSet { class, field, value } => {
                self.block_mut(*class).set_price(*field, value.clone());
                if *field == PriceField::Selling {
                    self.refresh_gst(*class);
                }
            }
            DraftChange::PriceCommitted { class, field, price } => {
                self.block_mut(*class).set_price(*field, price.clone());
                if *field == PriceField::Selling {
                    self.refresh_gst(*class);
                }
            }
            DraftChange::DiscountsChanged { class, tiers } => {
                self.block_mut(*class).discounts = DiscountSchedule::from_tiers(tiers.clone());
            }
            DraftChange::AttributesChanged { entries } => {
                self.attributes = AttributeList::from_entries(entries.clone());
            }
            DraftChange::Discarded => {
                self.status = DraftStatus::Discarded;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        if matches!(command.op, DraftOp::Open) {
            if self.opened {
                return Err(DomainError::conflict("draft already opened"));
            }
            return Ok(vec![self.event(command, DraftChange::Opened)]);
        }

        if !self.opened {
            return Err(DomainError::not_found());
        }
        self.ensure_tenant(command.tenant_id)?;
        self.ensure_draft_id(command.draft_id)?;
        if self.status == DraftStatus::Discarded {
            return Err(DomainError::conflict("draft was discarded"));
        }

        let change = self.decide(&command.op)?;
        Ok(vec![self.event(command, change)])
    }
}

impl ProductDraft {
    fn event(&self, command: &DraftCommand, change: DraftChange) -> DraftEvent {
        DraftEvent {
            tenant_id: command.tenant_id,
            draft_id: command.draft_id,
            occurred_at: command.occurred_at,
            change,
        }
    }

    fn ensure_tenant(&self, tenant_id: TenantId) -> Result<(), DomainError> {
        if self.tenant_id != Some(tenant_id) {
            return Err(DomainError::invariant("tenant mismatch"));
        }
        Ok(())
    }

    fn ensure_draft_id(&self, draft_id: DraftId) -> Result<(), DomainError> {
        if self.id != draft_id {
            return Err(DomainError::invariant("draft_id mismatch"));
        }
        Ok(())
    }

    fn decide(&self, op: &DraftOp) -> Result<DraftChange, DomainError> {
        match op {
            // Gated in `handle` before lifecycle checks.
            DraftOp::Open => Err(DomainError::conflict("draft already opened")),
            DraftOp::SetScalar { field, value } => Ok(DraftChange::ScalarSet {
                field: *field,
                value: value.clone(),
            }),
            DraftOp::SelectCategory { category } => Ok(DraftChange::CategorySelected {
                category: *category,
            }),
            DraftOp::SelectUnit { unit } => Ok(DraftChange::UnitSelected { unit: *unit }),
            DraftOp::SelectCurrency { currency } => Ok(DraftChange::CurrencySelected {
                currency: *currency,
            }),
            DraftOp::SetTaxMode { mode } => Ok(DraftChange::TaxModeSet { mode: *mode }),
            DraftOp::SetPrice { class, field, value } => Ok(DraftChange::PriceSet {
                class: *class,
                field: *field,
                value: value.clone(),
            }),
            DraftOp::CommitPrice { class, field } => {
                let current = self.block(*class).price(*field);
                Ok(DraftChange::PriceCommitted {
                    class: *class,
                    field: *field,
                    price: format::normalize(current),
                })
            }
            DraftOp::EditDiscount {
                class,
                index,
                field,
                value,
            } => {
                let block = self.block(*class);
                let next = block
                    .discounts
                    .edit(*index, *field, value, &block.selling_price)?;
                Ok(DraftChange::DiscountsChanged {
                    class: *class,
                    tiers: next.tiers().to_vec(),
                })
            }
            DraftOp::CommitDiscountPrice { class, index } => {
                let next = self.block(*class).discounts.commit_price(*index)?;
                Ok(DraftChange::DiscountsChanged {
                    class: *class,
                    tiers: next.tiers().to_vec(),
                })
            }
            DraftOp::AddDiscountTier { class } => {
                let next = self.block(*class).discounts.add()?;
                Ok(DraftChange::DiscountsChanged {
                    class: *class,
                    tiers: next.tiers().to_vec(),
                })
            }
            DraftOp::RemoveDiscountTier { class, index } => {
                let next = self.block(*class).discounts.remove(*index)?;
                Ok(DraftChange::DiscountsChanged {
                    class: *class,
                    tiers: next.tiers().to_vec(),
                })
            }
            DraftOp::EditAttribute {
                index,
                field,
                value,
            } => {
                let next = self.attributes.edit(*index, *field, value)?;
                Ok(DraftChange::AttributesChanged {
                    entries: next.entries().to_vec(),
                })
            }
            DraftOp::AddAttribute => {
                let next = self.attributes.add()?;
                Ok(DraftChange::AttributesChanged {
                    entries: next.entries().to_vec(),
                })
            }
            DraftOp::RemoveAttribute { index } => {
                let next = self.attributes.remove(*index)?;
                Ok(DraftChange::AttributesChanged {
                    entries: next.entries().to_vec(),
                })
            }
            DraftOp::Discard => Ok(DraftChange::Discarded),
        }
    }
}
