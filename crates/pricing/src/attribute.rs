//! Free-form product attributes: a bounded, ordered name/value list.

use serde::{Deserialize, Serialize};
use shopledger_core::{DomainError, DomainResult, ValueObject};

/// An attribute list never grows beyond five entries.
pub const MAX_ATTRIBUTES: usize = 5;

/// One free-form attribute, e.g. `Color: Black` or `Memory: 128GB`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.value.is_empty()
    }
}

impl ValueObject for Attribute {}

/// Which attribute field an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeField {
    Name,
    Value,
}

/// Ordered attribute list, 1..=5 entries.
///
/// Starts with one blank entry. The floor of one mirrors the discount
/// schedule: an empty list would have no last entry to satisfy the
/// append precondition, so growth could never restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeList {
    entries: Vec<Attribute>,
}

impl Default for AttributeList {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeList {
    /// A fresh list: one blank entry.
    pub fn new() -> Self {
        Self {
            entries: vec![Attribute::default()],
        }
    }

    /// Rehydrate a list from entries produced by an earlier list operation.
    pub fn from_entries(entries: Vec<Attribute>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Attribute] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a blank entry, permitted only while the list holds fewer
    /// than five entries and the current last entry has both its name and
    /// value filled in.
    pub fn add(&self) -> DomainResult<Self> {
        if self.entries.len() >= MAX_ATTRIBUTES {
            return Err(DomainError::invariant(format!(
                "a product holds at most {MAX_ATTRIBUTES} attributes"
            )));
        }
        if !self.entries.last().is_some_and(Attribute::is_complete) {
            return Err(DomainError::invariant(
                "fill in the last attribute before adding another",
            ));
        }
        let mut entries = self.entries.clone();
        entries.push(Attribute::default());
        Ok(Self { entries })
    }

    /// Remove the entry at `index`; one entry always remains.
    pub fn remove(&self, index: usize) -> DomainResult<Self> {
        self.entry(index)?;
        if self.entries.len() <= 1 {
            return Err(DomainError::invariant(
                "a product keeps at least one attribute row",
            ));
        }
        let mut entries = self.entries.clone();
        entries.remove(index);
        Ok(Self { entries })
    }

    /// Assign one field of one entry; no derived computation.
    pub fn edit(&self, index: usize, field: AttributeField, value: &str) -> DomainResult<Self> {
        let mut entry = self.entry(index)?.clone();
        match field {
            AttributeField::Name => entry.name = value.to_string(),
            AttributeField::Value => entry.value = value.to_string(),
        }
        let mut entries = self.entries.clone();
        entries[index] = entry;
        Ok(Self { entries })
    }

    fn entry(&self, index: usize) -> DomainResult<&Attribute> {
        self.entries
            .get(index)
            .ok_or_else(|| DomainError::validation(format!("no attribute at index {index}")))
    }
}
