//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared entirely by their attribute
/// values. "Modifying" one means building a new value; discount tiers and
/// attribute rows follow this discipline, which is what keeps list edits
/// free of aliasing surprises.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
