//! Domain event trait.

use chrono::{DateTime, Utc};

/// A domain event: an accepted change, recorded as a fact.
///
/// Events are immutable, versioned for schema evolution and carry the
/// business time at which the change occurred.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "catalog.draft.opened").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;
}
