//! `shopledger-core` — domain foundation building blocks.
//!
//! Pure domain primitives shared by the pricing and catalog crates; no
//! infrastructure concerns live here.

pub mod aggregate;
pub mod error;
pub mod event;
pub mod id;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use error::{DomainError, DomainResult};
pub use event::Event;
pub use id::{AggregateId, TenantId};
pub use value_object::ValueObject;
