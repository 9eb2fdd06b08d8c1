//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! - [`CarrierId`]: carrier (provider) name
//! - [`Price`]: non-negative decimal amount
//! - [`PackageCategory`]: item category driving packaging policy
//! - [`TrackingStatus`]: canonical tracking state

pub mod enums;
pub mod ids;
pub mod price;

pub use enums::{PackageCategory, TrackingStatus};
pub use ids::CarrierId;
pub use price::Price;
