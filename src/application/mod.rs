//! # Application Layer
//!
//! Orchestration of carriers for callers.

pub mod error;
pub mod services;

pub use error::{ShippingError, ShippingResult};
pub use services::{AggregationConfig, ShippingService};
