//! # Application Services
//!
//! - [`ShippingService`]: concurrent quote aggregation, booking failover,
//!   tracking and cancellation routing

pub mod shipping_service;

pub use shipping_service::{AggregationConfig, ShippingService};
