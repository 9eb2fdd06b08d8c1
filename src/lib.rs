//! # shipquote
//!
//! Multi-carrier shipping quote aggregation.
//!
//! The crate fans a [`ShipmentRequest`](domain::entities::ShipmentRequest) out
//! to every configured carrier concurrently, merges the returned quotes into a
//! single price-sorted list, books shipments with single-carrier failover, and
//! normalizes carrier tracking vocabularies into one canonical state machine.
//!
//! ## Layers
//!
//! - [`domain`]: addresses, packages, quotes, tracking, category packaging policy
//! - [`infrastructure`]: carrier adapters, HTTP plumbing, configuration, logging
//! - [`application`]: the [`ShippingService`](application::ShippingService) orchestrator
//!
//! # Examples
//!
//! ```no_run
//! use shipquote::application::ShippingService;
//! use shipquote::infrastructure::config::LogisticsConfig;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LogisticsConfig::from_env()?;
//! let service = ShippingService::from_config(&config)?;
//! println!("carriers: {:?}", service.available_providers());
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
