//! # Infrastructure Layer
//!
//! Carrier integrations and process plumbing.
//!
//! - [`carriers`]: carrier adapters and the shared HTTP client
//! - [`config`]: environment-driven carrier configuration
//! - [`logging`]: `tracing` subscriber setup

pub mod carriers;
pub mod config;
pub mod logging;
