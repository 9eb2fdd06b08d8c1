//! # Carriers
//!
//! Adapters translating the canonical shipment contract into each
//! carrier's API.
//!
//! ## Available Adapters
//!
//! - [`GigLogisticsCarrier`]: GIG Logistics, bearer-token envelope API
//! - [`KwikCarrier`]: Kwik on-demand delivery, `x-api-key` API
//! - [`SendboxCarrier`]: Sendbox, raw-key `Authorization` API
//! - [`LocalCarrier`]: algorithmic pricing, always available
//!
//! All of them implement [`CarrierAdapter`].

pub mod error;
pub mod gig_logistics;
pub mod http_client;
pub mod kwik;
pub mod local;
pub mod sendbox;
pub mod traits;

pub use error::{CarrierError, CarrierResult};
pub use gig_logistics::{GigLogisticsCarrier, GigLogisticsConfig};
pub use http_client::HttpClient;
pub use kwik::{KwikCarrier, KwikConfig};
pub use local::LocalCarrier;
pub use sendbox::{SendboxCarrier, SendboxConfig};
pub use traits::CarrierAdapter;
