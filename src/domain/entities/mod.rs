//! # Domain Entities
//!
//! Data contracts shared by carriers and the shipping service.
//!
//! - [`DeliveryAddress`]: pickup or delivery location
//! - [`PackageDetails`]: parcel measurements, value, category
//! - [`ShipmentRequest`]: the unit of work passed to every carrier
//! - [`ShippingQuote`]: one priced service tier
//! - [`ShipmentConfirmation`], [`ShipmentRecord`]: booking results
//! - [`TrackingInfo`], [`TrackingEvent`]: normalized tracking state

pub mod address;
pub mod package;
pub mod shipment;
pub mod shipment_request;
pub mod shipping_quote;
pub mod tracking;

pub use address::{DeliveryAddress, DeliveryAddressBuilder};
pub use package::{MAX_WEIGHT_KG, PackageDetails};
pub use shipment::{ShipmentConfirmation, ShipmentRecord};
pub use shipment_request::ShipmentRequest;
pub use shipping_quote::ShippingQuote;
pub use tracking::{TrackingEvent, TrackingInfo};
