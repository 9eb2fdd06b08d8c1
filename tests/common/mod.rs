//! Shared fixtures for integration tests.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use shipquote::domain::entities::{DeliveryAddress, PackageDetails, ShipmentRequest};
use shipquote::domain::value_objects::{PackageCategory, Price};

pub fn address(state: &str, name: &str) -> DeliveryAddress {
    DeliveryAddress::builder()
        .street("14 Awolowo Road")
        .city("Ikoyi")
        .state(state)
        .country("Nigeria")
        .phone("+2348031234567")
        .email("orders@example.com")
        .recipient_name(name)
        .build()
        .unwrap()
}

pub fn request(state: &str, weight: f64, value: u32, fragile: bool) -> ShipmentRequest {
    let package = PackageDetails::new(weight, 40.0, 30.0, 10.0, Price::from_units(value))
        .unwrap()
        .with_description("Framed print")
        .with_fragile(fragile);
    ShipmentRequest::new(address("Lagos", "Sender"), address(state, "Receiver"), package)
}

pub fn art_request(state: &str, weight: f64, value: u32) -> ShipmentRequest {
    let package = PackageDetails::new(weight, 60.0, 45.0, 8.0, Price::from_units(value))
        .unwrap()
        .with_category(PackageCategory::Art)
        .with_category_defaults();
    ShipmentRequest::new(address("Lagos", "Gallery"), address(state, "Collector"), package)
}
