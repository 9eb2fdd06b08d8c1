//! Property tests for local pricing and quote aggregation ordering.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use proptest::prelude::*;
use shipquote::application::{AggregationConfig, ShippingService};
use shipquote::domain::entities::MAX_WEIGHT_KG;
use shipquote::domain::value_objects::Price;
use shipquote::infrastructure::carriers::LocalCarrier;

const STATES: [&str; 6] = ["Lagos", "lagos ", "Ogun", "Oyo", "Kano", "Enugu"];

proptest! {
    #[test]
    fn local_quotes_respect_price_floor(
        weight in 0.01f64..=MAX_WEIGHT_KG,
        value in 0u32..500_000,
        fragile in any::<bool>(),
        state in proptest::sample::select(STATES.to_vec()),
    ) {
        let quotes = LocalCarrier::new().price(&common::request(state, weight, value, fragile));
        prop_assert!(!quotes.is_empty());
        for quote in &quotes {
            // cheapest multiplier is 1.0 on a 1000 base
            prop_assert!(quote.price() >= Price::from_units(1000));
            prop_assert_eq!(quote.price(), quote.price().round());
        }
    }

    #[test]
    fn fragile_adds_flat_surcharge_per_tier(
        weight in 0.01f64..200.0,
        value in 0u32..500_000,
        state in proptest::sample::select(STATES.to_vec()),
    ) {
        let carrier = LocalCarrier::new();
        let plain = carrier.price(&common::request(state, weight, value, false));
        let fragile = carrier.price(&common::request(state, weight, value, true));
        prop_assert_eq!(plain.len(), fragile.len());
        for (p, f) in plain.iter().zip(&fragile) {
            prop_assert_eq!(p.service_type(), f.service_type());
            prop_assert_eq!(p.price() + Price::from_units(500), f.price());
        }
    }

    #[test]
    fn aggregated_quotes_are_sorted_by_price(
        weight in 0.01f64..50.0,
        value in 0u32..200_000,
        fragile in any::<bool>(),
        state in proptest::sample::select(STATES.to_vec()),
    ) {
        let service = ShippingService::with_carriers(Vec::new(), AggregationConfig::default());
        let request = common::request(state, weight, value, fragile);
        let quotes = tokio_test::block_on(service.get_shipping_quotes(&request));
        prop_assert!(quotes.windows(2).all(|w| w[0].price() <= w[1].price()));
    }
}
