//! Benchmarks for local pricing and quote aggregation.
//!
//! ```bash
//! cargo bench --bench quote_aggregation
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used, missing_docs)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use shipquote::application::{AggregationConfig, ShippingService};
use shipquote::domain::entities::{DeliveryAddress, PackageDetails, ShipmentRequest};
use shipquote::domain::value_objects::Price;
use shipquote::infrastructure::carriers::LocalCarrier;
use std::hint::black_box;
use tokio::runtime::Runtime;

fn address(state: &str) -> DeliveryAddress {
    DeliveryAddress::builder()
        .street("3 Adeola Odeku Street")
        .city("Victoria Island")
        .state(state)
        .country("Nigeria")
        .phone("+2348000000000")
        .recipient_name("Bench")
        .build()
        .unwrap()
}

fn request(state: &str) -> ShipmentRequest {
    let package = PackageDetails::new(4.5, 50.0, 40.0, 20.0, Price::from_units(80_000))
        .unwrap()
        .with_fragile(true);
    ShipmentRequest::new(address("Lagos"), address(state), package)
}

fn bench_local_pricing(c: &mut Criterion) {
    let carrier = LocalCarrier::new();
    let mut group = c.benchmark_group("local_pricing");
    for state in ["Lagos", "Oyo", "Kaduna"] {
        let request = request(state);
        group.bench_with_input(BenchmarkId::from_parameter(state), &request, |b, r| {
            b.iter(|| carrier.price(black_box(r)));
        });
    }
    group.finish();
}

fn bench_aggregation(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let service = ShippingService::with_carriers(Vec::new(), AggregationConfig::default());
    let request = request("Kaduna");

    c.bench_function("get_shipping_quotes_local_only", |b| {
        b.to_async(&rt)
            .iter(|| async { black_box(service.get_shipping_quotes(&request).await) });
    });
}

criterion_group!(benches, bench_local_pricing, bench_aggregation);
criterion_main!(benches);
