//! # Shipping Service
//!
//! Orchestrates the configured carriers behind one API.
//!
//! This module provides the [`ShippingService`] which fans quote requests
//! out to every carrier concurrently, books shipments with single-carrier
//! failover, and routes tracking and cancellation to the named carrier.

use crate::application::error::{ShippingError, ShippingResult};
use crate::domain::entities::{ShipmentRecord, ShipmentRequest, ShippingQuote, TrackingInfo};
use crate::domain::value_objects::CarrierId;
use crate::infrastructure::carriers::{
    CarrierAdapter, GigLogisticsCarrier, KwikCarrier, LocalCarrier, SendboxCarrier,
};
use crate::infrastructure::config::{DEFAULT_QUOTE_TIMEOUT_MS, LogisticsConfig};
use futures::future::join_all;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, error, info, instrument, warn};

/// Configuration for quote aggregation.
#[derive(Debug, Clone)]
pub struct AggregationConfig {
    /// Upper bound on a single carrier's quote call, in milliseconds.
    pub per_carrier_timeout_ms: u64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            per_carrier_timeout_ms: DEFAULT_QUOTE_TIMEOUT_MS,
        }
    }
}

impl AggregationConfig {
    /// Creates a configuration with the given per-carrier timeout.
    #[must_use]
    pub fn with_per_carrier_timeout(timeout_ms: u64) -> Self {
        Self {
            per_carrier_timeout_ms: timeout_ms,
        }
    }
}

impl From<&LogisticsConfig> for AggregationConfig {
    fn from(config: &LogisticsConfig) -> Self {
        Self::with_per_carrier_timeout(config.quote_timeout_ms())
    }
}

/// Carrier registry and orchestration.
///
/// # Invariants
///
/// - The registry is never empty: [`LocalCarrier`] is always registered last
/// - Registry order is fixed at construction and drives default selection
pub struct ShippingService {
    carriers: Vec<Arc<dyn CarrierAdapter>>,
    config: AggregationConfig,
}

impl fmt::Debug for ShippingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShippingService")
            .field("carriers", &self.available_providers())
            .field("config", &self.config)
            .finish()
    }
}

impl ShippingService {
    /// Builds the registry from configuration.
    ///
    /// Carriers are registered in the order GIG Logistics, Kwik, Sendbox,
    /// each only when its credential is present, followed by the local
    /// carrier.
    ///
    /// # Errors
    ///
    /// Returns `ShippingError::Carrier` if a configured carrier's HTTP
    /// client cannot be built.
    pub fn from_config(config: &LogisticsConfig) -> ShippingResult<Self> {
        let mut carriers: Vec<Arc<dyn CarrierAdapter>> = Vec::new();

        match config.gig_logistics() {
            Some(c) => carriers.push(Arc::new(GigLogisticsCarrier::new(c)?)),
            None => debug!(carrier = "gig_logistics", "no credential, carrier disabled"),
        }
        match config.kwik() {
            Some(c) => carriers.push(Arc::new(KwikCarrier::new(c)?)),
            None => debug!(carrier = "kwik", "no credential, carrier disabled"),
        }
        match config.sendbox() {
            Some(c) => carriers.push(Arc::new(SendboxCarrier::new(c)?)),
            None => debug!(carrier = "sendbox", "no credential, carrier disabled"),
        }

        Ok(Self::with_carriers(carriers, AggregationConfig::from(config)))
    }

    /// Builds the registry from the given carriers, then appends the local
    /// carrier.
    #[must_use]
    pub fn with_carriers(
        mut carriers: Vec<Arc<dyn CarrierAdapter>>,
        config: AggregationConfig,
    ) -> Self {
        carriers.push(Arc::new(LocalCarrier::new()));
        let service = Self { carriers, config };
        info!(carriers = ?service.available_providers(), "shipping service ready");
        service
    }

    /// Returns the registered carrier ids in registry order.
    #[must_use]
    pub fn available_providers(&self) -> Vec<CarrierId> {
        self.carriers
            .iter()
            .map(|c| c.carrier_id().clone())
            .collect()
    }

    /// Returns the aggregation configuration.
    #[must_use]
    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    fn find(&self, name: &str) -> Option<&Arc<dyn CarrierAdapter>> {
        self.carriers.iter().find(|c| c.carrier_id() == name)
    }

    /// Collects quotes from every carrier concurrently.
    ///
    /// Each carrier runs in its own task bounded by the per-carrier
    /// timeout. A carrier that times out or panics contributes no quotes;
    /// the rest of the batch is unaffected. The result is sorted ascending
    /// by price; ties keep registry order. No de-duplication is done.
    #[instrument(skip_all, fields(destination = %request.delivery().state))]
    pub async fn get_shipping_quotes(&self, request: &ShipmentRequest) -> Vec<ShippingQuote> {
        let per_carrier = Duration::from_millis(self.config.per_carrier_timeout_ms);

        let handles = self.carriers.iter().map(|carrier| {
            let carrier = Arc::clone(carrier);
            let request = request.clone();
            tokio::spawn(async move { timeout(per_carrier, carrier.get_quote(&request)).await })
        });
        let results = join_all(handles).await;

        let mut quotes = Vec::new();
        for (carrier, result) in self.carriers.iter().zip(results) {
            match result {
                Ok(Ok(carrier_quotes)) => {
                    debug!(carrier = %carrier.carrier_id(), count = carrier_quotes.len(), "quotes received");
                    quotes.extend(carrier_quotes);
                }
                Ok(Err(_)) => warn!(
                    carrier = %carrier.carrier_id(),
                    timeout_ms = self.config.per_carrier_timeout_ms,
                    "quote request timed out"
                ),
                Err(e) => error!(carrier = %carrier.carrier_id(), error = %e, "quote task failed"),
            }
        }

        quotes.sort_by_key(ShippingQuote::price);
        quotes
    }

    /// Returns the cheapest quote across all carriers.
    pub async fn cheapest_quote(&self, request: &ShipmentRequest) -> Option<ShippingQuote> {
        self.get_shipping_quotes(request).await.into_iter().next()
    }

    /// Books a shipment.
    ///
    /// The carrier is `provider` if given, else the request's preferred
    /// provider, else the first registered carrier. An unknown name also
    /// falls back to the first carrier. If the selected carrier fails,
    /// exactly one retry is made against the first carrier with a
    /// different id.
    ///
    /// # Errors
    ///
    /// Returns `ShippingError::ShipmentFailed` naming the last carrier tried
    /// when the booking and its single failover both fail, or when no
    /// alternative carrier exists.
    #[instrument(skip(self, request))]
    pub async fn create_shipment(
        &self,
        request: &ShipmentRequest,
        provider: Option<&str>,
    ) -> ShippingResult<ShipmentRecord> {
        let requested = provider.or_else(|| request.preferred_provider().map(CarrierId::as_str));
        let selected = match requested.and_then(|name| self.find(name)) {
            Some(carrier) => carrier,
            None => {
                if let Some(name) = requested {
                    warn!(provider = name, "unknown provider, using default carrier");
                }
                self.carriers.first().ok_or(ShippingError::NoCarriers)?
            }
        };

        let primary_error = match selected.create_shipment(request).await {
            Ok(confirmation) => {
                return Ok(ShipmentRecord::from_confirmation(
                    selected.carrier_id().clone(),
                    confirmation,
                ));
            }
            Err(e) => e,
        };
        error!(
            carrier = %selected.carrier_id(),
            error = %primary_error,
            retryable = primary_error.is_retryable(),
            retry_after_ms = ?primary_error.retry_after_ms(),
            "shipment creation failed"
        );

        let Some(fallback) = self
            .carriers
            .iter()
            .find(|c| c.carrier_id() != selected.carrier_id())
        else {
            return Err(ShippingError::ShipmentFailed {
                carrier: selected.carrier_id().clone(),
                source: primary_error,
            });
        };

        info!(
            from = %selected.carrier_id(),
            to = %fallback.carrier_id(),
            "failing over shipment creation"
        );
        match fallback.create_shipment(request).await {
            Ok(confirmation) => Ok(ShipmentRecord::from_confirmation(
                fallback.carrier_id().clone(),
                confirmation,
            )),
            Err(e) => {
                error!(
                    carrier = %fallback.carrier_id(),
                    error = %e,
                    retryable = e.is_retryable(),
                    "failover shipment creation failed"
                );
                Err(ShippingError::ShipmentFailed {
                    carrier: fallback.carrier_id().clone(),
                    source: e,
                })
            }
        }
    }

    /// Fetches tracking from the named carrier.
    ///
    /// # Errors
    ///
    /// Returns `ShippingError::ProviderNotFound` if no carrier has that
    /// name, or `ShippingError::Carrier` if the carrier call fails.
    pub async fn track_shipment(
        &self,
        tracking_number: &str,
        provider: &str,
    ) -> ShippingResult<TrackingInfo> {
        let carrier = self
            .find(provider)
            .ok_or_else(|| ShippingError::provider_not_found(provider))?;
        Ok(carrier.track_shipment(tracking_number).await?)
    }

    /// Cancels a shipment with the named carrier.
    ///
    /// # Errors
    ///
    /// Returns `ShippingError::ProviderNotFound` if no carrier has that name.
    pub async fn cancel_shipment(&self, tracking_number: &str, provider: &str) -> ShippingResult<bool> {
        let carrier = self
            .find(provider)
            .ok_or_else(|| ShippingError::provider_not_found(provider))?;
        Ok(carrier.cancel_shipment(tracking_number).await)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        DeliveryAddress, MAX_WEIGHT_KG, PackageDetails, ShipmentConfirmation, TrackingInfo,
    };
    use crate::domain::value_objects::{Price, TrackingStatus};
    use crate::infrastructure::carriers::error::{CarrierError, CarrierResult};
    use crate::infrastructure::carriers::local;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, Copy)]
    enum Behavior {
        Quotes(u32),
        Slow { delay_ms: u64, price: u32 },
        Fail,
        Panic,
        Hang,
    }

    #[derive(Debug)]
    struct MockCarrier {
        carrier_id: CarrierId,
        behavior: Behavior,
        bookings: AtomicUsize,
    }

    impl MockCarrier {
        fn new(id: &str, behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                carrier_id: CarrierId::new(id),
                behavior,
                bookings: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl CarrierAdapter for MockCarrier {
        fn carrier_id(&self) -> &CarrierId {
            &self.carrier_id
        }

        async fn get_quote(&self, _request: &ShipmentRequest) -> Vec<ShippingQuote> {
            match self.behavior {
                Behavior::Quotes(price) => vec![ShippingQuote::new(
                    self.carrier_id.clone(),
                    "Standard",
                    Price::from_units(price),
                    3,
                    true,
                )],
                Behavior::Slow { delay_ms, price } => {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    vec![ShippingQuote::new(
                        self.carrier_id.clone(),
                        "Scheduled",
                        Price::from_units(price),
                        5,
                        true,
                    )]
                }
                Behavior::Fail => Vec::new(),
                Behavior::Panic => panic!("carrier exploded"),
                Behavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Vec::new()
                }
            }
        }

        async fn create_shipment(
            &self,
            _request: &ShipmentRequest,
        ) -> CarrierResult<ShipmentConfirmation> {
            self.bookings.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                Behavior::Quotes(_) => Ok(ShipmentConfirmation::new(format!(
                    "{}-TRK",
                    self.carrier_id
                ))
                .with_label_url("https://labels.example/1.pdf")),
                _ => Err(CarrierError::shipment_rejected("no capacity")),
            }
        }

        async fn track_shipment(&self, tracking_number: &str) -> CarrierResult<TrackingInfo> {
            Ok(TrackingInfo::new(tracking_number, TrackingStatus::Delivered))
        }

        async fn cancel_shipment(&self, _tracking_number: &str) -> bool {
            matches!(self.behavior, Behavior::Quotes(_))
        }
    }

    fn address(state: &str) -> DeliveryAddress {
        DeliveryAddress::builder()
            .street("3 Broad Street")
            .city("Lagos Island")
            .state(state)
            .country("Nigeria")
            .phone("+2348090000000")
            .recipient_name("Ngozi")
            .build()
            .unwrap()
    }

    fn request(state: &str) -> ShipmentRequest {
        let package = PackageDetails::new(1.0, 20.0, 20.0, 20.0, Price::from_units(10_000)).unwrap();
        ShipmentRequest::new(address("Lagos"), address(state), package)
    }

    fn service(carriers: Vec<Arc<dyn CarrierAdapter>>) -> ShippingService {
        ShippingService::with_carriers(carriers, AggregationConfig::with_per_carrier_timeout(200))
    }

    mod registry {
        use super::*;

        #[test]
        fn empty_config_registers_only_local() {
            let service = ShippingService::from_config(&LogisticsConfig::new()).unwrap();
            assert_eq!(service.available_providers(), vec![CarrierId::new(local::CARRIER_ID)]);
        }

        #[test]
        fn configured_carriers_precede_local_in_fixed_order() {
            let config = LogisticsConfig::new()
                .with_sendbox_key("s")
                .with_gig_logistics_key("g")
                .with_kwik_key("k");
            let service = ShippingService::from_config(&config).unwrap();
            let ids: Vec<String> = service
                .available_providers()
                .iter()
                .map(ToString::to_string)
                .collect();
            assert_eq!(ids, vec!["gig_logistics", "kwik", "sendbox", "local"]);
        }

        #[test]
        fn quote_timeout_comes_from_config() {
            let config = LogisticsConfig::new().with_quote_timeout_ms(1234);
            let service = ShippingService::from_config(&config).unwrap();
            assert_eq!(service.config().per_carrier_timeout_ms, 1234);
        }

        #[test]
        fn injected_carriers_keep_order() {
            let service = service(vec![
                MockCarrier::new("b", Behavior::Fail),
                MockCarrier::new("a", Behavior::Fail),
            ]);
            let ids: Vec<String> = service
                .available_providers()
                .iter()
                .map(ToString::to_string)
                .collect();
            assert_eq!(ids, vec!["b", "a", "local"]);
        }
    }

    mod quotes {
        use super::*;

        #[tokio::test]
        async fn local_quotes_present_without_remote_carriers() {
            let service = service(vec![]);
            let quotes = service.get_shipping_quotes(&request("Kano")).await;
            assert_eq!(quotes.len(), 3);
            assert!(quotes.iter().all(|q| q.carrier() == local::CARRIER_ID));
        }

        #[tokio::test]
        async fn merges_and_sorts_ascending() {
            let service = service(vec![
                MockCarrier::new("pricey", Behavior::Quotes(9_000)),
                MockCarrier::new("cheap", Behavior::Quotes(500)),
            ]);
            let quotes = service.get_shipping_quotes(&request("Lagos")).await;
            assert_eq!(quotes.len(), 4);
            assert!(quotes.windows(2).all(|w| w[0].price() <= w[1].price()));
            assert_eq!(quotes[0].carrier(), "cheap");
            assert_eq!(quotes[3].carrier(), "pricey");
        }

        #[tokio::test]
        async fn panicking_carrier_is_isolated() {
            let service = service(vec![MockCarrier::new("dead", Behavior::Panic)]);
            let quotes = service.get_shipping_quotes(&request("Lagos")).await;
            assert_eq!(quotes.len(), 2);
            assert!(quotes.iter().all(|q| q.carrier() == local::CARRIER_ID));
        }

        #[tokio::test]
        async fn hanging_carrier_is_bounded_by_timeout() {
            let service = service(vec![
                MockCarrier::new("hung", Behavior::Hang),
                MockCarrier::new("ok", Behavior::Quotes(100)),
            ]);
            let started = std::time::Instant::now();
            let quotes = service.get_shipping_quotes(&request("Lagos")).await;
            assert!(started.elapsed() < Duration::from_secs(5));
            assert_eq!(quotes.len(), 3);
            assert!(quotes.iter().all(|q| q.carrier() != "hung"));
        }

        #[tokio::test]
        async fn carriers_are_queried_concurrently() {
            let service = service(vec![
                MockCarrier::new("slow-a", Behavior::Slow { delay_ms: 150, price: 800 }),
                MockCarrier::new("slow-b", Behavior::Slow { delay_ms: 150, price: 900 }),
            ]);
            let started = std::time::Instant::now();
            let quotes = service.get_shipping_quotes(&request("Lagos")).await;
            let elapsed = started.elapsed();

            // sequential calls would need at least 300ms
            assert!(elapsed < Duration::from_millis(300), "took {elapsed:?}");
            assert_eq!(quotes.len(), 4);
            assert!(quotes.iter().any(|q| q.carrier() == "slow-a"));
            assert!(quotes.iter().any(|q| q.carrier() == "slow-b"));
        }

        #[tokio::test]
        async fn heaviest_package_still_gets_local_quotes() {
            let package =
                PackageDetails::new(MAX_WEIGHT_KG, 200.0, 150.0, 150.0, Price::from_units(90_000))
                    .unwrap()
                    .with_fragile(true);
            let request = ShipmentRequest::new(address("Lagos"), address("Kano"), package);
            let quotes = service(vec![]).get_shipping_quotes(&request).await;
            assert_eq!(quotes.len(), 3);
            assert!(quotes.iter().all(|q| q.price() > Price::from_units(1000)));
        }

        #[tokio::test]
        async fn overlapping_tiers_are_not_deduplicated() {
            let service = service(vec![
                MockCarrier::new("twin", Behavior::Quotes(700)),
                MockCarrier::new("twin-2", Behavior::Quotes(700)),
            ]);
            let quotes = service.get_shipping_quotes(&request("Lagos")).await;
            assert_eq!(quotes.len(), 4);
            assert_eq!(quotes[0].carrier(), "twin");
            assert_eq!(quotes[1].carrier(), "twin-2");
        }

        #[tokio::test]
        async fn cheapest_quote_is_first() {
            let service = service(vec![MockCarrier::new("cheap", Behavior::Quotes(1))]);
            let best = service.cheapest_quote(&request("Kano")).await.unwrap();
            assert_eq!(best.price(), Price::from_units(1));
        }
    }

    mod booking {
        use super::*;

        #[tokio::test]
        async fn fails_over_to_next_distinct_carrier() {
            let failing = MockCarrier::new("first", Behavior::Fail);
            let working = MockCarrier::new("second", Behavior::Quotes(100));
            let service = service(vec![failing.clone(), working.clone()]);

            let record = service.create_shipment(&request("Lagos"), None).await.unwrap();
            assert_eq!(record.carrier, "second");
            assert_eq!(record.tracking_number, "second-TRK");
            assert_eq!(failing.bookings.load(Ordering::SeqCst), 1);
            assert_eq!(working.bookings.load(Ordering::SeqCst), 1);
        }

        #[tokio::test]
        async fn explicit_provider_is_used() {
            let a = MockCarrier::new("a", Behavior::Quotes(100));
            let b = MockCarrier::new("b", Behavior::Quotes(100));
            let service = service(vec![a.clone(), b.clone()]);

            let record = service.create_shipment(&request("Lagos"), Some("b")).await.unwrap();
            assert_eq!(record.carrier, "b");
            assert_eq!(a.bookings.load(Ordering::SeqCst), 0);
        }

        #[tokio::test]
        async fn preferred_provider_on_request_is_used() {
            let service = service(vec![MockCarrier::new("a", Behavior::Quotes(100))]);
            let req = request("Lagos").with_preferred_provider(local::CARRIER_ID);
            let record = service.create_shipment(&req, None).await.unwrap();
            assert_eq!(record.carrier, local::CARRIER_ID);
            assert!(record.label_url.is_none());
        }

        #[tokio::test]
        async fn unknown_provider_falls_back_to_first() {
            let service = service(vec![MockCarrier::new("a", Behavior::Quotes(100))]);
            let record = service
                .create_shipment(&request("Lagos"), Some("nope"))
                .await
                .unwrap();
            assert_eq!(record.carrier, "a");
        }

        #[tokio::test]
        async fn only_one_failover_attempt() {
            let first = MockCarrier::new("first", Behavior::Fail);
            let second = MockCarrier::new("second", Behavior::Fail);
            let service = service(vec![first.clone(), second.clone()]);

            let err = service
                .create_shipment(&request("Lagos"), None)
                .await
                .unwrap_err();
            match err {
                ShippingError::ShipmentFailed { carrier, .. } => assert_eq!(carrier, "second"),
                other => panic!("unexpected error: {other}"),
            }
            assert_eq!(first.bookings.load(Ordering::SeqCst), 1);
            assert_eq!(second.bookings.load(Ordering::SeqCst), 1);
        }

        #[tokio::test]
        async fn failover_from_selected_carrier_skips_its_own_id() {
            let first = MockCarrier::new("first", Behavior::Quotes(100));
            let broken = MockCarrier::new("broken", Behavior::Fail);
            let service = service(vec![first.clone(), broken.clone()]);

            let record = service
                .create_shipment(&request("Lagos"), Some("broken"))
                .await
                .unwrap();
            assert_eq!(record.carrier, "first");
        }
    }

    mod routing {
        use super::*;

        #[tokio::test]
        async fn tracking_unknown_provider_fails() {
            let service = service(vec![]);
            let err = service.track_shipment("LOC-1", "dhl").await.unwrap_err();
            assert!(err.is_provider_not_found());
        }

        #[tokio::test]
        async fn tracking_routes_to_named_carrier() {
            let service = service(vec![MockCarrier::new("a", Behavior::Quotes(1))]);
            let info = service.track_shipment("T-1", "a").await.unwrap();
            assert_eq!(info.status, TrackingStatus::Delivered);
            let info = service.track_shipment("T-1", local::CARRIER_ID).await.unwrap();
            assert_eq!(info.status, TrackingStatus::InTransit);
        }

        #[tokio::test]
        async fn cancel_routes_and_reports() {
            let service = service(vec![MockCarrier::new("stubborn", Behavior::Fail)]);
            assert!(!service.cancel_shipment("X", "stubborn").await.unwrap());
            assert!(service.cancel_shipment("X", local::CARRIER_ID).await.unwrap());
            assert!(service
                .cancel_shipment("X", "ghost")
                .await
                .unwrap_err()
                .is_provider_not_found());
        }
    }
}
