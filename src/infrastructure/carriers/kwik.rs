//! # Kwik Carrier
//!
//! Adapter for the Kwik on-demand delivery API.
//!
//! Kwik authenticates with an `x-api-key` header and reports failures
//! through HTTP status codes.

use crate::domain::entities::{
    DeliveryAddress, ShipmentConfirmation, ShipmentRequest, ShippingQuote, TrackingEvent,
    TrackingInfo,
};
use crate::domain::value_objects::{CarrierId, Price, TrackingStatus};
use crate::infrastructure::carriers::error::{CarrierError, CarrierResult};
use crate::infrastructure::carriers::http_client::{DEFAULT_TIMEOUT_MS, HttpClient};
use crate::infrastructure::carriers::traits::CarrierAdapter;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Carrier id of Kwik.
pub const CARRIER_ID: &str = "kwik";

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.kwik.delivery";

/// Configuration for [`KwikCarrier`].
#[derive(Debug, Clone)]
pub struct KwikConfig {
    api_key: String,
    base_url: String,
    timeout_ms: u64,
}

impl KwikConfig {
    /// Creates a configuration for the production API.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Overrides the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

#[derive(Debug, Serialize)]
struct Stop<'a> {
    contact_name: &'a str,
    phone: &'a str,
    email: Option<&'a str>,
    address: String,
    state: &'a str,
    landmark: Option<&'a str>,
}

impl<'a> From<&'a DeliveryAddress> for Stop<'a> {
    fn from(address: &'a DeliveryAddress) -> Self {
        Self {
            contact_name: &address.recipient_name,
            phone: &address.phone,
            email: address.email.as_deref(),
            address: address.one_line(),
            state: &address.state,
            landmark: address.landmark.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Parcel<'a> {
    weight_kg: f64,
    dimensions_cm: [f64; 3],
    value: f64,
    fragile: bool,
    description: &'a str,
}

#[derive(Debug, Serialize)]
struct DeliveryBody<'a> {
    pickup: Stop<'a>,
    dropoff: Stop<'a>,
    parcel: Parcel<'a>,
    insured: bool,
}

#[derive(Debug, Deserialize)]
struct QuotesResponse {
    quotes: Vec<KwikQuote>,
}

#[derive(Debug, Deserialize)]
struct KwikQuote {
    service: String,
    amount: f64,
    eta_days: u32,
    #[serde(default = "default_true")]
    trackable: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct DeliveryCreated {
    delivery_id: String,
    status: String,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeliveryState {
    state: String,
    #[serde(default)]
    rider_location: Option<String>,
    #[serde(default)]
    eta: Option<DateTime<Utc>>,
    #[serde(default)]
    events: Vec<KwikEvent>,
}

#[derive(Debug, Deserialize)]
struct KwikEvent {
    time: DateTime<Utc>,
    state: String,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    note: String,
}

/// Maps a Kwik delivery state onto the canonical state.
///
/// Unknown states map to [`TrackingStatus::Pending`].
#[must_use]
pub fn map_status(raw: &str) -> TrackingStatus {
    match raw.trim().to_uppercase().as_str() {
        "UPCOMING" | "ACCEPTED" | "ASSIGNED" => TrackingStatus::Pending,
        "STARTED" | "PICKED" => TrackingStatus::PickedUp,
        "IN_PROGRESS" | "ARRIVED" => TrackingStatus::InTransit,
        "ENDED" | "COMPLETED" => TrackingStatus::Delivered,
        "FAILED" | "CANCELLED" | "DECLINED" => TrackingStatus::Failed,
        _ => TrackingStatus::Pending,
    }
}

/// Kwik adapter.
#[derive(Debug, Clone)]
pub struct KwikCarrier {
    carrier_id: CarrierId,
    http: HttpClient,
}

impl KwikCarrier {
    /// Creates the adapter.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built from the config.
    pub fn new(config: KwikConfig) -> CarrierResult<Self> {
        let http = HttpClient::with_auth_header(
            config.base_url,
            config.timeout_ms,
            "x-api-key",
            &config.api_key,
        )?;
        Ok(Self {
            carrier_id: CarrierId::new(CARRIER_ID),
            http,
        })
    }

    fn body(request: &ShipmentRequest) -> DeliveryBody<'_> {
        let package = request.package();
        DeliveryBody {
            pickup: request.pickup().into(),
            dropoff: request.delivery().into(),
            parcel: Parcel {
                weight_kg: package.weight_kg(),
                dimensions_cm: [package.length_cm(), package.width_cm(), package.height_cm()],
                value: package.value().to_f64(),
                fragile: package.is_fragile(),
                description: package.description(),
            },
            insured: request.requires_insurance(),
        }
    }

    async fn fetch_quotes(&self, request: &ShipmentRequest) -> CarrierResult<Vec<ShippingQuote>> {
        let response: QuotesResponse = self
            .http
            .post(&["v1", "quotes"], &Self::body(request))
            .await?;
        response
            .quotes
            .into_iter()
            .map(|q| {
                let price =
                    Price::new(q.amount).map_err(|e| CarrierError::protocol_error(e.to_string()))?;
                Ok(ShippingQuote::new(
                    self.carrier_id.clone(),
                    q.service,
                    price,
                    q.eta_days,
                    q.trackable,
                ))
            })
            .collect()
    }
}

#[async_trait]
impl CarrierAdapter for KwikCarrier {
    fn carrier_id(&self) -> &CarrierId {
        &self.carrier_id
    }

    #[instrument(skip_all, fields(carrier = CARRIER_ID))]
    async fn get_quote(&self, request: &ShipmentRequest) -> Vec<ShippingQuote> {
        self.fetch_quotes(request).await.unwrap_or_else(|e| {
            warn!(error = %e, "quote request failed");
            Vec::new()
        })
    }

    #[instrument(skip_all, fields(carrier = CARRIER_ID))]
    async fn create_shipment(
        &self,
        request: &ShipmentRequest,
    ) -> CarrierResult<ShipmentConfirmation> {
        let created: DeliveryCreated = self
            .http
            .post(&["v1", "deliveries"], &Self::body(request))
            .await?;

        if map_status(&created.status) == TrackingStatus::Failed {
            return Err(CarrierError::shipment_rejected(
                created
                    .reason
                    .unwrap_or_else(|| format!("delivery {}", created.status.to_lowercase())),
            ));
        }
        Ok(ShipmentConfirmation::new(created.delivery_id))
    }

    #[instrument(skip(self), fields(carrier = CARRIER_ID))]
    async fn track_shipment(&self, tracking_number: &str) -> CarrierResult<TrackingInfo> {
        let state: DeliveryState = self
            .http
            .get(&["v1", "deliveries", tracking_number])
            .await?;

        Ok(TrackingInfo {
            tracking_number: tracking_number.to_string(),
            status: map_status(&state.state),
            current_location: state.rider_location,
            estimated_delivery: state.eta,
            history: state
                .events
                .into_iter()
                .map(|e| TrackingEvent::new(e.time, e.state, e.location, e.note))
                .collect(),
        })
    }

    #[instrument(skip(self), fields(carrier = CARRIER_ID))]
    async fn cancel_shipment(&self, tracking_number: &str) -> bool {
        match self
            .http
            .post_empty(&["v1", "deliveries", tracking_number, "cancel"])
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "cancellation failed");
                false
            }
        }
    }
}
