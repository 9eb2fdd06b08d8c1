//! # Sendbox Carrier
//!
//! Adapter for the Sendbox shipping API.
//!
//! Sendbox takes the raw API key in the `Authorization` header and nests
//! tracking status under a `status.code` object.

use crate::domain::entities::{
    DeliveryAddress, ShipmentConfirmation, ShipmentRequest, ShippingQuote, TrackingEvent, TrackingInfo,
};
use crate::domain::value_objects::{CarrierId, Price, TrackingStatus};
use crate::infrastructure::carriers::error::{CarrierError, CarrierResult};
use crate::infrastructure::carriers::http_client::{DEFAULT_TIMEOUT_MS, HttpClient};
use crate::infrastructure::carriers::traits::CarrierAdapter;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Carrier id of Sendbox.
pub const CARRIER_ID: &str = "sendbox";

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://live.sendbox.co";

/// Configuration for [`SendboxCarrier`].
#[derive(Debug, Clone)]
pub struct SendboxConfig {
    api_key: String,
    base_url: String,
    timeout_ms: u64,
}

impl SendboxConfig {
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
struct QuoteBody<'a> {
    origin_state: &'a str,
    origin_country: &'a str,
    destination_state: &'a str,
    destination_country: &'a str,
    weight: f64,
    declared_value: f64,
    fragile: bool,
    insured: bool,
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: Vec<Rate>,
}

#[derive(Debug, Deserialize)]
struct Rate {
    name: String,
    fee: f64,
    delivery_days: u32,
    #[serde(default = "default_true")]
    tracking: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize)]
struct Contact<'a> {
    name: &'a str,
    phone: &'a str,
    email: Option<&'a str>,
    street: &'a str,
    city: &'a str,
    state: &'a str,
    country: &'a str,
    post_code: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ShipmentBody<'a> {
    origin: Contact<'a>,
    destination: Contact<'a>,
    weight: f64,
    length: f64,
    width: f64,
    height: f64,
    declared_value: f64,
    description: &'a str,
    fragile: bool,
    insured: bool,
}

#[derive(Debug, Deserialize)]
struct ShipmentCreated {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    waybill_url: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusField {
    code: String,
}

#[derive(Debug, Deserialize)]
struct TrackingResponse {
    status: StatusField,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    eta: Option<DateTime<Utc>>,
    #[serde(default)]
    events: Vec<SendboxEvent>,
}

#[derive(Debug, Deserialize)]
struct SendboxEvent {
    date: DateTime<Utc>,
    status: String,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct CancelResponse {
    status: String,
}

/// Maps a Sendbox status code onto the canonical state.
///
/// Unknown codes map to [`TrackingStatus::Pending`].
#[must_use]
pub fn map_status(raw: &str) -> TrackingStatus {
    match raw.trim().to_lowercase().as_str() {
        "drafted" | "pending" | "pickup_started" => TrackingStatus::Pending,
        "picked_up" => TrackingStatus::PickedUp,
        "in_transit" | "in_delivery" => TrackingStatus::InTransit,
        "delivered" => TrackingStatus::Delivered,
        "cancelled" | "rejected" | "returned" => TrackingStatus::Failed,
        _ => TrackingStatus::Pending,
    }
}

/// Sendbox adapter.
#[derive(Debug, Clone)]
pub struct SendboxCarrier {
    carrier_id: CarrierId,
    http: HttpClient,
}

impl SendboxCarrier {
    /// Creates the adapter.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built from the config.
    pub fn new(config: SendboxConfig) -> CarrierResult<Self> {
        let http = HttpClient::with_auth_header(
            config.base_url,
            config.timeout_ms,
            "authorization",
            &config.api_key,
        )?;
        Ok(Self {
            carrier_id: CarrierId::new(CARRIER_ID),
            http,
        })
    }

    async fn fetch_quotes(&self, request: &ShipmentRequest) -> CarrierResult<Vec<ShippingQuote>> {
        let package = request.package();
        let body = QuoteBody {
            origin_state: &request.pickup().state,
            origin_country: &request.pickup().country,
            destination_state: &request.delivery().state,
            destination_country: &request.delivery().country,
            weight: package.weight_kg(),
            declared_value: package.value().to_f64(),
            fragile: package.is_fragile(),
            insured: request.requires_insurance(),
        };
        let response: RatesResponse = self
            .http
            .post(&["shipping", "shipment_delivery_quote"], &body)
            .await?;

        let mut quotes = Vec::with_capacity(response.rates.len());
        for rate in response.rates {
            let price =
                Price::new(rate.fee).map_err(|e| CarrierError::protocol_error(e.to_string()))?;
            quotes.push(ShippingQuote::new(
                self.carrier_id.clone(),
                rate.name,
                price,
                rate.delivery_days,
                rate.tracking,
            ));
        }
        Ok(quotes)
    }
}

fn contact(address: &DeliveryAddress) -> Contact<'_> {
    Contact {
        name: &address.recipient_name,
        phone: &address.phone,
        email: address.email.as_deref(),
        street: &address.street,
        city: &address.city,
        state: &address.state,
        country: &address.country,
        post_code: address.postal_code.as_deref(),
    }
}

#[async_trait]
impl CarrierAdapter for SendboxCarrier {
    fn carrier_id(&self) -> &CarrierId {
        &self.carrier_id
    }

    #[instrument(skip_all, fields(carrier = CARRIER_ID))]
    async fn get_quote(&self, request: &ShipmentRequest) -> Vec<ShippingQuote> {
        match self.fetch_quotes(request).await {
            Ok(quotes) => quotes,
            Err(e) => {
                warn!(error = %e, "quote request failed");
                Vec::new()
            }
        }
    }

    #[instrument(skip_all, fields(carrier = CARRIER_ID))]
    async fn create_shipment(
        &self,
        request: &ShipmentRequest,
    ) -> CarrierResult<ShipmentConfirmation> {
        let package = request.package();
        let body = ShipmentBody {
            origin: contact(request.pickup()),
            destination: contact(request.delivery()),
            weight: package.weight_kg(),
            length: package.length_cm(),
            width: package.width_cm(),
            height: package.height_cm(),
            declared_value: package.value().to_f64(),
            description: package.description(),
            fragile: package.is_fragile(),
            insured: request.requires_insurance(),
        };
        let created: ShipmentCreated = self
            .http
            .post(&["shipping", "shipments"], &body)
            .await?;

        let Some(code) = created.code else {
            return Err(CarrierError::shipment_rejected(
                created
                    .message
                    .unwrap_or_else(|| "no shipment code returned".to_string()),
            ));
        };
        let mut confirmation = ShipmentConfirmation::new(code);
        confirmation.label_url = created.waybill_url;
        Ok(confirmation)
    }

    #[instrument(skip(self), fields(carrier = CARRIER_ID))]
    async fn track_shipment(&self, tracking_number: &str) -> CarrierResult<TrackingInfo> {
        let response: TrackingResponse = self
            .http
            .get_with_params(&["shipping", "tracking"], &[("code", tracking_number)])
            .await?;

        let mut info = TrackingInfo::new(tracking_number, map_status(&response.status.code));
        info.current_location = response.location;
        info.estimated_delivery = response.eta;
        info.history = response
            .events
            .into_iter()
            .map(|e| TrackingEvent::new(e.date, e.status, e.location, e.description))
            .collect();
        Ok(info)
    }

    #[instrument(skip(self), fields(carrier = CARRIER_ID))]
    async fn cancel_shipment(&self, tracking_number: &str) -> bool {
        let result: CarrierResult<CancelResponse> = self
            .http
            .post(
                &["shipping", "shipments", tracking_number, "cancel"],
                &serde_json::json!({ "reason": "cancelled by sender" }),
            )
            .await;
        match result {
            Ok(response) => response.status.eq_ignore_ascii_case("success"),
            Err(e) => {
                warn!(error = %e, "cancellation failed");
                false
            }
        }
    }
}
