//! # GIG Logistics Carrier
//!
//! Adapter for the GIG Logistics REST API.
//!
//! Requests authenticate with a bearer token. Every response is wrapped in
//! an envelope whose `success` flag must be checked in addition to the HTTP
//! status.

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

/// Carrier id of GIG Logistics.
pub const CARRIER_ID: &str = "gig_logistics";

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.giglogistics.com/v1";

/// Configuration for [`GigLogisticsCarrier`].
#[derive(Debug, Clone)]
pub struct GigLogisticsConfig {
    api_key: String,
    base_url: String,
    timeout_ms: u64,
}

impl GigLogisticsConfig {
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

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
    data: Option<T>,
}

impl<T> Envelope<T> {
    fn into_data(self) -> CarrierResult<T> {
        if !self.success {
            let message = self.message.unwrap_or_else(|| "request unsuccessful".to_string());
            return Err(match self.code {
                Some(code) => CarrierError::shipment_rejected_with_code(message, code),
                None => CarrierError::shipment_rejected(message),
            });
        }
        self.data
            .ok_or_else(|| CarrierError::protocol_error("envelope has no data"))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Party<'a> {
    name: &'a str,
    phone: &'a str,
    address: String,
    state: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PriceRequest<'a> {
    sender_state: &'a str,
    receiver_state: &'a str,
    weight: f64,
    declared_value: f64,
    is_fragile: bool,
    insured: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceOption {
    service_name: String,
    price: f64,
    delivery_days: u32,
    #[serde(default = "default_true")]
    trackable: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateShipmentBody<'a> {
    sender: Party<'a>,
    receiver: Party<'a>,
    weight: f64,
    length: f64,
    width: f64,
    height: f64,
    declared_value: f64,
    description: &'a str,
    is_fragile: bool,
    insured: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedShipment {
    waybill: String,
    #[serde(default)]
    label_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackingData {
    status: String,
    #[serde(default)]
    current_location: Option<String>,
    #[serde(default)]
    estimated_delivery: Option<DateTime<Utc>>,
    #[serde(default)]
    history: Vec<HistoryEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryEntry {
    date: DateTime<Utc>,
    status: String,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    remark: String,
}

/// Maps a GIG Logistics shipment status onto the canonical state.
///
/// Unknown statuses map to [`TrackingStatus::Pending`].
#[must_use]
pub fn map_status(raw: &str) -> TrackingStatus {
    match raw.trim().to_lowercase().as_str() {
        "shipment_created" | "awaiting_pickup" => TrackingStatus::Pending,
        "picked_up" => TrackingStatus::PickedUp,
        "in_transit" | "arrived_at_hub" | "departed_hub" | "out_for_delivery" => {
            TrackingStatus::InTransit
        }
        "delivered" => TrackingStatus::Delivered,
        "delivery_failed" | "returned" | "cancelled" => TrackingStatus::Failed,
        _ => TrackingStatus::Pending,
    }
}

/// GIG Logistics adapter.
#[derive(Debug, Clone)]
pub struct GigLogisticsCarrier {
    carrier_id: CarrierId,
    http: HttpClient,
}

impl GigLogisticsCarrier {
    /// Creates the adapter.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built from the config.
    pub fn new(config: GigLogisticsConfig) -> CarrierResult<Self> {
        let http = HttpClient::with_auth_header(
            config.base_url,
            config.timeout_ms,
            "authorization",
            &format!("Bearer {}", config.api_key),
        )?;
        Ok(Self {
            carrier_id: CarrierId::new(CARRIER_ID),
            http,
        })
    }

    async fn fetch_quotes(&self, request: &ShipmentRequest) -> CarrierResult<Vec<ShippingQuote>> {
        let package = request.package();
        let body = PriceRequest {
            sender_state: &request.pickup().state,
            receiver_state: &request.delivery().state,
            weight: package.weight_kg(),
            declared_value: package.value().to_f64(),
            is_fragile: package.is_fragile(),
            insured: request.requires_insurance(),
        };
        let envelope: Envelope<Vec<PriceOption>> = self.http.post(&["price"], &body).await?;

        envelope
            .into_data()?
            .into_iter()
            .map(|option| {
                let price = Price::new(option.price)
                    .map_err(|e| CarrierError::protocol_error(e.to_string()))?;
                Ok(ShippingQuote::new(
                    self.carrier_id.clone(),
                    option.service_name,
                    price,
                    option.delivery_days,
                    option.trackable,
                ))
            })
            .collect()
    }
}

fn party(address: &DeliveryAddress) -> Party<'_> {
    Party {
        name: &address.recipient_name,
        phone: &address.phone,
        address: address.one_line(),
        state: &address.state,
    }
}

#[async_trait]
impl CarrierAdapter for GigLogisticsCarrier {
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
        let body = CreateShipmentBody {
            sender: party(request.pickup()),
            receiver: party(request.delivery()),
            weight: package.weight_kg(),
            length: package.length_cm(),
            width: package.width_cm(),
            height: package.height_cm(),
            declared_value: package.value().to_f64(),
            description: package.description(),
            is_fragile: package.is_fragile(),
            insured: request.requires_insurance(),
        };
        let envelope: Envelope<CreatedShipment> =
            self.http.post(&["shipments"], &body).await?;
        let created = envelope.into_data()?;

        let confirmation = ShipmentConfirmation::new(created.waybill);
        Ok(match created.label_url {
            Some(url) => confirmation.with_label_url(url),
            None => confirmation,
        })
    }

    #[instrument(skip(self), fields(carrier = CARRIER_ID))]
    async fn track_shipment(&self, tracking_number: &str) -> CarrierResult<TrackingInfo> {
        let envelope: Envelope<TrackingData> = self
            .http
            .get(&["shipments", tracking_number, "track"])
            .await?;
        let data = envelope.into_data()?;

        let mut info = TrackingInfo::new(tracking_number, map_status(&data.status));
        info.current_location = data.current_location;
        info.estimated_delivery = data.estimated_delivery;
        info.history = data
            .history
            .into_iter()
            .map(|h| TrackingEvent::new(h.date, h.status, h.location, h.remark))
            .collect();
        Ok(info)
    }

    #[instrument(skip(self), fields(carrier = CARRIER_ID))]
    async fn cancel_shipment(&self, tracking_number: &str) -> bool {
        let result: CarrierResult<Envelope<serde_json::Value>> = self
            .http
            .post(
                &["shipments", tracking_number, "cancel"],
                &serde_json::json!({}),
            )
            .await;
        match result {
            Ok(envelope) if envelope.success => true,
            Ok(envelope) => {
                warn!(message = ?envelope.message, "cancellation refused");
                false
            }
            Err(e) => {
                warn!(error = %e, "cancellation failed");
                false
            }
        }
    }
}
