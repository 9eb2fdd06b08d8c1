//! # Local Carrier
//!
//! Algorithmic pricing for manual/local dispatch.
//!
//! The local carrier never performs I/O, so it is always available and is
//! registered last as the guaranteed fallback.
//!
//! ## Pricing
//!
//! - base = max(1000, weight_kg x 500)
//! - insurance = value x 0.02 when value > 50,000, else 0
//! - each tier = round(base x multiplier + insurance)
//! - fragile packages add a flat 500 to every tier
//!
//! | Destination           | Tier               | Multiplier | Days | Tracking |
//! |-----------------------|--------------------|------------|------|----------|
//! | Lagos                 | Same Day Delivery  | 1.5        | 1    | yes      |
//! | Lagos                 | Standard Delivery  | 1.0        | 2    | yes      |
//! | Ogun, Oyo, Osun       | Express Delivery   | 1.8        | 2    | yes      |
//! | Ogun, Oyo, Osun       | Standard Delivery  | 1.3        | 4    | yes      |
//! | elsewhere             | Express Delivery   | 2.5        | 3    | yes      |
//! | elsewhere             | Standard Delivery  | 1.8        | 6    | yes      |
//! | elsewhere             | Economy Delivery   | 1.2        | 10   | no       |

use crate::domain::entities::{
    ShipmentConfirmation, ShipmentRequest, ShippingQuote, TrackingEvent, TrackingInfo,
};
use crate::domain::value_objects::{CarrierId, Price, TrackingStatus};
use crate::infrastructure::carriers::error::CarrierResult;
use crate::infrastructure::carriers::traits::CarrierAdapter;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use tracing::debug;
use uuid::Uuid;

/// Carrier id of the local carrier.
pub const CARRIER_ID: &str = "local";

const HOME_STATE: &str = "Lagos";
const NEARBY_STATES: [&str; 3] = ["Ogun", "Oyo", "Osun"];

const MIN_BASE_PRICE: u32 = 1_000;
const PRICE_PER_KG: u32 = 500;
const INSURANCE_THRESHOLD: u32 = 50_000;
const FRAGILE_SURCHARGE: u32 = 500;

const ORIGIN_HUB: &str = "Lagos Pickup Hub";
const DISTRIBUTION_CENTER: &str = "Lagos Distribution Center";

/// One priced tier before surcharges.
struct Tier {
    name: &'static str,
    multiplier: Decimal,
    days: u32,
    tracking: bool,
}

impl Tier {
    const fn new(name: &'static str, multiplier: Decimal, days: u32, tracking: bool) -> Self {
        Self {
            name,
            multiplier,
            days,
            tracking,
        }
    }
}

/// Carrier that prices algorithmically and books without a remote API.
#[derive(Debug, Clone)]
pub struct LocalCarrier {
    carrier_id: CarrierId,
}

impl LocalCarrier {
    /// Creates the local carrier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            carrier_id: CarrierId::new(CARRIER_ID),
        }
    }

    /// Prices every tier for the request's destination zone.
    ///
    /// Never empty: every destination has at least two tiers.
    #[must_use]
    pub fn price(&self, request: &ShipmentRequest) -> Vec<ShippingQuote> {
        let package = request.package();
        let base = base_price(package.weight_kg());
        let insurance = insurance_surcharge(package.value());
        let fragile = if package.is_fragile() {
            Price::from_units(FRAGILE_SURCHARGE)
        } else {
            Price::ZERO
        };

        zone_tiers(&request.delivery().state)
            .into_iter()
            .map(|tier| {
                let amount = (base.saturating_mul(tier.multiplier) + insurance).round();
                ShippingQuote::new(
                    self.carrier_id.clone(),
                    tier.name,
                    amount + fragile,
                    tier.days,
                    tier.tracking,
                )
            })
            .collect()
    }

    fn tracking_number() -> String {
        let suffix: String = Uuid::new_v4()
            .simple()
            .to_string()
            .to_uppercase()
            .chars()
            .take(8)
            .collect();
        format!("LOC-{}-{}", Utc::now().timestamp_millis(), suffix)
    }
}

impl Default for LocalCarrier {
    fn default() -> Self {
        Self::new()
    }
}

// Weight is capped at MAX_WEIGHT_KG, so the conversion always succeeds for
// a valid package.
fn base_price(weight_kg: f64) -> Price {
    let by_weight = Decimal::from_f64(weight_kg * f64::from(PRICE_PER_KG))
        .and_then(|d| Price::from_decimal(d).ok())
        .unwrap_or(Price::MAX);
    by_weight.max(Price::from_units(MIN_BASE_PRICE))
}

fn insurance_surcharge(value: Price) -> Price {
    if value > Price::from_units(INSURANCE_THRESHOLD) {
        value.saturating_mul(Decimal::new(2, 2))
    } else {
        Price::ZERO
    }
}

fn zone_tiers(state: &str) -> Vec<Tier> {
    let state = state.trim();
    if state.eq_ignore_ascii_case(HOME_STATE) {
        vec![
            Tier::new("Same Day Delivery", Decimal::new(15, 1), 1, true),
            Tier::new("Standard Delivery", Decimal::ONE, 2, true),
        ]
    } else if NEARBY_STATES.iter().any(|s| s.eq_ignore_ascii_case(state)) {
        vec![
            Tier::new("Express Delivery", Decimal::new(18, 1), 2, true),
            Tier::new("Standard Delivery", Decimal::new(13, 1), 4, true),
        ]
    } else {
        vec![
            Tier::new("Express Delivery", Decimal::new(25, 1), 3, true),
            Tier::new("Standard Delivery", Decimal::new(18, 1), 6, true),
            Tier::new("Economy Delivery", Decimal::new(12, 1), 10, false),
        ]
    }
}

#[async_trait]
impl CarrierAdapter for LocalCarrier {
    fn carrier_id(&self) -> &CarrierId {
        &self.carrier_id
    }

    async fn get_quote(&self, request: &ShipmentRequest) -> Vec<ShippingQuote> {
        self.price(request)
    }

    async fn create_shipment(
        &self,
        request: &ShipmentRequest,
    ) -> CarrierResult<ShipmentConfirmation> {
        let tracking_number = Self::tracking_number();
        debug!(
            tracking_number = %tracking_number,
            destination = %request.delivery().state,
            "local shipment booked"
        );
        Ok(ShipmentConfirmation::new(tracking_number))
    }

    async fn track_shipment(&self, tracking_number: &str) -> CarrierResult<TrackingInfo> {
        let now = Utc::now();
        let mut info = TrackingInfo::new(tracking_number, TrackingStatus::InTransit);
        info.current_location = Some(DISTRIBUTION_CENTER.to_string());
        info.estimated_delivery = Some(now + Duration::days(2));
        info.history = vec![
            TrackingEvent::new(
                now - Duration::hours(24),
                TrackingStatus::PickedUp.as_str(),
                Some(ORIGIN_HUB.to_string()),
                "Package picked up from sender",
            ),
            TrackingEvent::new(
                now,
                TrackingStatus::InTransit.as_str(),
                Some(DISTRIBUTION_CENTER.to_string()),
                "Package in transit to destination",
            ),
        ];
        Ok(info)
    }

    async fn cancel_shipment(&self, tracking_number: &str) -> bool {
        debug!(tracking_number = %tracking_number, "local shipment cancelled");
        true
    }
}
