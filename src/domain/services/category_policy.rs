//! # Category Packaging Policy
//!
//! Packaging defaults per item category.
//!
//! | Category | Minimum weight | Fragile | Insurance when     | Special handling when |
//! |----------|----------------|---------|--------------------|-----------------------|
//! | art      | 0.5 kg         | yes     | value > 50,000     | value > 100,000       |
//! | book     | 0.2 kg         | no      | value > 20,000     | never                 |
//! | fashion  | 0.3 kg         | no      | value > 30,000     | never                 |
//!
//! Carriers price fragility and insurable value, so these thresholds feed
//! straight into quotes. Callers apply them before building a request; the
//! shipping service never does.
//!
//! # Examples
//!
//! ```
//! use shipquote::domain::services::category_policy::art_shipping;
//! use shipquote::domain::value_objects::Price;
//!
//! let defaults = art_shipping(0.1, Price::from_units(60_000));
//! assert_eq!(defaults.weight_kg, 0.5);
//! assert!(defaults.fragile);
//! assert!(defaults.insurance_required);
//! assert!(!defaults.special_handling);
//! ```

use crate::domain::value_objects::{PackageCategory, Price};
use serde::{Deserialize, Serialize};

const ART_MIN_WEIGHT_KG: f64 = 0.5;
const ART_INSURANCE_THRESHOLD: u32 = 50_000;
const ART_SPECIAL_HANDLING_THRESHOLD: u32 = 100_000;

const BOOK_MIN_WEIGHT_KG: f64 = 0.2;
const BOOK_INSURANCE_THRESHOLD: u32 = 20_000;

const FASHION_MIN_WEIGHT_KG: f64 = 0.3;
const FASHION_INSURANCE_THRESHOLD: u32 = 30_000;

/// Packaging defaults to merge into package details.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PackagingDefaults {
    /// Weight after applying the category floor.
    pub weight_kg: f64,
    /// Whether the item must be packed as fragile.
    pub fragile: bool,
    /// Whether the shipment must be insured.
    pub insurance_required: bool,
    /// Whether the item needs special handling.
    pub special_handling: bool,
}

/// Packaging defaults for artwork.
#[must_use]
pub fn art_shipping(weight_kg: f64, value: Price) -> PackagingDefaults {
    PackagingDefaults {
        weight_kg: weight_kg.max(ART_MIN_WEIGHT_KG),
        fragile: true,
        insurance_required: value > Price::from_units(ART_INSURANCE_THRESHOLD),
        special_handling: value > Price::from_units(ART_SPECIAL_HANDLING_THRESHOLD),
    }
}

/// Packaging defaults for books.
#[must_use]
pub fn book_shipping(weight_kg: f64, value: Price) -> PackagingDefaults {
    PackagingDefaults {
        weight_kg: weight_kg.max(BOOK_MIN_WEIGHT_KG),
        fragile: false,
        insurance_required: value > Price::from_units(BOOK_INSURANCE_THRESHOLD),
        special_handling: false,
    }
}

/// Packaging defaults for fashion items.
#[must_use]
pub fn fashion_shipping(weight_kg: f64, value: Price) -> PackagingDefaults {
    PackagingDefaults {
        weight_kg: weight_kg.max(FASHION_MIN_WEIGHT_KG),
        fragile: false,
        insurance_required: value > Price::from_units(FASHION_INSURANCE_THRESHOLD),
        special_handling: false,
    }
}

/// Dispatches to the category's policy; `None` for [`PackageCategory::Other`].
#[must_use]
pub fn defaults_for(
    category: PackageCategory,
    weight_kg: f64,
    value: Price,
) -> Option<PackagingDefaults> {
    match category {
        PackageCategory::Art => Some(art_shipping(weight_kg, value)),
        PackageCategory::Book => Some(book_shipping(weight_kg, value)),
        PackageCategory::Fashion => Some(fashion_shipping(weight_kg, value)),
        PackageCategory::Other => None,
    }
}
