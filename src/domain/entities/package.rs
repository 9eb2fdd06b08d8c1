//! # Package Details
//!
//! Physical and declared properties of the parcel being shipped.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::services::category_policy::{self, PackagingDefaults};
use crate::domain::value_objects::{PackageCategory, Price};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Heaviest parcel accepted, in kilograms.
pub const MAX_WEIGHT_KG: f64 = 10_000.0;

/// Physical and declared properties of a parcel.
///
/// Weight is in kilograms, dimensions in centimeters, `value` is the
/// insurable value.
///
/// # Invariants
///
/// - Weight and all three dimensions are finite and strictly positive
/// - Weight is at most [`MAX_WEIGHT_KG`]
///
/// Deserialization goes through [`PackageDetails::new`], so persisted
/// packages obey the same invariants.
///
/// # Examples
///
/// ```
/// use shipquote::domain::entities::PackageDetails;
/// use shipquote::domain::value_objects::{PackageCategory, Price};
///
/// let package = PackageDetails::new(0.1, 30.0, 20.0, 5.0, Price::from_units(60_000))
///     .unwrap()
///     .with_category(PackageCategory::Art)
///     .with_category_defaults();
///
/// assert_eq!(package.weight_kg(), 0.5);
/// assert!(package.is_fragile());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PackageDetailsRecord")]
pub struct PackageDetails {
    weight_kg: f64,
    length_cm: f64,
    width_cm: f64,
    height_cm: f64,
    value: Price,
    description: String,
    fragile: bool,
    category: PackageCategory,
}

impl PackageDetails {
    /// Creates package details with no description, not fragile, category `other`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPackage` if weight or any dimension is
    /// not a positive finite number, or if weight exceeds [`MAX_WEIGHT_KG`].
    pub fn new(
        weight_kg: f64,
        length_cm: f64,
        width_cm: f64,
        height_cm: f64,
        value: Price,
    ) -> DomainResult<Self> {
        for (name, measure) in [
            ("weight", weight_kg),
            ("length", length_cm),
            ("width", width_cm),
            ("height", height_cm),
        ] {
            if !measure.is_finite() || measure <= 0.0 {
                return Err(DomainError::invalid_package(format!(
                    "{name} must be positive, got {measure}"
                )));
            }
        }
        if weight_kg > MAX_WEIGHT_KG {
            return Err(DomainError::invalid_package(format!(
                "weight must be at most {MAX_WEIGHT_KG}kg, got {weight_kg}"
            )));
        }

        Ok(Self {
            weight_kg,
            length_cm,
            width_cm,
            height_cm,
            value,
            description: String::new(),
            fragile: false,
            category: PackageCategory::Other,
        })
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the fragile flag.
    #[must_use]
    pub fn with_fragile(mut self, fragile: bool) -> Self {
        self.fragile = fragile;
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: PackageCategory) -> Self {
        self.category = category;
        self
    }

    /// Returns the packaging defaults for this package's category, if any.
    #[must_use]
    pub fn category_defaults(&self) -> Option<PackagingDefaults> {
        category_policy::defaults_for(self.category, self.weight_kg, self.value)
    }

    /// Merges the category defaults into these details.
    ///
    /// The weight is raised to the category floor and fragility is set when
    /// the category requires it. A caller-set fragile flag is never cleared.
    #[must_use]
    pub fn with_category_defaults(mut self) -> Self {
        if let Some(defaults) = self.category_defaults() {
            self.weight_kg = defaults.weight_kg;
            self.fragile |= defaults.fragile;
        }
        self
    }

    /// Returns the weight in kilograms.
    #[inline]
    #[must_use]
    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// Returns the length in centimeters.
    #[inline]
    #[must_use]
    pub fn length_cm(&self) -> f64 {
        self.length_cm
    }

    /// Returns the width in centimeters.
    #[inline]
    #[must_use]
    pub fn width_cm(&self) -> f64 {
        self.width_cm
    }

    /// Returns the height in centimeters.
    #[inline]
    #[must_use]
    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    /// Returns the insurable value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> Price {
        self.value
    }

    /// Returns the description.
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns true if the package is fragile.
    #[inline]
    #[must_use]
    pub fn is_fragile(&self) -> bool {
        self.fragile
    }

    /// Returns the category.
    #[inline]
    #[must_use]
    pub fn category(&self) -> PackageCategory {
        self.category
    }
}

/// Unvalidated wire shape of [`PackageDetails`].
#[derive(Deserialize)]
struct PackageDetailsRecord {
    weight_kg: f64,
    length_cm: f64,
    width_cm: f64,
    height_cm: f64,
    value: Price,
    #[serde(default)]
    description: String,
    #[serde(default)]
    fragile: bool,
    #[serde(default)]
    category: PackageCategory,
}

impl TryFrom<PackageDetailsRecord> for PackageDetails {
    type Error = DomainError;

    fn try_from(record: PackageDetailsRecord) -> DomainResult<Self> {
        Ok(Self::new(
            record.weight_kg,
            record.length_cm,
            record.width_cm,
            record.height_cm,
            record.value,
        )?
        .with_description(record.description)
        .with_fragile(record.fragile)
        .with_category(record.category))
    }
}

impl fmt::Display for PackageDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Package({}kg {}x{}x{}cm value={} {})",
            self.weight_kg, self.length_cm, self.width_cm, self.height_cm, self.value, self.category
        )?;
        if self.fragile {
            write!(f, " fragile")?;
        }
        Ok(())
    }
}
