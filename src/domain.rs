//! Domain Types
//!
//! The inventory's sole entity and its creation/patch companions. Input
//! types validate themselves; the store only ever sees clean values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// A single inventory entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Beer {
    pub id: Uuid,
    pub brand: String,
    pub country: String,
    pub quantity: i64,
    pub style: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a beer
#[derive(Debug, Clone, Deserialize)]
pub struct NewBeer {
    pub brand: String,
    pub country: String,
    pub quantity: i64,
    pub style: String,
}

impl NewBeer {
    /// Trim text fields.
    pub fn normalized(mut self) -> Self {
        self.brand = self.brand.trim().to_string();
        self.country = self.country.trim().to_string();
        self.style = self.style.trim().to_string();
        self
    }

    /// Validation failures, one message per offending field. Call on a
    /// normalized value.
    pub fn check(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.brand.is_empty() {
            errors.push("Brand can't be blank".to_string());
        }
        if self.country.is_empty() {
            errors.push("Country can't be blank".to_string());
        }
        if self.style.is_empty() {
            errors.push("Style can't be blank".to_string());
        }
        if self.quantity < 0 {
            errors.push("Quantity must be greater than or equal to 0".to_string());
        }
        errors
    }

    /// Trim text fields and check every validation rule, collecting all
    /// failures rather than stopping at the first.
    pub fn validated(self) -> AppResult<Self> {
        let new = self.normalized();
        let errors = new.check();
        if errors.is_empty() {
            Ok(new)
        } else {
            Err(AppError::validation(errors))
        }
    }
}

/// Partial update; only present fields are applied
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BeerPatch {
    pub brand: Option<String>,
    pub country: Option<String>,
    pub quantity: Option<i64>,
    pub style: Option<String>,
}

impl BeerPatch {
    /// True when no field is present; an empty patch is accepted and only
    /// touches `updated_at`.
    pub fn is_empty(&self) -> bool {
        self.brand.is_none()
            && self.country.is_none()
            && self.quantity.is_none()
            && self.style.is_none()
    }

    /// Trim present text fields and check the same rules as creation.
    pub fn validated(mut self) -> AppResult<Self> {
        let mut errors = Vec::new();

        if let Some(brand) = self.brand.take() {
            let brand = brand.trim().to_string();
            if brand.is_empty() {
                errors.push("Brand can't be blank".to_string());
            }
            self.brand = Some(brand);
        }
        if let Some(country) = self.country.take() {
            let country = country.trim().to_string();
            if country.is_empty() {
                errors.push("Country can't be blank".to_string());
            }
            self.country = Some(country);
        }
        if let Some(style) = self.style.take() {
            let style = style.trim().to_string();
            if style.is_empty() {
                errors.push("Style can't be blank".to_string());
            }
            self.style = Some(style);
        }
        if let Some(quantity) = self.quantity {
            if quantity < 0 {
                errors.push("Quantity must be greater than or equal to 0".to_string());
            }
        }

        if errors.is_empty() {
            Ok(self)
        } else {
            Err(AppError::validation(errors))
        }
    }

    /// Apply present fields onto an existing beer. Timestamps are the
    /// store's responsibility.
    pub fn apply(&self, beer: &mut Beer) {
        if let Some(brand) = &self.brand {
            beer.brand = brand.clone();
        }
        if let Some(country) = &self.country {
            beer.country = country.clone();
        }
        if let Some(quantity) = self.quantity {
            beer.quantity = quantity;
        }
        if let Some(style) = &self.style {
            beer.style = style.clone();
        }
    }
}
