use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{ACRES_PER_HECTARE, MAX_ADDRESS_LEN, MAX_REGION_LEN};
use crate::error::{Result, ValuationError};

/// Primary key of a stored inquiry.
pub type InquiryId = i64;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LotSizeUnit {
    #[default]
    Acres,
    Hectares,
}

impl LotSizeUnit {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Acres => "acres",
            Self::Hectares => "hectares",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Acres => "Acres",
            Self::Hectares => "Hectares",
        }
    }

    /// Convert a lot size in this unit to acres.
    #[must_use]
    pub fn to_acres(&self, value: f64) -> f64 {
        match self {
            Self::Acres => value,
            Self::Hectares => value * ACRES_PER_HECTARE,
        }
    }
}

impl fmt::Display for LotSizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LotSizeUnit {
    type Err = ValuationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "acres" => Ok(Self::Acres),
            "hectares" => Ok(Self::Hectares),
            other => Err(ValuationError::InvalidInput(format!(
                "lot_size_unit must be 'acres' or 'hectares', got '{other}'"
            ))),
        }
    }
}

/// Facts about a parcel of land as submitted through the questionnaire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InquiryInput {
    pub address: String,
    pub lot_size: f64,
    #[serde(default)]
    pub lot_size_unit: LotSizeUnit,
    pub current_property: String,
    pub property_goals: String,
    pub investment_capacity: String,
    pub preferences_concerns: String,
    pub region: String,
}

impl InquiryInput {
    /// Check every field against the inquiry constraints.
    ///
    /// # Errors
    /// Returns `InvalidInput` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        require_text("address", &self.address, Some(MAX_ADDRESS_LEN))?;
        if !self.lot_size.is_finite() || self.lot_size <= 0.0 {
            return Err(ValuationError::InvalidInput(
                "lot_size must be a number greater than 0".to_owned(),
            ));
        }
        require_text("current_property", &self.current_property, None)?;
        require_text("property_goals", &self.property_goals, None)?;
        require_text("investment_capacity", &self.investment_capacity, None)?;
        require_text("preferences_concerns", &self.preferences_concerns, None)?;
        require_text("region", &self.region, Some(MAX_REGION_LEN))?;
        Ok(())
    }

    #[must_use]
    pub fn lot_size_acres(&self) -> f64 {
        self.lot_size_unit.to_acres(self.lot_size)
    }
}

fn require_text(field: &str, value: &str, max_len: Option<usize>) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ValuationError::InvalidInput(format!("{field} is required")));
    }
    if let Some(max) = max_len {
        if value.chars().count() > max {
            return Err(ValuationError::InvalidInput(format!(
                "{field} must be at most {max} characters"
            )));
        }
    }
    Ok(())
}

/// A persisted inquiry. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Inquiry {
    pub id: InquiryId,
    pub address: String,
    pub lot_size: f64,
    pub lot_size_unit: LotSizeUnit,
    pub current_property: String,
    pub property_goals: String,
    pub investment_capacity: String,
    pub preferences_concerns: String,
    pub region: String,
    pub created_at: DateTime<Utc>,
}

impl Inquiry {
    #[must_use]
    pub fn from_input(id: InquiryId, input: InquiryInput, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            address: input.address,
            lot_size: input.lot_size,
            lot_size_unit: input.lot_size_unit,
            current_property: input.current_property,
            property_goals: input.property_goals,
            investment_capacity: input.investment_capacity,
            preferences_concerns: input.preferences_concerns,
            region: input.region,
            created_at,
        }
    }

    /// The submitted fields, as sent to the AI request builder.
    #[must_use]
    pub fn to_input(&self) -> InquiryInput {
        InquiryInput {
            address: self.address.clone(),
            lot_size: self.lot_size,
            lot_size_unit: self.lot_size_unit,
            current_property: self.current_property.clone(),
            property_goals: self.property_goals.clone(),
            investment_capacity: self.investment_capacity.clone(),
            preferences_concerns: self.preferences_concerns.clone(),
            region: self.region.clone(),
        }
    }

    #[must_use]
    pub fn lot_size_acres(&self) -> f64 {
        self.lot_size_unit.to_acres(self.lot_size)
    }
}

impl fmt::Display for Inquiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Property Inquiry - {} ({} {})", self.address, self.lot_size, self.lot_size_unit)
    }
}
