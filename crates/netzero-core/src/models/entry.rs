use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{Co2e, Coordinates};
use crate::calculator::validate_finite;
use crate::error::Result;
use crate::land_area::{annual_share, AreaUnit};

/// Unique identifier for a ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub String);

impl EntryId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A recorded greenhouse-gas-emitting activity.
///
/// `co2e` is fixed at creation from the factor table in effect at that time;
/// later factor changes never touch historical entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionEntry {
    pub id: EntryId,

    /// Activity date (serialized as YYYY-MM-DD)
    pub date: NaiveDate,

    #[serde(alias = "activityType")]
    pub activity_kind: String,

    pub quantity: f64,

    pub unit: String,

    pub co2e: Co2e,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub user_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mine_id: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl EmissionEntry {
    /// Every number must survive a JSON round trip
    pub fn ensure_finite(&self) -> Result<()> {
        validate_finite("quantity", self.quantity)?;
        validate_finite("co2e", self.co2e.kg())?;
        Ok(())
    }
}

/// Emission entry as submitted, before the ledger assigns `id` and `created_at`
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionDraft {
    pub date: NaiveDate,
    pub activity_kind: String,
    pub quantity: f64,
    pub unit: String,
    pub co2e: Co2e,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub user_id: String,
    pub mine_id: Option<String>,
}

impl EmissionDraft {
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_mine_id(mut self, mine_id: impl Into<String>) -> Self {
        self.mine_id = Some(mine_id.into());
        self
    }

    pub fn into_entry(self, id: EntryId, created_at: DateTime<Utc>) -> EmissionEntry {
        EmissionEntry {
            id,
            date: self.date,
            activity_kind: self.activity_kind,
            quantity: self.quantity,
            unit: self.unit,
            co2e: self.co2e,
            location: self.location,
            notes: self.notes,
            user_id: self.user_id,
            mine_id: self.mine_id,
            created_at,
        }
    }
}

/// Land-area project details attached to a sink entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandAreaDetails {
    pub vegetation_kind: String,

    /// Area in `area_unit`
    pub area: f64,

    pub area_unit: AreaUnit,

    pub duration_years: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil_kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

/// A recorded carbon-offsetting project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonSinkEntry {
    pub id: EntryId,

    pub date: NaiveDate,

    #[serde(alias = "sinkType")]
    pub sink_kind: String,

    pub quantity: f64,

    pub unit: String,

    pub co2e: Co2e,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "description")]
    pub notes: Option<String>,

    pub user_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mine_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub land_area: Option<LandAreaDetails>,

    pub created_at: DateTime<Utc>,
}

impl CarbonSinkEntry {
    pub fn ensure_finite(&self) -> Result<()> {
        validate_finite("quantity", self.quantity)?;
        validate_finite("co2e", self.co2e.kg())?;
        if let Some(details) = &self.land_area {
            validate_finite("area", details.area)?;
            if let Some(coordinates) = &details.coordinates {
                validate_finite("lat", coordinates.lat)?;
                validate_finite("lng", coordinates.lng)?;
            }
        }
        Ok(())
    }

    /// Yearly offset of a land-area project, derived from the stored total
    pub fn annual_offset(&self) -> Option<Co2e> {
        self.land_area
            .as_ref()
            .map(|details| annual_share(self.co2e, details.duration_years))
    }
}

/// Sink entry as submitted, before the ledger assigns `id` and `created_at`
#[derive(Debug, Clone, PartialEq)]
pub struct CarbonSinkDraft {
    pub date: NaiveDate,
    pub sink_kind: String,
    pub quantity: f64,
    pub unit: String,
    pub co2e: Co2e,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub user_id: String,
    pub mine_id: Option<String>,
    pub land_area: Option<LandAreaDetails>,
}

impl CarbonSinkDraft {
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_mine_id(mut self, mine_id: impl Into<String>) -> Self {
        self.mine_id = Some(mine_id.into());
        self
    }

    /// Attach resolved coordinates to the land-area details, if any
    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        if let Some(details) = self.land_area.as_mut() {
            details.coordinates = Some(coordinates);
        }
        self
    }

    pub fn into_entry(self, id: EntryId, created_at: DateTime<Utc>) -> CarbonSinkEntry {
        CarbonSinkEntry {
            id,
            date: self.date,
            sink_kind: self.sink_kind,
            quantity: self.quantity,
            unit: self.unit,
            co2e: self.co2e,
            location: self.location,
            notes: self.notes,
            user_id: self.user_id,
            mine_id: self.mine_id,
            land_area: self.land_area,
            created_at,
        }
    }
}
