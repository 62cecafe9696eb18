//! Land-area sequestration
//!
//! Offsets for afforestation and reclamation projects are computed from the
//! planted area, the vegetation's sequestration rate, an optional soil
//! multiplier and the project horizon:
//!
//! `total = area_in_hectares * rate * soil_multiplier * duration_years`
//!
//! The annual figure is always derived from the total (`total / duration_years`)
//! so every caller sees the same number.

use crate::error::{NetZeroError, Result};
use crate::models::Co2e;
use crate::registry::FactorTables;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const HECTARES_PER_ACRE: f64 = 0.404686;
pub const HECTARES_PER_SQKM: f64 = 100.0;

/// Unit of a land area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaUnit {
    Hectares,
    Acres,
    Sqkm,
}

impl AreaUnit {
    /// Multiplier converting one unit into hectares
    pub fn hectares_factor(&self) -> f64 {
        match self {
            AreaUnit::Hectares => 1.0,
            AreaUnit::Acres => HECTARES_PER_ACRE,
            AreaUnit::Sqkm => HECTARES_PER_SQKM,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AreaUnit::Hectares => "hectares",
            AreaUnit::Acres => "acres",
            AreaUnit::Sqkm => "sqkm",
        }
    }
}

impl fmt::Display for AreaUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AreaUnit {
    type Err = NetZeroError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "hectares" | "hectare" | "ha" => Ok(AreaUnit::Hectares),
            "acres" | "acre" | "ac" => Ok(AreaUnit::Acres),
            "sqkm" | "km2" | "km²" => Ok(AreaUnit::Sqkm),
            _ => Err(NetZeroError::InvalidAreaUnit { unit: s.to_string() }),
        }
    }
}

/// Convert an area to hectares
pub fn to_hectares(area: f64, unit: AreaUnit) -> f64 {
    area * unit.hectares_factor()
}

/// Parse a project duration, accepting only positive whole years
pub fn parse_duration(value: &str) -> Result<u32> {
    match value.trim().parse::<u32>() {
        Ok(years) if years > 0 => Ok(years),
        _ => Err(NetZeroError::InvalidDuration { value: value.to_string() }),
    }
}

/// Share of a project total attributable to a single year
pub fn annual_share(total: Co2e, duration_years: u32) -> Co2e {
    if duration_years == 0 {
        return Co2e::ZERO;
    }
    Co2e::from_kg(total.kg() / f64::from(duration_years))
}

/// Inputs for a land-area offset calculation
#[derive(Debug, Clone, PartialEq)]
pub struct LandAreaInput {
    pub vegetation_kind: String,
    pub area: f64,
    pub area_unit: AreaUnit,
    pub duration_years: u32,
    pub soil_kind: Option<String>,
}

impl LandAreaInput {
    pub fn new(
        vegetation_kind: impl Into<String>,
        area: f64,
        area_unit: AreaUnit,
        duration_years: u32,
    ) -> Self {
        Self {
            vegetation_kind: vegetation_kind.into(),
            area,
            area_unit,
            duration_years,
            soil_kind: None,
        }
    }

    pub fn with_soil(mut self, soil_kind: impl Into<String>) -> Self {
        self.soil_kind = Some(soil_kind.into());
        self
    }
}

/// Result of a land-area offset calculation
#[derive(Debug, Clone, PartialEq)]
pub struct LandAreaOffset {
    pub area_hectares: f64,
    /// tonnes CO2e per hectare per year, after the soil multiplier
    pub effective_rate: f64,
    pub duration_years: u32,
    /// Offset over the whole project horizon
    pub total: Co2e,
}

impl LandAreaOffset {
    pub fn annual(&self) -> Co2e {
        annual_share(self.total, self.duration_years)
    }
}

/// Compute the total offset of a land-area project
pub fn calculate_land_area_offset(
    tables: &FactorTables,
    input: &LandAreaInput,
) -> Result<LandAreaOffset> {
    let vegetation = tables.vegetation.get(&input.vegetation_kind)?;

    if !input.area.is_finite() || input.area < 0.0 {
        return Err(NetZeroError::InvalidQuantity {
            field: "area".to_string(),
            value: input.area,
        });
    }

    if input.duration_years == 0 {
        return Err(NetZeroError::InvalidDuration {
            value: input.duration_years.to_string(),
        });
    }

    let soil_multiplier = match &input.soil_kind {
        Some(kind) => tables.soils.get(kind)?.multiplier,
        None => 1.0,
    };

    let area_hectares = to_hectares(input.area, input.area_unit);
    let effective_rate = vegetation.rate * soil_multiplier;
    let total_tonnes = area_hectares * effective_rate * f64::from(input.duration_years);

    Ok(LandAreaOffset {
        area_hectares,
        effective_rate,
        duration_years: input.duration_years,
        total: Co2e::from_tonnes(total_tonnes),
    })
}
