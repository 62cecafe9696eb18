//! Emission and sink calculators
//!
//! Pure conversions from a raw quantity to CO2e over the factor tables. No
//! rounding happens here; see [`format_co2e`] for display.

use chrono::NaiveDate;

use crate::error::{NetZeroError, Result};
use crate::land_area::{calculate_land_area_offset, LandAreaInput, LandAreaOffset};
use crate::models::co2e::KG_PER_TONNE;
use crate::models::{CarbonSinkDraft, Co2e, EmissionDraft, LandAreaDetails};
use crate::registry::FactorTables;

/// Calculator bound to a set of factor tables
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    tables: FactorTables,
}

impl Calculator {
    pub fn new(tables: FactorTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &FactorTables {
        &self.tables
    }

    /// CO2e emitted by `quantity` units of an activity
    pub fn calculate_emission(&self, kind: &str, quantity: f64) -> Result<Co2e> {
        let factor = self.tables.activities.get(kind)?;
        let quantity = validate_quantity("quantity", quantity)?;
        Ok(Co2e::from_kg(quantity * factor.factor))
    }

    /// CO2e offset by `quantity` units of a sink
    pub fn calculate_sink(&self, kind: &str, quantity: f64) -> Result<Co2e> {
        let factor = self.tables.sinks.get(kind)?;
        let quantity = validate_quantity("quantity", quantity)?;
        Ok(Co2e::from_kg(quantity * factor.factor))
    }

    /// Total offset of a land-area project over its whole horizon
    pub fn calculate_land_area_offset(&self, input: &LandAreaInput) -> Result<LandAreaOffset> {
        calculate_land_area_offset(&self.tables, input)
    }

    /// Build an emission draft with CO2e and unit resolved from the activity table
    pub fn emission_draft(
        &self,
        kind: &str,
        quantity: f64,
        date: NaiveDate,
        user_id: impl Into<String>,
    ) -> Result<EmissionDraft> {
        let co2e = self.calculate_emission(kind, quantity)?;
        let factor = self.tables.activities.get(kind)?;

        Ok(EmissionDraft {
            date,
            activity_kind: factor.kind.clone(),
            quantity,
            unit: factor.unit.clone(),
            co2e,
            location: None,
            notes: None,
            user_id: user_id.into(),
            mine_id: None,
        })
    }

    /// Build a sink draft with CO2e and unit resolved from the sink table
    pub fn sink_draft(
        &self,
        kind: &str,
        quantity: f64,
        date: NaiveDate,
        user_id: impl Into<String>,
    ) -> Result<CarbonSinkDraft> {
        let co2e = self.calculate_sink(kind, quantity)?;
        let factor = self.tables.sinks.get(kind)?;

        Ok(CarbonSinkDraft {
            date,
            sink_kind: factor.kind.clone(),
            quantity,
            unit: factor.unit.clone(),
            co2e,
            location: None,
            notes: None,
            user_id: user_id.into(),
            mine_id: None,
            land_area: None,
        })
    }

    /// Build a sink draft for a land-area project.
    ///
    /// The stored CO2e is the total over the project horizon.
    pub fn land_area_draft(
        &self,
        input: &LandAreaInput,
        date: NaiveDate,
        user_id: impl Into<String>,
    ) -> Result<(CarbonSinkDraft, LandAreaOffset)> {
        let offset = self.calculate_land_area_offset(input)?;

        let draft = CarbonSinkDraft {
            date,
            sink_kind: input.vegetation_kind.clone(),
            quantity: input.area,
            unit: input.area_unit.to_string(),
            co2e: offset.total,
            location: None,
            notes: None,
            user_id: user_id.into(),
            mine_id: None,
            land_area: Some(LandAreaDetails {
                vegetation_kind: input.vegetation_kind.clone(),
                area: input.area,
                area_unit: input.area_unit,
                duration_years: input.duration_years,
                soil_kind: input.soil_kind.clone(),
                coordinates: None,
            }),
        };

        Ok((draft, offset))
    }
}

/// Reject non-finite or negative quantities
pub fn validate_quantity(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(NetZeroError::InvalidQuantity {
            field: field.to_string(),
            value,
        });
    }
    Ok(value)
}

/// Reject NaN and infinities; negative values are allowed
pub fn validate_finite(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(NetZeroError::InvalidQuantity {
            field: field.to_string(),
            value,
        });
    }
    Ok(value)
}

/// Format a CO2e value for display.
///
/// Magnitudes below one tonne are shown in kilograms, everything else in tonnes.
pub fn format_co2e(value: Co2e) -> String {
    if value.kg().abs() < KG_PER_TONNE {
        format!("{:.2} kg CO2e", value.kg())
    } else {
        format!("{:.2} tonnes CO2e", value.tonnes())
    }
}
