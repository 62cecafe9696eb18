use serde::{Deserialize, Serialize};

/// Conversion factor for an emitting activity or an offsetting sink.
///
/// `factor` is kilograms of CO2e per `unit` of activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityFactor {
    /// Lookup key (e.g. "diesel")
    pub kind: String,

    /// Human-readable name (e.g. "Diesel Fuel")
    pub label: String,

    /// kg CO2e per unit
    pub factor: f64,

    /// Unit of the raw quantity (e.g. "litres")
    pub unit: String,
}

/// Sequestration rate for a vegetation type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VegetationFactor {
    pub kind: String,

    pub label: String,

    /// tonnes CO2e absorbed per hectare per year
    pub rate: f64,

    #[serde(default)]
    pub description: String,
}

/// Soil condition multiplier applied to a vegetation rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilFactor {
    pub kind: String,
    pub label: String,
    pub multiplier: f64,
}
