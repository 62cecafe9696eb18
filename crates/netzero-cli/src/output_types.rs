use netzero_core::models::{
    ActivityFactor, CarbonSinkEntry, Co2e, EmissionEntry, SoilFactor, StrategyEntry,
    VegetationFactor,
};
use netzero_core::{format_co2e, LandAreaOffset};
use netzero_geo::CoordinateMatch;
use serde::Serialize;
use std::collections::BTreeMap;
use tabled::Tabled;

fn trim_number(value: f64) -> String {
    let text = format!("{:.2}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Row of the activity or sink factor table
#[derive(Debug, Serialize, Tabled)]
pub struct FactorRow {
    #[tabled(rename = "Kind")]
    pub kind: String,
    #[tabled(rename = "Label")]
    pub label: String,
    #[tabled(rename = "kg CO2e / unit")]
    pub factor: f64,
    #[tabled(rename = "Unit")]
    pub unit: String,
}

impl From<&ActivityFactor> for FactorRow {
    fn from(factor: &ActivityFactor) -> Self {
        Self {
            kind: factor.kind.clone(),
            label: factor.label.clone(),
            factor: factor.factor,
            unit: factor.unit.clone(),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct VegetationRow {
    #[tabled(rename = "Kind")]
    pub kind: String,
    #[tabled(rename = "Label")]
    pub label: String,
    #[tabled(rename = "t CO2e / ha / yr")]
    pub rate: f64,
    #[tabled(rename = "Description")]
    pub description: String,
}

impl From<&VegetationFactor> for VegetationRow {
    fn from(factor: &VegetationFactor) -> Self {
        Self {
            kind: factor.kind.clone(),
            label: factor.label.clone(),
            rate: factor.rate,
            description: factor.description.clone(),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct SoilRow {
    #[tabled(rename = "Kind")]
    pub kind: String,
    #[tabled(rename = "Label")]
    pub label: String,
    #[tabled(rename = "Multiplier")]
    pub multiplier: f64,
}

impl From<&SoilFactor> for SoilRow {
    fn from(factor: &SoilFactor) -> Self {
        Self {
            kind: factor.kind.clone(),
            label: factor.label.clone(),
            multiplier: factor.multiplier,
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct EmissionRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Activity")]
    pub activity: String,
    #[tabled(rename = "Quantity")]
    pub quantity: String,
    #[tabled(rename = "CO2e")]
    pub co2e: String,
}

impl From<&EmissionEntry> for EmissionRow {
    fn from(entry: &EmissionEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            date: entry.date.to_string(),
            activity: entry.activity_kind.clone(),
            quantity: format!("{} {}", trim_number(entry.quantity), entry.unit),
            co2e: format_co2e(entry.co2e),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct SinkRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Kind")]
    pub kind: String,
    #[tabled(rename = "Quantity")]
    pub quantity: String,
    #[tabled(rename = "CO2e")]
    pub co2e: String,
    #[tabled(rename = "Per year")]
    pub annual: String,
}

impl From<&CarbonSinkEntry> for SinkRow {
    fn from(entry: &CarbonSinkEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            date: entry.date.to_string(),
            kind: entry.sink_kind.clone(),
            quantity: format!("{} {}", trim_number(entry.quantity), entry.unit),
            co2e: format_co2e(entry.co2e),
            annual: entry
                .annual_offset()
                .map(format_co2e)
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct StrategyRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Progress")]
    pub progress: String,
    #[tabled(rename = "Start")]
    pub start: String,
    #[tabled(rename = "Cost")]
    pub cost: String,
}

impl From<&StrategyEntry> for StrategyRow {
    fn from(entry: &StrategyEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            title: entry.title.clone(),
            category: entry.category.clone(),
            status: entry.status.to_string(),
            progress: format!(
                "{}% of {}%",
                trim_number(entry.current_reduction),
                trim_number(entry.target_reduction)
            ),
            start: entry.start_date.to_string(),
            cost: trim_number(entry.cost),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct ActivityShareRow {
    #[tabled(rename = "Activity")]
    pub activity: String,
    #[tabled(rename = "CO2e")]
    pub co2e: String,
    #[tabled(rename = "Share")]
    pub share: String,
}

impl ActivityShareRow {
    pub fn new(activity: String, co2e: Co2e, total: Co2e) -> Self {
        let share = if total.kg() > 0.0 {
            co2e.kg() / total.kg() * 100.0
        } else {
            0.0
        };
        Self {
            activity,
            co2e: format_co2e(co2e),
            share: format!("{:.1}%", share),
        }
    }
}

/// Output for `sink land-area`
#[derive(Debug, Serialize)]
pub struct LandAreaOutput {
    pub entry: CarbonSinkEntry,
    pub area_hectares: f64,
    pub effective_rate: f64,
    pub annual_offset: Co2e,
    pub total_offset: Co2e,
}

impl LandAreaOutput {
    pub fn new(entry: CarbonSinkEntry, offset: &LandAreaOffset) -> Self {
        Self {
            entry,
            area_hectares: offset.area_hectares,
            effective_rate: offset.effective_rate,
            annual_offset: offset.annual(),
            total_offset: offset.total,
        }
    }
}

/// Output for `resolve`
#[derive(Debug, Serialize)]
pub struct ResolveOutput {
    pub link: String,
    pub lat: f64,
    pub lng: f64,
    pub rule: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
}

impl ResolveOutput {
    pub fn new(link: &str, found: CoordinateMatch) -> Self {
        Self {
            link: link.to_string(),
            lat: found.coordinates.lat,
            lng: found.coordinates.lng,
            rule: found.rule,
            place: found.place,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub value: String,
    pub source: String,
}

/// Output for `status`
#[derive(Debug, Serialize)]
pub struct StatusOutput {
    pub storage: String,
    pub data_dir: String,
    pub seed_policy: String,
    pub emission_count: usize,
    pub sink_count: usize,
    pub strategy_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<BTreeMap<String, ConfigEntry>>,
}
