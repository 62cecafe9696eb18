//! Factor registries
//!
//! Each registry is an ordered table keyed by `kind`. Tables are built once and
//! never mutated; swapping factors means building a new [`FactorTables`] (for
//! example from a TOML file) and handing it to the calculators.

use crate::error::{NetZeroError, Result};
use crate::models::{ActivityFactor, SoilFactor, VegetationFactor};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// A record that can live in a [`Registry`]
pub trait RegistryRecord {
    fn kind(&self) -> &str;
}

impl RegistryRecord for ActivityFactor {
    fn kind(&self) -> &str {
        &self.kind
    }
}

impl RegistryRecord for VegetationFactor {
    fn kind(&self) -> &str {
        &self.kind
    }
}

impl RegistryRecord for SoilFactor {
    fn kind(&self) -> &str {
        &self.kind
    }
}

/// Ordered, read-only table of records with unique kinds
#[derive(Debug, Clone)]
pub struct Registry<T> {
    name: &'static str,
    records: Vec<T>,
}

impl<T: RegistryRecord> Registry<T> {
    /// Build a registry, rejecting duplicate kinds
    pub fn new(name: &'static str, records: Vec<T>) -> Result<Self> {
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.kind()) {
                return Err(NetZeroError::DuplicateKind {
                    registry: name.to_string(),
                    kind: record.kind().to_string(),
                });
            }
        }
        Ok(Self { name, records })
    }

    /// Look up a record by exact kind
    pub fn get(&self, kind: &str) -> Result<&T> {
        self.find(kind).ok_or_else(|| NetZeroError::UnknownKind {
            registry: self.name.to_string(),
            kind: kind.to_string(),
        })
    }

    pub fn find(&self, kind: &str) -> Option<&T> {
        self.records.iter().find(|record| record.kind() == kind)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.find(kind).is_some()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.iter()
    }

    pub fn kinds(&self) -> Vec<&str> {
        self.records.iter().map(RegistryRecord::kind).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// All factor tables used by the calculators
#[derive(Debug, Clone)]
pub struct FactorTables {
    pub activities: Registry<ActivityFactor>,
    pub sinks: Registry<ActivityFactor>,
    pub vegetation: Registry<VegetationFactor>,
    pub soils: Registry<SoilFactor>,
}

impl Default for FactorTables {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FactorTables {
    /// Standard factor tables shipped with NetZero
    pub fn builtin() -> Self {
        Self {
            activities: Registry { name: "activity", records: builtin_activities() },
            sinks: Registry { name: "sink", records: builtin_sinks() },
            vegetation: Registry { name: "vegetation", records: builtin_vegetation() },
            soils: Registry { name: "soil", records: builtin_soils() },
        }
    }

    /// Parse tables from TOML; sections that are absent keep the built-in table
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: FactorFile = toml::from_str(content).map_err(|e| NetZeroError::ConfigInvalid {
            key: "factors_file".to_string(),
            reason: format!("Failed to parse TOML: {}", e),
        })?;

        let builtin = Self::builtin();
        Ok(Self {
            activities: match file.activity {
                Some(records) => Registry::new("activity", records)?,
                None => builtin.activities,
            },
            sinks: match file.sink {
                Some(records) => Registry::new("sink", records)?,
                None => builtin.sinks,
            },
            vegetation: match file.vegetation {
                Some(records) => Registry::new("vegetation", records)?,
                None => builtin.vegetation,
            },
            soils: match file.soil {
                Some(records) => Registry::new("soil", records)?,
                None => builtin.soils,
            },
        })
    }

    /// Load tables from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| NetZeroError::ConfigInvalid {
                key: "factors_file".to_string(),
                reason: format!("Failed to read {}: {}", path.as_ref().display(), e),
            })?;

        let tables = Self::from_toml_str(&content)?;
        tracing::info!(
            path = %path.as_ref().display(),
            activities = tables.activities.len(),
            sinks = tables.sinks.len(),
            vegetation = tables.vegetation.len(),
            soils = tables.soils.len(),
            "Loaded factor tables"
        );
        Ok(tables)
    }
}

#[derive(Debug, Deserialize)]
struct FactorFile {
    activity: Option<Vec<ActivityFactor>>,
    sink: Option<Vec<ActivityFactor>>,
    vegetation: Option<Vec<VegetationFactor>>,
    soil: Option<Vec<SoilFactor>>,
}

fn activity(kind: &str, label: &str, factor: f64, unit: &str) -> ActivityFactor {
    ActivityFactor {
        kind: kind.to_string(),
        label: label.to_string(),
        factor,
        unit: unit.to_string(),
    }
}

fn builtin_activities() -> Vec<ActivityFactor> {
    vec![
        activity("diesel", "Diesel Fuel", 2.65, "litres"),
        activity("petrol", "Petrol", 2.31, "litres"),
        activity("electricity", "Electricity", 0.82, "kWh"),
        activity("coal", "Coal Combustion", 2.42, "tonnes"),
        activity("transport", "Vehicle Transport", 0.166, "km"),
        activity("equipment", "Heavy Equipment", 3.15, "hours"),
    ]
}

fn builtin_sinks() -> Vec<ActivityFactor> {
    vec![
        activity("tree-plantation", "Tree Plantation", 2.5, "trees"),
        activity("solar-installation", "Solar Installation", 2.4, "kW"),
        activity("methane-capture", "Methane Capture", 25.0, "m3"),
        activity("reclamation", "Land Reclamation", 1.8, "m2"),
    ]
}

fn vegetation(kind: &str, label: &str, rate: f64, description: &str) -> VegetationFactor {
    VegetationFactor {
        kind: kind.to_string(),
        label: label.to_string(),
        rate,
        description: description.to_string(),
    }
}

fn builtin_vegetation() -> Vec<VegetationFactor> {
    vec![
        vegetation("mixed-forest", "Mixed Forest", 12.5, "Native mixed-species woodland"),
        vegetation("eucalyptus", "Eucalyptus Plantation", 15.2, "Fast-growing commercial plantation"),
        vegetation("bamboo", "Bamboo Grove", 18.7, "High-yield bamboo on reclaimed slopes"),
        vegetation("teak", "Teak Plantation", 11.8, "Long-rotation hardwood plantation"),
        vegetation("mangrove", "Mangrove Forest", 22.3, "Coastal wetland forest"),
        vegetation("grassland", "Restored Grassland", 3.2, "Grass cover on overburden dumps"),
        vegetation("dense-forest", "Dense Forest", 16.0, "Closed-canopy forest"),
        vegetation("mine-reclamation", "Mine Reclamation", 5.2, "Mixed planting on reclaimed pit land"),
    ]
}

fn soil(kind: &str, label: &str, multiplier: f64) -> SoilFactor {
    SoilFactor {
        kind: kind.to_string(),
        label: label.to_string(),
        multiplier,
    }
}

fn builtin_soils() -> Vec<SoilFactor> {
    vec![
        soil("clay", "Clay Soil", 1.1),
        soil("loam", "Loam Soil", 1.0),
        soil("sandy", "Sandy Soil", 0.8),
        soil("degraded", "Degraded Soil", 0.7),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_have_unique_kinds() {
        let tables = FactorTables::builtin();
        assert!(Registry::new("activity", tables.activities.records.clone()).is_ok());
        assert!(Registry::new("sink", tables.sinks.records.clone()).is_ok());
        assert!(Registry::new("vegetation", tables.vegetation.records.clone()).is_ok());
        assert!(Registry::new("soil", tables.soils.records.clone()).is_ok());
    }

    #[test]
    fn test_lookup_by_kind() {
        let tables = FactorTables::builtin();
        let diesel = tables.activities.get("diesel").unwrap();
        assert_eq!(diesel.factor, 2.65);
        assert_eq!(diesel.unit, "litres");

        assert_eq!(tables.vegetation.get("mangrove").unwrap().rate, 22.3);
        assert_eq!(tables.soils.get("degraded").unwrap().multiplier, 0.7);
    }

    #[test]
    fn test_unknown_kind() {
        let tables = FactorTables::builtin();
        let err = tables.activities.get("Diesel").unwrap_err();
        match err {
            NetZeroError::UnknownKind { registry, kind } => {
                assert_eq!(registry, "activity");
                assert_eq!(kind, "Diesel");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_kind_rejected() {
        let records = vec![
            activity("diesel", "Diesel", 2.65, "litres"),
            activity("diesel", "Diesel again", 2.7, "litres"),
        ];
        assert!(matches!(
            Registry::new("activity", records),
            Err(NetZeroError::DuplicateKind { .. })
        ));
    }

    #[test]
    fn test_preserves_declaration_order() {
        let tables = FactorTables::builtin();
        assert_eq!(
            tables.activities.kinds(),
            vec!["diesel", "petrol", "electricity", "coal", "transport", "equipment"]
        );
    }

    #[test]
    fn test_from_toml_overrides_one_section() {
        let tables = FactorTables::from_toml_str(
            r#"
[[activity]]
kind = "lng"
label = "Liquefied Natural Gas"
factor = 1.55
unit = "kg"
"#,
        )
        .unwrap();

        assert_eq!(tables.activities.len(), 1);
        assert!(tables.activities.contains("lng"));
        assert!(!tables.activities.contains("diesel"));
        // Untouched sections keep the built-in values
        assert!(tables.vegetation.contains("mangrove"));
    }

    #[test]
    fn test_from_toml_rejects_duplicates() {
        let result = FactorTables::from_toml_str(
            r#"
[[soil]]
kind = "clay"
label = "Clay"
multiplier = 1.1

[[soil]]
kind = "clay"
label = "Heavy clay"
multiplier = 1.2
"#,
        );
        assert!(matches!(result, Err(NetZeroError::DuplicateKind { .. })));
    }
}
