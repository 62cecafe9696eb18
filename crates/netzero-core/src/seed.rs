//! Seed datasets
//!
//! Used when a collection has never been stored, or when the stored value
//! cannot be parsed. CO2e values are in kilograms and equal quantity times
//! the built-in factor, like any entry recorded through the calculator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{NetZeroError, Result};
use crate::metrics::LedgerSnapshot;
use crate::models::{CarbonSinkEntry, EmissionEntry, StrategyEntry};

/// What an absent or unreadable collection falls back to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedPolicy {
    /// Fall back to the demo dataset below
    #[default]
    Demo,
    /// Fall back to an empty collection
    Empty,
}

impl SeedPolicy {
    pub fn emissions(&self) -> Vec<EmissionEntry> {
        match self {
            SeedPolicy::Demo => seed_emissions(),
            SeedPolicy::Empty => Vec::new(),
        }
    }

    pub fn sinks(&self) -> Vec<CarbonSinkEntry> {
        match self {
            SeedPolicy::Demo => seed_sinks(),
            SeedPolicy::Empty => Vec::new(),
        }
    }

    pub fn strategies(&self) -> Vec<StrategyEntry> {
        match self {
            SeedPolicy::Demo => seed_strategies(),
            SeedPolicy::Empty => Vec::new(),
        }
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            emissions: self.emissions(),
            sinks: self.sinks(),
            strategies: self.strategies(),
        }
    }
}

impl fmt::Display for SeedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedPolicy::Demo => f.write_str("demo"),
            SeedPolicy::Empty => f.write_str("empty"),
        }
    }
}

impl FromStr for SeedPolicy {
    type Err = NetZeroError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "demo" | "seed" => Ok(SeedPolicy::Demo),
            "empty" | "none" => Ok(SeedPolicy::Empty),
            _ => Err(NetZeroError::ConfigInvalid {
                key: "seed_policy".to_string(),
                reason: format!("Invalid seed policy: {}. Use demo or empty", s),
            }),
        }
    }
}

const SEED_EMISSIONS: &str = r#"[
  {
    "id": "1",
    "date": "2024-01-15",
    "activityKind": "diesel",
    "quantity": 5000,
    "unit": "litres",
    "co2e": 13250,
    "location": "Block A, Pit 2",
    "notes": "Heavy equipment operation",
    "userId": "1",
    "mineId": "MINE001",
    "createdAt": "2024-01-15T10:00:00Z"
  },
  {
    "id": "2",
    "date": "2024-01-14",
    "activityKind": "electricity",
    "quantity": 8500,
    "unit": "kWh",
    "co2e": 6970,
    "location": "Processing Plant",
    "notes": "Daily operations",
    "userId": "1",
    "mineId": "MINE001",
    "createdAt": "2024-01-14T10:00:00Z"
  },
  {
    "id": "3",
    "date": "2024-01-13",
    "activityKind": "transport",
    "quantity": 2500,
    "unit": "km",
    "co2e": 415,
    "location": "Transport Fleet",
    "notes": "Coal transportation",
    "userId": "1",
    "mineId": "MINE001",
    "createdAt": "2024-01-13T10:00:00Z"
  }
]"#;

const SEED_SINKS: &str = r#"[
  {
    "id": "1",
    "date": "2024-01-15",
    "sinkKind": "tree-plantation",
    "quantity": 1000,
    "unit": "trees",
    "co2e": 2500,
    "location": "Mine Reclamation Area",
    "notes": "Native species plantation",
    "userId": "1",
    "mineId": "MINE001",
    "createdAt": "2024-01-15T10:00:00Z"
  },
  {
    "id": "2",
    "date": "2024-01-10",
    "sinkKind": "solar-installation",
    "quantity": 500,
    "unit": "kW",
    "co2e": 1200,
    "location": "Mine Office Complex",
    "notes": "Solar panel installation",
    "userId": "1",
    "mineId": "MINE001",
    "createdAt": "2024-01-10T10:00:00Z"
  }
]"#;

const SEED_STRATEGIES: &str = r#"[
  {
    "id": "1",
    "title": "Solar Power Integration",
    "description": "Install solar panels across mine facilities",
    "category": "Renewable Energy",
    "status": "in-progress",
    "targetReduction": 15.0,
    "currentReduction": 8.5,
    "startDate": "2024-01-01",
    "endDate": "2024-06-30",
    "cost": 2500000,
    "roi": 185,
    "userId": "1",
    "mineId": "MINE001",
    "createdAt": "2024-01-01T10:00:00Z"
  },
  {
    "id": "2",
    "title": "Electric Vehicle Fleet",
    "description": "Replace diesel vehicles with electric alternatives",
    "category": "Transport",
    "status": "planned",
    "targetReduction": 12.0,
    "currentReduction": 0,
    "startDate": "2024-03-01",
    "endDate": "2024-12-31",
    "cost": 1800000,
    "roi": 142,
    "userId": "1",
    "mineId": "MINE001",
    "createdAt": "2024-01-01T10:00:00Z"
  }
]"#;

pub fn seed_emissions() -> Vec<EmissionEntry> {
    parse_seed("emissions", SEED_EMISSIONS)
}

pub fn seed_sinks() -> Vec<CarbonSinkEntry> {
    parse_seed("carbon_sinks", SEED_SINKS)
}

pub fn seed_strategies() -> Vec<StrategyEntry> {
    parse_seed("strategies", SEED_STRATEGIES)
}

fn parse_seed<T: serde::de::DeserializeOwned>(name: &str, raw: &str) -> Vec<T> {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::error!(seed = name, error = %e, "Seed dataset failed to parse");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::LedgerMetrics;
    use crate::models::StrategyStatus;
    use crate::registry::FactorTables;

    #[test]
    fn test_seeds_parse() {
        assert_eq!(seed_emissions().len(), 3);
        assert_eq!(seed_sinks().len(), 2);
        assert_eq!(seed_strategies().len(), 2);
    }

    #[test]
    fn test_seed_is_newest_first() {
        let emissions = seed_emissions();
        assert!(emissions.windows(2).all(|w| w[0].date >= w[1].date));
    }

    #[test]
    fn test_seed_metrics() {
        let metrics = LedgerMetrics::compute(&SeedPolicy::Demo.snapshot());
        assert!((metrics.total_emissions.tonnes() - 20.635).abs() < 1e-9);
        assert!((metrics.total_sinks.tonnes() - 3.7).abs() < 1e-9);
        assert_eq!(metrics.completed_strategies, 0);
        assert_eq!(seed_strategies()[0].status, StrategyStatus::InProgress);
    }

    #[test]
    fn test_seed_matches_builtin_factors() {
        let tables = FactorTables::builtin();
        for entry in seed_emissions() {
            let factor = tables.activities.get(&entry.activity_kind).unwrap();
            assert!(
                (entry.co2e.kg() - entry.quantity * factor.factor).abs() < 1e-6,
                "{}",
                entry.activity_kind
            );
            assert_eq!(entry.unit, factor.unit);
        }
        for entry in seed_sinks() {
            let factor = tables.sinks.get(&entry.sink_kind).unwrap();
            assert!((entry.co2e.kg() - entry.quantity * factor.factor).abs() < 1e-6);
        }
    }

    #[test]
    fn test_empty_policy() {
        assert!(SeedPolicy::Empty.emissions().is_empty());
        assert!(SeedPolicy::Empty.strategies().is_empty());
        assert_eq!(SeedPolicy::Demo.sinks().len(), 2);
        assert_eq!("EMPTY".parse::<SeedPolicy>().unwrap(), SeedPolicy::Empty);
        assert!("random".parse::<SeedPolicy>().is_err());
    }
}
