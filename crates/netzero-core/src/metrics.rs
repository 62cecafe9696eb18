//! Derived ledger metrics
//!
//! Pure functions over the current collections. Nothing here is cached; the
//! ledger recomputes on every query.

use serde::{Deserialize, Serialize};

use crate::models::{CarbonSinkEntry, Co2e, EmissionEntry, StrategyEntry, StrategyStatus};

pub const MAX_SUSTAINABILITY_SCORE: f64 = 10.0;

/// Point-in-time copy of the three ledger collections, newest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub emissions: Vec<EmissionEntry>,
    pub sinks: Vec<CarbonSinkEntry>,
    pub strategies: Vec<StrategyEntry>,
}

/// Aggregate figures shown on dashboards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerMetrics {
    pub total_emissions: Co2e,
    pub total_sinks: Co2e,
    /// Negative when the operation is net carbon-negative
    pub net_emissions: Co2e,
    pub reduction_percentage: f64,
    pub sustainability_score: f64,
    pub completed_strategies: usize,
    pub emission_count: usize,
    pub sink_count: usize,
    pub strategy_count: usize,
}

impl LedgerMetrics {
    pub fn compute(snapshot: &LedgerSnapshot) -> Self {
        let LedgerSnapshot {
            emissions,
            sinks,
            strategies,
        } = snapshot;

        let total_emissions = total_emissions(emissions);
        let total_sinks = total_sinks(sinks);
        let net_emissions = total_emissions - total_sinks;
        let reduction_percentage = reduction_percentage(total_emissions, total_sinks);
        let completed_strategies = completed_strategy_count(strategies);

        Self {
            total_emissions,
            total_sinks,
            net_emissions,
            reduction_percentage,
            sustainability_score: sustainability_score(
                reduction_percentage,
                net_emissions,
                total_emissions,
                completed_strategies,
            ),
            completed_strategies,
            emission_count: emissions.len(),
            sink_count: sinks.len(),
            strategy_count: strategies.len(),
        }
    }
}

pub fn total_emissions(emissions: &[EmissionEntry]) -> Co2e {
    emissions.iter().map(|e| e.co2e).sum()
}

pub fn total_sinks(sinks: &[CarbonSinkEntry]) -> Co2e {
    sinks.iter().map(|s| s.co2e).sum()
}

/// Sinks as a percentage of emissions; 0 when nothing has been emitted
pub fn reduction_percentage(total_emissions: Co2e, total_sinks: Co2e) -> f64 {
    if total_emissions.kg() == 0.0 {
        return 0.0;
    }
    total_sinks.kg() / total_emissions.kg() * 100.0
}

pub fn completed_strategy_count(strategies: &[StrategyEntry]) -> usize {
    strategies.iter().filter(|s| s.status == StrategyStatus::Completed).count()
}

/// Dashboard sustainability score in `[0, 10]`.
///
/// `reduction/10 + 5 (if net < half of emissions) + 2 per completed strategy`,
/// clamped. The terms are not on a common scale and the score saturates at
/// 10 quickly (e.g. three completed strategies and one bonus already reach it).
pub fn sustainability_score(
    reduction_percentage: f64,
    net_emissions: Co2e,
    total_emissions: Co2e,
    completed_strategies: usize,
) -> f64 {
    let net_bonus = if net_emissions.kg() < total_emissions.kg() * 0.5 { 5.0 } else { 0.0 };
    let raw = reduction_percentage / 10.0 + net_bonus + completed_strategies as f64 * 2.0;
    raw.clamp(0.0, MAX_SUSTAINABILITY_SCORE)
}

/// Emission totals grouped by activity kind, largest first
pub fn emissions_by_activity(emissions: &[EmissionEntry]) -> Vec<(String, Co2e)> {
    let mut totals: Vec<(String, Co2e)> = Vec::new();
    for entry in emissions {
        match totals.iter_mut().find(|(kind, _)| *kind == entry.activity_kind) {
            Some((_, total)) => *total = *total + entry.co2e,
            None => totals.push((entry.activity_kind.clone(), entry.co2e)),
        }
    }
    totals.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    totals
}
