use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::EntryId;
use crate::calculator::validate_finite;
use crate::error::{NetZeroError, Result};

/// Lifecycle of a reduction strategy.
///
/// Ordered: `Planned < InProgress < Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyStatus {
    Planned,
    InProgress,
    Completed,
}

impl StrategyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyStatus::Planned => "planned",
            StrategyStatus::InProgress => "in-progress",
            StrategyStatus::Completed => "completed",
        }
    }

    /// Forward moves (and staying put) are allowed; backward moves need an explicit reopen
    pub fn can_move_to(&self, next: StrategyStatus) -> bool {
        next >= *self
    }
}

impl fmt::Display for StrategyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyStatus {
    type Err = NetZeroError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "planned" => Ok(StrategyStatus::Planned),
            "in-progress" | "inprogress" => Ok(StrategyStatus::InProgress),
            "completed" | "done" => Ok(StrategyStatus::Completed),
            _ => Err(NetZeroError::InvalidStatus { value: s.to_string() }),
        }
    }
}

/// A planned or running carbon-reduction initiative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyEntry {
    pub id: EntryId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: StrategyStatus,

    /// Target reduction, percent of baseline emissions
    pub target_reduction: f64,

    /// Reduction achieved so far, percent of baseline emissions
    pub current_reduction: f64,

    pub start_date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    pub cost: f64,

    /// Return on investment, percent
    pub roi: f64,

    pub user_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mine_id: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl StrategyEntry {
    /// Merge a patch into this strategy.
    ///
    /// Fails without modifying anything if the patch would move the status backwards.
    pub fn apply(&mut self, patch: StrategyPatch) -> Result<()> {
        if let Some(next) = patch.status {
            if !self.status.can_move_to(next) {
                return Err(NetZeroError::InvalidStatusTransition {
                    id: self.id.to_string(),
                    from: self.status.to_string(),
                    to: next.to_string(),
                });
            }
        }

        let StrategyPatch {
            title,
            description,
            category,
            status,
            target_reduction,
            current_reduction,
            start_date,
            end_date,
            cost,
            roi,
            mine_id,
        } = patch;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(target_reduction) = target_reduction {
            self.target_reduction = target_reduction;
        }
        if let Some(current_reduction) = current_reduction {
            self.current_reduction = current_reduction;
        }
        if let Some(start_date) = start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = end_date {
            self.end_date = end_date;
        }
        if let Some(cost) = cost {
            self.cost = cost;
        }
        if let Some(roi) = roi {
            self.roi = roi;
        }
        if let Some(mine_id) = mine_id {
            self.mine_id = mine_id;
        }

        Ok(())
    }

    /// Every number must survive a JSON round trip
    pub fn ensure_finite(&self) -> Result<()> {
        validate_finite("target_reduction", self.target_reduction)?;
        validate_finite("current_reduction", self.current_reduction)?;
        validate_finite("cost", self.cost)?;
        validate_finite("roi", self.roi)?;
        Ok(())
    }

    /// Progress towards the target reduction, percent (0 when there is no target)
    pub fn progress_percentage(&self) -> f64 {
        if self.target_reduction <= 0.0 {
            return 0.0;
        }
        (self.current_reduction / self.target_reduction * 100.0).clamp(0.0, 100.0)
    }
}

/// Strategy as submitted, before the ledger assigns `id` and `created_at`
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: StrategyStatus,
    pub target_reduction: f64,
    pub current_reduction: f64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub cost: f64,
    pub roi: f64,
    pub user_id: String,
    pub mine_id: Option<String>,
}

impl StrategyDraft {
    pub fn into_entry(self, id: EntryId, created_at: DateTime<Utc>) -> StrategyEntry {
        StrategyEntry {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            status: self.status,
            target_reduction: self.target_reduction,
            current_reduction: self.current_reduction,
            start_date: self.start_date,
            end_date: self.end_date,
            cost: self.cost,
            roi: self.roi,
            user_id: self.user_id,
            mine_id: self.mine_id,
            created_at,
        }
    }
}

/// Partial update for a strategy; `None` leaves a field untouched.
///
/// Optional fields on the entry take `Some(None)` to clear them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrategyPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: Option<StrategyStatus>,
    pub target_reduction: Option<f64>,
    pub current_reduction: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<Option<NaiveDate>>,
    pub cost: Option<f64>,
    pub roi: Option<f64>,
    pub mine_id: Option<Option<String>>,
}

impl StrategyPatch {
    pub fn status(status: StrategyStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
