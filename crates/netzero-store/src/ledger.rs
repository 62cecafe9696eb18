//! The ledger store
//!
//! Owns the emission, sink, and strategy collections (newest first). Every
//! mutation goes through one async mutex, writes the changed collection to the
//! key-value medium before it becomes visible, and then broadcasts a
//! [`LedgerEvent`] to subscribers. A mutation whose write fails leaves the
//! ledger unchanged, and so does one carrying a NaN or infinite number, since
//! JSON would store it as `null` and the collection would no longer load.

use chrono::{NaiveDate, Utc};
use netzero_core::error::{NetZeroError, Result};
use netzero_core::metrics::{LedgerMetrics, LedgerSnapshot};
use netzero_core::models::{
    CarbonSinkDraft, CarbonSinkEntry, EmissionDraft, EmissionEntry, EntryId, StrategyDraft,
    StrategyEntry, StrategyPatch, StrategyStatus,
};
use netzero_core::SeedPolicy;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};

use crate::ports::KeyValueStore;

const EVENT_CAPACITY: usize = 100;

/// One of the three persisted collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Collection {
    Emissions,
    Sinks,
    Strategies,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::Emissions,
        Collection::Sinks,
        Collection::Strategies,
    ];

    /// Key the collection is stored under
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Emissions => "coalmine_emissions",
            Collection::Sinks => "coalmine_carbon_sinks",
            Collection::Strategies => "coalmine_strategies",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Emissions => f.write_str("emissions"),
            Collection::Sinks => f.write_str("sinks"),
            Collection::Strategies => f.write_str("strategies"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeKind {
    Added,
    Updated,
    Deleted,
    /// The whole collection was re-read from the medium
    Reloaded,
}

/// Broadcast after every successful mutation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerEvent {
    pub collection: Collection,
    pub change: ChangeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntryId>,
}

impl LedgerEvent {
    fn entry(collection: Collection, change: ChangeKind, id: &EntryId) -> Self {
        Self {
            collection,
            change,
            id: Some(id.clone()),
        }
    }

    fn reloaded(collection: Collection) -> Self {
        Self {
            collection,
            change: ChangeKind::Reloaded,
            id: None,
        }
    }
}

pub struct LedgerStore {
    medium: Arc<dyn KeyValueStore>,
    seed_policy: SeedPolicy,
    state: Mutex<LedgerSnapshot>,
    events: broadcast::Sender<LedgerEvent>,
}

impl LedgerStore {
    /// Load the ledger from `medium`
    ///
    /// A collection that was never stored starts from the seed policy. One
    /// that cannot be parsed is logged and also replaced by the seed; it is
    /// not rewritten until the next mutation or `save()`.
    pub async fn open(medium: Arc<dyn KeyValueStore>, seed_policy: SeedPolicy) -> Result<Self> {
        let state = load_snapshot(medium.as_ref(), seed_policy).await?;
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        tracing::info!(
            seed_policy = %seed_policy,
            emissions = state.emissions.len(),
            sinks = state.sinks.len(),
            strategies = state.strategies.len(),
            "Ledger opened"
        );

        Ok(Self {
            medium,
            seed_policy,
            state: Mutex::new(state),
            events,
        })
    }

    pub fn seed_policy(&self) -> SeedPolicy {
        self.seed_policy
    }

    /// Receive an event for every successful mutation from now on
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.events.subscribe()
    }

    pub async fn add_emission(&self, draft: EmissionDraft) -> Result<EmissionEntry> {
        let entry = draft.into_entry(EntryId::generate(), Utc::now());
        entry.ensure_finite()?;
        let mut state = self.state.lock().await;

        let mut emissions = state.emissions.clone();
        emissions.insert(0, entry.clone());
        self.persist(Collection::Emissions, &emissions).await?;
        state.emissions = emissions;

        tracing::info!(id = %entry.id, activity = %entry.activity_kind, co2e_kg = entry.co2e.kg(), "Emission added");
        self.emit(LedgerEvent::entry(Collection::Emissions, ChangeKind::Added, &entry.id));
        Ok(entry)
    }

    pub async fn add_sink(&self, draft: CarbonSinkDraft) -> Result<CarbonSinkEntry> {
        let entry = draft.into_entry(EntryId::generate(), Utc::now());
        entry.ensure_finite()?;
        let mut state = self.state.lock().await;

        let mut sinks = state.sinks.clone();
        sinks.insert(0, entry.clone());
        self.persist(Collection::Sinks, &sinks).await?;
        state.sinks = sinks;

        tracing::info!(id = %entry.id, sink = %entry.sink_kind, co2e_kg = entry.co2e.kg(), "Carbon sink added");
        self.emit(LedgerEvent::entry(Collection::Sinks, ChangeKind::Added, &entry.id));
        Ok(entry)
    }

    pub async fn add_strategy(&self, draft: StrategyDraft) -> Result<StrategyEntry> {
        let entry = draft.into_entry(EntryId::generate(), Utc::now());
        entry.ensure_finite()?;
        let mut state = self.state.lock().await;

        let mut strategies = state.strategies.clone();
        strategies.insert(0, entry.clone());
        self.persist(Collection::Strategies, &strategies).await?;
        state.strategies = strategies;

        tracing::info!(id = %entry.id, title = %entry.title, status = %entry.status, "Strategy added");
        self.emit(LedgerEvent::entry(Collection::Strategies, ChangeKind::Added, &entry.id));
        Ok(entry)
    }

    /// Merge `patch` into a strategy; `None` when no strategy has that id
    ///
    /// Status may only move forward here; see [`LedgerStore::reopen_strategy`].
    pub async fn update_strategy(
        &self,
        id: &EntryId,
        patch: StrategyPatch,
    ) -> Result<Option<StrategyEntry>> {
        self.modify_strategy(id, |strategy| strategy.apply(patch))
            .await
    }

    /// Set a strategy's status in any direction, including backwards
    pub async fn reopen_strategy(
        &self,
        id: &EntryId,
        status: StrategyStatus,
    ) -> Result<Option<StrategyEntry>> {
        self.modify_strategy(id, |strategy| {
            tracing::info!(id = %strategy.id, from = %strategy.status, to = %status, "Reopening strategy");
            strategy.status = status;
            Ok(())
        })
        .await
    }

    async fn modify_strategy<F>(&self, id: &EntryId, change: F) -> Result<Option<StrategyEntry>>
    where
        F: FnOnce(&mut StrategyEntry) -> Result<()>,
    {
        let mut state = self.state.lock().await;
        let Some(index) = state.strategies.iter().position(|s| &s.id == id) else {
            return Ok(None);
        };

        let mut strategies = state.strategies.clone();
        change(&mut strategies[index])?;
        strategies[index].ensure_finite()?;
        let updated = strategies[index].clone();

        self.persist(Collection::Strategies, &strategies).await?;
        state.strategies = strategies;

        self.emit(LedgerEvent::entry(Collection::Strategies, ChangeKind::Updated, id));
        Ok(Some(updated))
    }

    /// Delete an emission; `false` (and no write) when the id is absent
    pub async fn delete_emission(&self, id: &EntryId) -> Result<bool> {
        let mut state = self.state.lock().await;
        let Some(emissions) = without(&state.emissions, |e| &e.id == id) else {
            return Ok(false);
        };

        self.persist(Collection::Emissions, &emissions).await?;
        state.emissions = emissions;

        tracing::info!(id = %id, "Emission deleted");
        self.emit(LedgerEvent::entry(Collection::Emissions, ChangeKind::Deleted, id));
        Ok(true)
    }

    pub async fn delete_sink(&self, id: &EntryId) -> Result<bool> {
        let mut state = self.state.lock().await;
        let Some(sinks) = without(&state.sinks, |s| &s.id == id) else {
            return Ok(false);
        };

        self.persist(Collection::Sinks, &sinks).await?;
        state.sinks = sinks;

        tracing::info!(id = %id, "Carbon sink deleted");
        self.emit(LedgerEvent::entry(Collection::Sinks, ChangeKind::Deleted, id));
        Ok(true)
    }

    pub async fn delete_strategy(&self, id: &EntryId) -> Result<bool> {
        let mut state = self.state.lock().await;
        let Some(strategies) = without(&state.strategies, |s| &s.id == id) else {
            return Ok(false);
        };

        self.persist(Collection::Strategies, &strategies).await?;
        state.strategies = strategies;

        tracing::info!(id = %id, "Strategy deleted");
        self.emit(LedgerEvent::entry(Collection::Strategies, ChangeKind::Deleted, id));
        Ok(true)
    }

    pub async fn emissions(&self) -> Vec<EmissionEntry> {
        self.state.lock().await.emissions.clone()
    }

    pub async fn sinks(&self) -> Vec<CarbonSinkEntry> {
        self.state.lock().await.sinks.clone()
    }

    pub async fn strategies(&self) -> Vec<StrategyEntry> {
        self.state.lock().await.strategies.clone()
    }

    pub async fn strategy(&self, id: &EntryId) -> Option<StrategyEntry> {
        self.state
            .lock()
            .await
            .strategies
            .iter()
            .find(|s| &s.id == id)
            .cloned()
    }

    pub async fn snapshot(&self) -> LedgerSnapshot {
        self.state.lock().await.clone()
    }

    /// Emissions dated within `[start, end]`, inclusive on both ends
    pub async fn emissions_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<EmissionEntry> {
        let state = self.state.lock().await;
        state
            .emissions
            .iter()
            .filter(|e| e.date >= start && e.date <= end)
            .cloned()
            .collect()
    }

    /// Sinks dated within `[start, end]`, inclusive on both ends
    pub async fn sinks_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<CarbonSinkEntry> {
        let state = self.state.lock().await;
        state
            .sinks
            .iter()
            .filter(|s| s.date >= start && s.date <= end)
            .cloned()
            .collect()
    }

    pub async fn metrics(&self) -> LedgerMetrics {
        let state = self.state.lock().await;
        LedgerMetrics::compute(&state)
    }

    /// Write all three collections, whether or not they changed
    pub async fn save(&self) -> Result<()> {
        let state = self.state.lock().await;
        self.persist(Collection::Emissions, &state.emissions).await?;
        self.persist(Collection::Sinks, &state.sinks).await?;
        self.persist(Collection::Strategies, &state.strategies).await?;
        tracing::info!("Ledger saved");
        Ok(())
    }

    /// Discard in-memory state and re-read every collection from the medium
    pub async fn reload(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        *state = load_snapshot(self.medium.as_ref(), self.seed_policy).await?;

        for collection in Collection::ALL {
            self.emit(LedgerEvent::reloaded(collection));
        }
        tracing::info!("Ledger reloaded");
        Ok(())
    }

    async fn persist<T: Serialize>(&self, collection: Collection, entries: &[T]) -> Result<()> {
        let json = serde_json::to_string(entries)?;
        self.medium.put(collection.key(), &json).await.map_err(|e| {
            tracing::error!(collection = %collection, error = %e, "Failed to persist collection");
            e
        })
    }

    fn emit(&self, event: LedgerEvent) {
        // No receivers is fine
        let _ = self.events.send(event);
    }
}

/// Copy of `entries` without the first match, `None` if nothing matched
fn without<T: Clone>(entries: &[T], matches: impl Fn(&T) -> bool) -> Option<Vec<T>> {
    let index = entries.iter().position(matches)?;
    let mut remaining = entries.to_vec();
    remaining.remove(index);
    Some(remaining)
}

async fn load_snapshot(medium: &dyn KeyValueStore, seed_policy: SeedPolicy) -> Result<LedgerSnapshot> {
    Ok(LedgerSnapshot {
        emissions: load_collection(medium, Collection::Emissions, || seed_policy.emissions()).await?,
        sinks: load_collection(medium, Collection::Sinks, || seed_policy.sinks()).await?,
        strategies: load_collection(medium, Collection::Strategies, || seed_policy.strategies())
            .await?,
    })
}

async fn load_collection<T, F>(
    medium: &dyn KeyValueStore,
    collection: Collection,
    seed: F,
) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    F: FnOnce() -> Vec<T>,
{
    let Some(raw) = medium.get(collection.key()).await? else {
        tracing::debug!(collection = %collection, "Nothing stored, using seed");
        return Ok(seed());
    };

    match serde_json::from_str(&raw) {
        Ok(entries) => Ok(entries),
        Err(e) => {
            let error = NetZeroError::PersistenceCorrupt {
                key: collection.key().to_string(),
                reason: e.to_string(),
            };
            tracing::warn!(error = %error, "Falling back to seed data");
            Ok(seed())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryKeyValueStore;
    use netzero_core::models::Co2e;
    use netzero_core::Calculator;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    async fn empty_ledger() -> (LedgerStore, MemoryKeyValueStore) {
        let medium = MemoryKeyValueStore::new();
        let ledger = LedgerStore::open(Arc::new(medium.clone()), SeedPolicy::Empty)
            .await
            .unwrap();
        (ledger, medium)
    }

    fn diesel(litres: f64, on: &str) -> EmissionDraft {
        Calculator::default()
            .emission_draft("diesel", litres, date(on), "user-1")
            .unwrap()
    }

    fn strategy_draft(status: StrategyStatus) -> StrategyDraft {
        StrategyDraft {
            title: "Haul Truck Electrification".to_string(),
            description: "Replace diesel haul trucks".to_string(),
            category: "Transport".to_string(),
            status,
            target_reduction: 30.0,
            current_reduction: 0.0,
            start_date: date("2024-03-01"),
            end_date: None,
            cost: 2_500_000.0,
            roi: 12.0,
            user_id: "user-1".to_string(),
            mine_id: None,
        }
    }

    #[tokio::test]
    async fn test_open_seeds_absent_collections() {
        let ledger = LedgerStore::open(Arc::new(MemoryKeyValueStore::new()), SeedPolicy::Demo)
            .await
            .unwrap();

        assert_eq!(ledger.emissions().await.len(), 3);
        assert_eq!(ledger.sinks().await.len(), 2);
        assert_eq!(ledger.strategies().await.len(), 2);
    }

    #[tokio::test]
    async fn test_add_is_newest_first_and_persisted() {
        let (ledger, medium) = empty_ledger().await;

        let first = ledger.add_emission(diesel(100.0, "2024-02-01")).await.unwrap();
        let second = ledger.add_emission(diesel(10.0, "2024-02-02")).await.unwrap();

        let emissions = ledger.emissions().await;
        assert_eq!(emissions[0].id, second.id);
        assert_eq!(emissions[1].id, first.id);
        assert_ne!(first.id, second.id);

        let stored = medium.get("coalmine_emissions").await.unwrap().unwrap();
        let stored: Vec<EmissionEntry> = serde_json::from_str(&stored).unwrap();
        assert_eq!(stored, emissions);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (ledger, medium) = empty_ledger().await;
        let entry = ledger.add_emission(diesel(100.0, "2024-02-01")).await.unwrap();
        let mut events = ledger.subscribe();

        assert!(ledger.delete_emission(&entry.id).await.unwrap());
        let after_first = medium.get("coalmine_emissions").await.unwrap();

        assert!(!ledger.delete_emission(&entry.id).await.unwrap());
        assert_eq!(medium.get("coalmine_emissions").await.unwrap(), after_first);
        assert!(ledger.emissions().await.is_empty());

        assert_eq!(events.recv().await.unwrap().change, ChangeKind::Deleted);
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_delete_unknown_does_not_write() {
        let (ledger, medium) = empty_ledger().await;

        assert!(!ledger.delete_sink(&EntryId::from("missing")).await.unwrap());
        assert!(!ledger.delete_strategy(&EntryId::from("missing")).await.unwrap());
        assert!(medium.is_empty());
    }

    #[tokio::test]
    async fn test_update_strategy_moves_forward_only() {
        let (ledger, _) = empty_ledger().await;
        let strategy = ledger
            .add_strategy(strategy_draft(StrategyStatus::Planned))
            .await
            .unwrap();

        let updated = ledger
            .update_strategy(&strategy.id, StrategyPatch::status(StrategyStatus::Completed))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, StrategyStatus::Completed);

        let err = ledger
            .update_strategy(&strategy.id, StrategyPatch::status(StrategyStatus::InProgress))
            .await
            .unwrap_err();
        assert!(matches!(err, NetZeroError::InvalidStatusTransition { .. }));
        assert_eq!(
            ledger.strategy(&strategy.id).await.unwrap().status,
            StrategyStatus::Completed
        );

        let reopened = ledger
            .reopen_strategy(&strategy.id, StrategyStatus::InProgress)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reopened.status, StrategyStatus::InProgress);
    }

    #[tokio::test]
    async fn test_update_merges_fields_and_keeps_the_rest() {
        let (ledger, _) = empty_ledger().await;
        let strategy = ledger
            .add_strategy(strategy_draft(StrategyStatus::InProgress))
            .await
            .unwrap();

        let patch = StrategyPatch {
            current_reduction: Some(12.5),
            end_date: Some(Some(date("2025-12-31"))),
            ..StrategyPatch::default()
        };
        let updated = ledger.update_strategy(&strategy.id, patch).await.unwrap().unwrap();

        assert_eq!(updated.current_reduction, 12.5);
        assert_eq!(updated.end_date, Some(date("2025-12-31")));
        assert_eq!(updated.title, strategy.title);
        assert_eq!(updated.created_at, strategy.created_at);
    }

    #[tokio::test]
    async fn test_update_unknown_strategy() {
        let (ledger, _) = empty_ledger().await;
        let result = ledger
            .update_strategy(&EntryId::from("nope"), StrategyPatch::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_date_range_is_inclusive() {
        let (ledger, _) = empty_ledger().await;
        for day in ["2024-01-01", "2024-01-15", "2024-01-31", "2024-02-01"] {
            ledger.add_emission(diesel(1.0, day)).await.unwrap();
        }

        let january = ledger
            .emissions_by_date_range(date("2024-01-01"), date("2024-01-31"))
            .await;
        assert_eq!(january.len(), 3);

        let reversed = ledger
            .emissions_by_date_range(date("2024-01-31"), date("2024-01-01"))
            .await;
        assert!(reversed.is_empty());
    }

    #[tokio::test]
    async fn test_metrics_net_is_emissions_minus_sinks() {
        let (ledger, _) = empty_ledger().await;
        let calculator = Calculator::default();

        ledger.add_emission(diesel(1000.0, "2024-01-10")).await.unwrap();
        ledger
            .add_sink(
                calculator
                    .sink_draft("tree-plantation", 400.0, date("2024-01-11"), "user-1")
                    .unwrap(),
            )
            .await
            .unwrap();

        let metrics = ledger.metrics().await;
        assert_eq!(metrics.total_emissions, Co2e::from_kg(2650.0));
        assert_eq!(metrics.total_sinks, Co2e::from_kg(1000.0));
        assert_eq!(metrics.net_emissions, Co2e::from_kg(1650.0));
        assert_eq!(metrics.emission_count, 1);
    }

    #[tokio::test]
    async fn test_events_name_collection_and_change() {
        let (ledger, _) = empty_ledger().await;
        let mut events = ledger.subscribe();

        let strategy = ledger
            .add_strategy(strategy_draft(StrategyStatus::Planned))
            .await
            .unwrap();
        ledger
            .update_strategy(&strategy.id, StrategyPatch::status(StrategyStatus::InProgress))
            .await
            .unwrap();

        let added = events.recv().await.unwrap();
        assert_eq!(added.collection, Collection::Strategies);
        assert_eq!(added.change, ChangeKind::Added);
        assert_eq!(added.id.as_ref(), Some(&strategy.id));

        let updated = events.recv().await.unwrap();
        assert_eq!(updated.change, ChangeKind::Updated);
    }

    #[tokio::test]
    async fn test_corrupt_collection_falls_back_to_seed() {
        let medium = MemoryKeyValueStore::new();
        medium.put("coalmine_carbon_sinks", "{not json").await.unwrap();
        medium.put("coalmine_emissions", "[]").await.unwrap();

        let ledger = LedgerStore::open(Arc::new(medium.clone()), SeedPolicy::Demo)
            .await
            .unwrap();

        assert_eq!(ledger.sinks().await.len(), 2);
        assert!(ledger.emissions().await.is_empty());
        // Not rewritten until something changes
        assert_eq!(
            medium.get("coalmine_carbon_sinks").await.unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[tokio::test]
    async fn test_reload_rereads_medium() {
        let (ledger, medium) = empty_ledger().await;
        ledger.add_emission(diesel(1.0, "2024-01-01")).await.unwrap();

        medium.put("coalmine_emissions", "[]").await.unwrap();
        let mut events = ledger.subscribe();
        ledger.reload().await.unwrap();

        assert!(ledger.emissions().await.is_empty());
        assert_eq!(events.recv().await.unwrap().change, ChangeKind::Reloaded);
    }

    #[tokio::test]
    async fn test_reload_after_corruption_falls_back_to_seed() {
        let medium = MemoryKeyValueStore::new();
        let ledger = LedgerStore::open(Arc::new(medium.clone()), SeedPolicy::Demo)
            .await
            .unwrap();
        ledger
            .add_strategy(strategy_draft(StrategyStatus::Planned))
            .await
            .unwrap();
        assert_eq!(ledger.strategies().await.len(), 3);

        medium.put("coalmine_strategies", "{not json").await.unwrap();
        ledger.reload().await.unwrap();

        assert_eq!(ledger.strategies().await, SeedPolicy::Demo.strategies());
    }

    #[tokio::test]
    async fn test_non_finite_numbers_never_reach_the_medium() {
        let (ledger, medium) = empty_ledger().await;
        let kept = ledger
            .add_strategy(strategy_draft(StrategyStatus::Planned))
            .await
            .unwrap();
        let stored = medium.get("coalmine_strategies").await.unwrap();

        let bad = StrategyDraft {
            roi: f64::NAN,
            ..strategy_draft(StrategyStatus::Planned)
        };
        let err = ledger.add_strategy(bad).await.unwrap_err();
        assert!(matches!(err, NetZeroError::InvalidQuantity { .. }));

        let patch = StrategyPatch {
            cost: Some(f64::INFINITY),
            ..StrategyPatch::default()
        };
        assert!(ledger.update_strategy(&kept.id, patch).await.is_err());

        let mut emission = diesel(10.0, "2024-01-01");
        emission.co2e = Co2e::from_kg(f64::NAN);
        assert!(ledger.add_emission(emission).await.is_err());

        assert_eq!(medium.get("coalmine_strategies").await.unwrap(), stored);
        assert!(medium.get("coalmine_emissions").await.unwrap().is_none());
        assert_eq!(ledger.strategies().await, vec![kept]);
    }

    #[tokio::test]
    async fn test_save_then_reload_keeps_exact_values() {
        let (ledger, _) = empty_ledger().await;
        let draft = Calculator::default()
            .emission_draft("electricity", 1200.0, date("2024-04-02"), "user-1")
            .unwrap();
        // 1200 * 0.82 is not a short decimal
        assert_ne!(draft.co2e.kg(), 984.0);
        ledger.add_emission(draft).await.unwrap();
        let before = ledger.snapshot().await;

        ledger.save().await.unwrap();
        ledger.reload().await.unwrap();

        assert_eq!(ledger.snapshot().await, before);
    }
}
