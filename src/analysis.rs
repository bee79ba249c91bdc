// src/analysis.rs

use chrono::NaiveDateTime;
use std::collections::BTreeSet;

use crate::domain::aggregate::{aggregate, AggregateResult};
use crate::domain::anomaly::AnomalyPolicy;
use crate::domain::diff::{diff, DiffEvent};
use crate::domain::record::ListingRecord;
use crate::domain::snapshot::{
    parse_snapshot_time, Snapshot, SnapshotSequence, SNAPSHOT_TIME_FORMAT,
};
use crate::domain::unit_type::{classify_and_find_lowest, BandLowest};
use crate::errors::ServerError;
use crate::store::SnapshotStore;

// Read-side query surface over the store. Every operation loads the full
// scope and recomputes sequences, diffs and aggregates from scratch; there is
// no incremental state to invalidate.

/// A diff resolved to full record detail for presentation.
pub struct DiffDetail {
    pub event: DiffEvent,
    /// Appeared records, resolved against the newer snapshot.
    pub appeared: Vec<ListingRecord>,
    /// Disappeared records, resolved against the older snapshot -- their last
    /// known state.
    pub disappeared: Vec<ListingRecord>,
    /// Whether the anomaly policy excludes this event from aggregates.
    pub anomalous: bool,
}

/// Group every stored record for a scope into an ordered snapshot sequence.
pub fn get_sequence(
    store: &dyn SnapshotStore,
    scope: &str,
) -> Result<SnapshotSequence, ServerError> {
    let records = store.load(scope)?;
    Ok(SnapshotSequence::index(&records))
}

/// The snapshot collected at exactly `at`, if one exists.
pub fn get_snapshot(
    store: &dyn SnapshotStore,
    scope: &str,
    at: NaiveDateTime,
) -> Result<Option<Snapshot>, ServerError> {
    Ok(get_sequence(store, scope)?.at(at).cloned())
}

/// Diff two named snapshots. A `from` that names no snapshot falls back to
/// the baseline rule (empty event); a missing `to` is an error, because the
/// caller named a snapshot that does not exist.
pub fn diff_between(
    store: &dyn SnapshotStore,
    scope: &str,
    from: Option<NaiveDateTime>,
    to: NaiveDateTime,
    policy: &AnomalyPolicy,
) -> Result<DiffDetail, ServerError> {
    let sequence = get_sequence(store, scope)?;
    let to_snapshot = sequence.at(to).ok_or_else(|| missing_snapshot(to))?;
    let from_snapshot = from.and_then(|t| sequence.at(t));
    Ok(detail(from_snapshot, to_snapshot, policy))
}

/// Diff a snapshot against its immediate predecessor in the sequence.
pub fn diff_at(
    store: &dyn SnapshotStore,
    scope: &str,
    at: NaiveDateTime,
    policy: &AnomalyPolicy,
) -> Result<DiffDetail, ServerError> {
    let sequence = get_sequence(store, scope)?;
    let to_snapshot = sequence.at(at).ok_or_else(|| missing_snapshot(at))?;
    let from_snapshot = sequence.predecessor_of(at);
    Ok(detail(from_snapshot, to_snapshot, policy))
}

fn missing_snapshot(at: NaiveDateTime) -> ServerError {
    ServerError::BadRequest(format!(
        "No snapshot at {}",
        at.format(SNAPSHOT_TIME_FORMAT)
    ))
}

fn detail(prev: Option<&Snapshot>, curr: &Snapshot, policy: &AnomalyPolicy) -> DiffDetail {
    let event = diff(prev, curr);
    let appeared = event
        .appeared_records(curr)
        .into_iter()
        .cloned()
        .collect();
    let disappeared = prev
        .map(|p| event.disappeared_records(p).into_iter().cloned().collect())
        .unwrap_or_default();
    let anomalous = policy.is_anomalous(&event);
    DiffDetail {
        event,
        appeared,
        disappeared,
        anomalous,
    }
}

/// Roll up diff events over the trailing window. Anomalous events are
/// excluded from the totals; each one is logged here so an operator can audit
/// what the leaderboards never saw.
pub fn aggregate_window(
    store: &dyn SnapshotStore,
    scope: &str,
    reference_time: NaiveDateTime,
    window_days: i64,
    policy: &AnomalyPolicy,
    top_n: usize,
) -> Result<AggregateResult, ServerError> {
    let sequence = get_sequence(store, scope)?;
    let result = aggregate(&sequence, reference_time, window_days, policy, top_n);
    for event in &result.skipped {
        eprintln!(
            "⚠️ Anomalous diff skipped for {scope} at {}: +{} / -{} (threshold {})",
            event.to_time.format(SNAPSHOT_TIME_FORMAT),
            event.appeared.len(),
            event.disappeared.len(),
            policy.threshold
        );
    }
    Ok(result)
}

/// Minimum-price records per type band in the snapshot at `at`, cloned for
/// presentation. A timestamp with no snapshot yields an empty result.
pub fn lowest_price_by_type(
    store: &dyn SnapshotStore,
    scope: &str,
    at: NaiveDateTime,
) -> Result<Vec<BandLowest>, ServerError> {
    let Some(snapshot) = get_snapshot(store, scope, at)? else {
        return Ok(Vec::new());
    };
    Ok(classify_and_find_lowest(&snapshot).into_values().collect())
}

/// The dashboard's headline numbers, derived from the two newest snapshots.
pub struct LatestMetrics {
    pub taken_at: Option<NaiveDateTime>,
    pub listing_count: usize,
    /// Mean advertised price over the latest snapshot, in KRW.
    pub average_price: f64,
    /// Listings present now that were absent from the previous snapshot.
    pub new_count: usize,
}

pub fn latest_metrics(sequence: &SnapshotSequence) -> LatestMetrics {
    let Some(latest) = sequence.latest() else {
        return LatestMetrics {
            taken_at: None,
            listing_count: 0,
            average_price: 0.0,
            new_count: 0,
        };
    };

    let average_price = if latest.is_empty() {
        0.0
    } else {
        latest.records.iter().map(|r| r.price_amount as f64).sum::<f64>() / latest.len() as f64
    };
    // Baseline rule keeps this at 0 when only one snapshot exists.
    let new_count = diff(sequence.previous(), latest).appeared.len();

    LatestMetrics {
        taken_at: Some(latest.taken_at),
        listing_count: latest.len(),
        average_price,
        new_count,
    }
}

/// One row of the collection history log.
pub struct CollectionRun {
    pub taken_at: NaiveDateTime,
    pub count: usize,
}

/// Per-snapshot record counts, most recent first.
pub fn collection_history(sequence: &SnapshotSequence) -> Vec<CollectionRun> {
    sequence
        .snapshots
        .iter()
        .map(|s| CollectionRun {
            taken_at: s.taken_at,
            count: s.len(),
        })
        .collect()
}

/// Distinct complex names present in the store, sorted.
pub fn complex_names(store: &dyn SnapshotStore) -> Result<Vec<String>, ServerError> {
    let records = store.load_all()?;
    let names: BTreeSet<String> = records.into_iter().map(|r| r.complex_name).collect();
    Ok(names.into_iter().collect())
}

/// The complex of the most recent collection run -- the dashboard's default
/// selection when no scope is given.
pub fn default_scope(store: &dyn SnapshotStore) -> Result<Option<String>, ServerError> {
    let records = store.load_all()?;
    Ok(records
        .iter()
        .filter_map(|r| parse_snapshot_time(&r.snapshot_time).map(|t| (t, &r.complex_name)))
        .max_by_key(|(t, _)| *t)
        .map(|(_, name)| name.clone()))
}

/// Whole-store totals for the admin view.
pub struct StoreTotals {
    pub record_count: usize,
    pub complex_count: usize,
    pub latest_collection: Option<NaiveDateTime>,
}

pub fn store_totals(records: &[ListingRecord]) -> StoreTotals {
    let complex_count = records
        .iter()
        .map(|r| r.complex_name.as_str())
        .collect::<BTreeSet<_>>()
        .len();
    let latest_collection = records
        .iter()
        .filter_map(|r| parse_snapshot_time(&r.snapshot_time))
        .max();
    StoreTotals {
        record_count: records.len(),
        complex_count,
        latest_collection,
    }
}
