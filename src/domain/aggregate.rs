// src/domain/aggregate.rs

use crate::domain::anomaly::AnomalyPolicy;
use crate::domain::diff::{diff, DiffEvent};
use crate::domain::snapshot::{Snapshot, SnapshotSequence};
use chrono::{Duration, NaiveDateTime};
use std::collections::BTreeMap;

/// Per-realtor activity count within the window.
#[derive(Debug, Clone)]
pub struct RealtorActivity {
    pub realtor_name: String,
    pub count: usize,
}

/// Accumulation of diff events over a trailing time window.
#[derive(Debug)]
pub struct AggregateResult {
    pub window_start: NaiveDateTime,
    pub reference_time: NaiveDateTime,
    pub total_appeared: usize,
    pub total_disappeared: usize,
    /// Top realtors by appearance count, count descending then name ascending.
    pub top_appearing: Vec<RealtorActivity>,
    pub top_disappearing: Vec<RealtorActivity>,
    /// Non-anomalous events in the window, most recent first.
    pub events: Vec<DiffEvent>,
    /// Anomalous events excluded from the totals, most recent first. Kept so
    /// callers can audit what was skipped.
    pub skipped: Vec<DiffEvent>,
}

/// Accumulate diff events over `[reference_time - window_days, reference_time]`
/// into per-realtor appearance/disappearance counts.
///
/// Walks every snapshot at or before `reference_time` in ascending order. The
/// oldest in-scope snapshot is only ever a baseline -- it is not diffed
/// against anything earlier, which under-counts activity at the left edge of
/// the window. Known limitation, kept deliberately.
///
/// Only pairs whose `to_time` is strictly inside the window are accumulated;
/// an event landing exactly on `reference_time - window_days` is excluded.
/// Appearances are attributed to the realtor listed in the newer snapshot,
/// disappearances to the realtor in the older one.
///
/// Deterministic: same stored data, same output. The caller supplies
/// `reference_time`; there is no wall-clock dependency here.
pub fn aggregate(
    sequence: &SnapshotSequence,
    reference_time: NaiveDateTime,
    window_days: i64,
    policy: &AnomalyPolicy,
    top_n: usize,
) -> AggregateResult {
    let window_start = reference_time - Duration::days(window_days);

    // Sequence is newest-first; the walk needs oldest-first.
    let mut in_scope: Vec<&Snapshot> = sequence
        .snapshots
        .iter()
        .filter(|s| s.taken_at <= reference_time)
        .collect();
    in_scope.reverse();

    let mut total_appeared = 0;
    let mut total_disappeared = 0;
    let mut appear_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut disappear_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut events = Vec::new();
    let mut skipped = Vec::new();

    for pair in in_scope.windows(2) {
        let (prev, curr) = (pair[0], pair[1]);

        if curr.taken_at <= window_start {
            continue;
        }

        let event = diff(Some(prev), curr);

        if policy.is_anomalous(&event) {
            skipped.push(event);
            continue;
        }

        total_appeared += event.appeared.len();
        total_disappeared += event.disappeared.len();

        for id in &event.appeared {
            if let Some(record) = curr.find(id) {
                *appear_counts.entry(record.realtor_name.clone()).or_insert(0) += 1;
            }
        }
        for id in &event.disappeared {
            if let Some(record) = prev.find(id) {
                *disappear_counts
                    .entry(record.realtor_name.clone())
                    .or_insert(0) += 1;
            }
        }

        events.push(event);
    }

    events.reverse();
    skipped.reverse();

    AggregateResult {
        window_start,
        reference_time,
        total_appeared,
        total_disappeared,
        top_appearing: rank(appear_counts, top_n),
        top_disappearing: rank(disappear_counts, top_n),
        events,
        skipped,
    }
}

fn rank(counts: BTreeMap<String, usize>, top_n: usize) -> Vec<RealtorActivity> {
    let mut ranked: Vec<RealtorActivity> = counts
        .into_iter()
        .map(|(realtor_name, count)| RealtorActivity {
            realtor_name,
            count,
        })
        .collect();

    // BTreeMap already yields name-ascending, so a stable sort on count alone
    // keeps the name tie-break.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(top_n);
    ranked
}
