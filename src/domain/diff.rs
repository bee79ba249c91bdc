// src/domain/diff.rs

use crate::domain::record::ListingRecord;
use crate::domain::snapshot::Snapshot;
use chrono::NaiveDateTime;
use std::collections::BTreeSet;

/// The symmetric difference between two adjacent snapshots, by `listing_id`.
/// Derived on demand, never persisted.
#[derive(Debug, Clone)]
pub struct DiffEvent {
    /// `None` when `curr` is the oldest snapshot in the sequence (baseline).
    pub from_time: Option<NaiveDateTime>,
    pub to_time: NaiveDateTime,
    pub appeared: BTreeSet<String>,
    pub disappeared: BTreeSet<String>,
}

impl DiffEvent {
    /// Resolve appeared ids against `curr` -- the snapshot they first showed
    /// up in. Order follows `curr`'s record order.
    pub fn appeared_records<'a>(&self, curr: &'a Snapshot) -> Vec<&'a ListingRecord> {
        curr.records
            .iter()
            .filter(|r| self.appeared.contains(&r.listing_id))
            .collect()
    }

    /// Resolve disappeared ids against `prev` -- a vanished listing's detail
    /// is its last known state, not the snapshot it is absent from.
    pub fn disappeared_records<'a>(&self, prev: &'a Snapshot) -> Vec<&'a ListingRecord> {
        prev.records
            .iter()
            .filter(|r| self.disappeared.contains(&r.listing_id))
            .collect()
    }
}

/// Compute the diff between a snapshot and its predecessor.
///
/// With no predecessor both sets are empty: the first snapshot ever collected
/// is a baseline, never counted as "all new".
pub fn diff(prev: Option<&Snapshot>, curr: &Snapshot) -> DiffEvent {
    let Some(prev) = prev else {
        return DiffEvent {
            from_time: None,
            to_time: curr.taken_at,
            appeared: BTreeSet::new(),
            disappeared: BTreeSet::new(),
        };
    };

    let prev_ids: BTreeSet<&str> = prev.records.iter().map(|r| r.listing_id.as_str()).collect();
    let curr_ids: BTreeSet<&str> = curr.records.iter().map(|r| r.listing_id.as_str()).collect();

    let appeared = curr_ids
        .difference(&prev_ids)
        .map(|id| id.to_string())
        .collect();
    let disappeared = prev_ids
        .difference(&curr_ids)
        .map(|id| id.to_string())
        .collect();

    DiffEvent {
        from_time: Some(prev.taken_at),
        to_time: curr.taken_at,
        appeared,
        disappeared,
    }
}
