// src/domain/snapshot.rs

use crate::domain::record::ListingRecord;
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use std::collections::{BTreeMap, HashSet};

/// Batch stamp format shared by the scraper, the store and the indexer.
pub const SNAPSHOT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current time in KST (the source market's timezone).
pub fn kst_now() -> DateTime<FixedOffset> {
    let kst = FixedOffset::east_opt(9 * 3600).unwrap();
    Utc::now().with_timezone(&kst)
}

/// Formatted batch stamp for one collection run. Every record of the run
/// carries exactly this value.
pub fn batch_stamp() -> String {
    kst_now().format(SNAPSHOT_TIME_FORMAT).to_string()
}

/// Parse a stored batch stamp. `None` means the record is excluded from
/// sequence-based views but stays in raw storage.
pub fn parse_snapshot_time(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), SNAPSHOT_TIME_FORMAT).ok()
}

/// The set of listings observed in one collection run, sharing one batch
/// stamp. Derived on read, never stored.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub taken_at: NaiveDateTime,
    /// Deduplicated by `listing_id`, first occurrence kept.
    pub records: Vec<ListingRecord>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, listing_id: &str) -> Option<&ListingRecord> {
        self.records.iter().find(|r| r.listing_id == listing_id)
    }

    pub fn contains(&self, listing_id: &str) -> bool {
        self.find(listing_id).is_some()
    }
}

/// All snapshots for a scope, ordered descending by `taken_at` so index 0 is
/// the most recent collection.
#[derive(Debug, Clone)]
pub struct SnapshotSequence {
    pub snapshots: Vec<Snapshot>,
}

impl SnapshotSequence {
    /// Group raw records into discrete snapshots by exact `snapshot_time`
    /// equality. Two scrapes one second apart are different snapshots.
    ///
    /// Records with malformed timestamps are dropped from the sequence, and
    /// duplicate `listing_id`s within one snapshot keep the first occurrence
    /// so upstream data-quality defects never inflate set operations.
    pub fn index(records: &[ListingRecord]) -> SnapshotSequence {
        let mut groups: BTreeMap<NaiveDateTime, Vec<ListingRecord>> = BTreeMap::new();

        for record in records {
            let Some(taken_at) = parse_snapshot_time(&record.snapshot_time) else {
                continue;
            };
            groups.entry(taken_at).or_default().push(record.clone());
        }

        let mut snapshots: Vec<Snapshot> = groups
            .into_iter()
            .map(|(taken_at, grouped)| {
                let mut seen = HashSet::new();
                let records = grouped
                    .into_iter()
                    .filter(|r| seen.insert(r.listing_id.clone()))
                    .collect();
                Snapshot { taken_at, records }
            })
            .collect();

        snapshots.reverse(); // BTreeMap iterates ascending; we want newest first
        SnapshotSequence { snapshots }
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.first()
    }

    pub fn previous(&self) -> Option<&Snapshot> {
        self.snapshots.get(1)
    }

    pub fn at(&self, taken_at: NaiveDateTime) -> Option<&Snapshot> {
        self.snapshots.iter().find(|s| s.taken_at == taken_at)
    }

    /// The snapshot immediately older than `taken_at`, if any.
    pub fn predecessor_of(&self, taken_at: NaiveDateTime) -> Option<&Snapshot> {
        self.snapshots.iter().find(|s| s.taken_at < taken_at)
    }
}
