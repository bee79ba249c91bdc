// src/domain/anomaly.rs

use crate::domain::diff::DiffEvent;

/// Threshold above which a diff is treated as a scrape glitch rather than
/// real market activity.
///
/// A single run racing a source-side pagination hiccup can manufacture an
/// implausible burst of appearances or disappearances; excluding such events
/// keeps the weekly leaderboards from being corrupted. This is a heuristic,
/// not a proof -- a genuine mass delisting above the threshold is also
/// suppressed.
#[derive(Debug, Clone, Copy)]
pub struct AnomalyPolicy {
    pub threshold: usize,
}

impl Default for AnomalyPolicy {
    fn default() -> Self {
        Self { threshold: 30 }
    }
}

impl AnomalyPolicy {
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    /// Strictly greater than the threshold on either side. An event with
    /// exactly `threshold` appearances is not anomalous.
    pub fn is_anomalous(&self, event: &DiffEvent) -> bool {
        event.appeared.len() > self.threshold || event.disappeared.len() > self.threshold
    }
}
