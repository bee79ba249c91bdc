pub mod json_file;
pub mod sqlite;

pub use json_file::JsonFileStore;
pub use sqlite::{init_db, SqliteStore};

use crate::domain::record::ListingRecord;
use crate::errors::ServerError;

/// The storage interface the read side is written against. Backends are
/// swappable behind this trait instead of branching on which one is
/// configured.
///
/// The store exclusively owns record persistence; everything downstream is a
/// pure derivation recomputed from a full read. Appends are not idempotent:
/// duplicate rows must be tolerated by the readers, not prevented here.
pub trait SnapshotStore: Send + Sync {
    /// All records for one complex, across every collection run.
    fn load(&self, scope: &str) -> Result<Vec<ListingRecord>, ServerError>;

    /// Every record in the store, all scopes.
    fn load_all(&self) -> Result<Vec<ListingRecord>, ServerError>;

    /// Append a collected batch. Rows are never updated in place.
    fn append(&self, records: &[ListingRecord]) -> Result<(), ServerError>;

    /// Delete every record for one complex.
    fn clear(&self, scope: &str) -> Result<(), ServerError>;
}
