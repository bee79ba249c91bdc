use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::app::App;
use crate::config::{digest_key, AppConfig};
use crate::domain::record::ListingRecord;
use crate::store::{init_db, SqliteStore};

pub const TEST_KEY: &str = "test-key";

/// Unique temp path per call so parallel tests never share a backend file.
pub fn temp_path(prefix: &str, ext: &str) -> PathBuf {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("{prefix}_{nanos}_{n}.{ext}"))
}

/// Fresh SQLite store initialized from the production schema.
pub fn temp_sqlite() -> SqliteStore {
    let path = temp_path("land_watch_test", "sqlite3");
    let store = SqliteStore::new(path.to_string_lossy().to_string());
    init_db(&store, "sql/schema.sql").expect("Failed to initialize test DB");
    store
}

/// App wired to a fresh SQLite backend and a known admin key.
pub fn test_app() -> App {
    let config = AppConfig {
        backend: "sqlite".to_string(),
        sqlite_path: temp_path("land_watch_app", "sqlite3")
            .to_string_lossy()
            .to_string(),
        admin_key_digest: digest_key(TEST_KEY),
        ..AppConfig::default()
    };
    let config_path = temp_path("land_watch_config", "json")
        .to_string_lossy()
        .to_string();
    App::new(config, config_path).expect("Failed to build test app")
}

/// A complete record with sensible defaults; tests override what they assert
/// on.
pub fn record(id: &str, snapshot_time: &str) -> ListingRecord {
    ListingRecord {
        listing_id: id.to_string(),
        complex_name: "래미안테스트".to_string(),
        building_label: "101동".to_string(),
        floor_info: "중/15".to_string(),
        direction: "남향".to_string(),
        area_supply: Some(112.0),
        area_exclusive: 84.97,
        price_display: "10억".to_string(),
        price_amount: 1_000_000_000,
        realtor_name: "한국공인중개".to_string(),
        feature_description: String::new(),
        trade_type: "매매".to_string(),
        confirmed_date: "26.01.15.".to_string(),
        snapshot_time: snapshot_time.to_string(),
    }
}

pub fn record_by(id: &str, realtor: &str, snapshot_time: &str) -> ListingRecord {
    let mut r = record(id, snapshot_time);
    r.realtor_name = realtor.to_string();
    r
}
