// src/domain/record.rs

use serde::{Deserialize, Serialize};

/// One observed listing at one point in time.
///
/// Rows are append-only: a record is never mutated after collection, every
/// scrape run inserts a fresh batch sharing one `snapshot_time`. The same
/// `listing_id` may appear, disappear and reappear across batches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingRecord {
    /// Naver article number (`atclNo`). Unique within one snapshot.
    pub listing_id: String,
    /// Complex name (`atclNm`). This is the scope data is partitioned by.
    pub complex_name: String,
    #[serde(default)]
    pub building_label: String,
    #[serde(default)]
    pub floor_info: String,
    #[serde(default)]
    pub direction: String,
    /// Supply area in m² (`spc1`), when the source provides it.
    #[serde(default)]
    pub area_supply: Option<f64>,
    /// Exclusive area in m² (`spc2`). 0.0 when the source value is unusable.
    #[serde(default)]
    pub area_exclusive: f64,
    /// Raw price string as advertised, e.g. "10억 5,000".
    #[serde(default)]
    pub price_display: String,
    /// Price in KRW parsed from `price_display`. 0 when unparseable.
    #[serde(default)]
    pub price_amount: i64,
    #[serde(default)]
    pub realtor_name: String,
    #[serde(default)]
    pub feature_description: String,
    /// Trade type label, e.g. "매매".
    #[serde(default)]
    pub trade_type: String,
    /// Confirmation date from the source (`atclCfmYmd`).
    #[serde(default)]
    pub confirmed_date: String,
    /// Collection batch stamp, "%Y-%m-%d %H:%M:%S" in KST. Kept as the raw
    /// collected string so malformed values survive in storage.
    pub snapshot_time: String,
}
