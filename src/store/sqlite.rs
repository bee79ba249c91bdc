// src/store/sqlite.rs

use rusqlite::{params, Connection};
use std::cell::RefCell;
use std::fs;

use crate::domain::record::ListingRecord;
use crate::errors::ServerError;
use crate::store::SnapshotStore;

// Thread-local connection slot, keyed by path so two stores opened in the
// same thread (tests mostly) don't hand each other's connection around.
thread_local! {
    static DB_CONN: RefCell<Option<(String, Connection)>> = RefCell::new(None);
}

/// SQLite-backed snapshot store. The handle is just a path; each worker
/// thread opens its own connection on first use.
#[derive(Clone)]
pub struct SqliteStore {
    path: String,
}

impl SqliteStore {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Provides a mutable connection to the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServerError>,
    {
        let inner_result = DB_CONN
            .try_with(|cell| {
                let mut slot = cell.borrow_mut();

                let reopen = match slot.as_ref() {
                    Some((path, _)) => path != &self.path,
                    None => true,
                };
                if reopen {
                    let conn = Connection::open(&self.path)
                        .map_err(|e| ServerError::DbError(format!("Open DB failed: {e}")))?;
                    *slot = Some((self.path.clone(), conn));
                }

                let (_, conn) = slot.as_mut().unwrap();
                f(conn)
            })
            .map_err(|_| ServerError::InternalError)?;
        inner_result
    }
}

/// Initialize the database from a SQL schema file.
pub fn init_db(store: &SqliteStore, schema_path: &str) -> Result<(), ServerError> {
    let schema_sql = fs::read_to_string(schema_path)
        .map_err(|e| ServerError::DbError(format!("Failed to read schema file: {e}")))?;

    store.with_conn(|conn| {
        conn.execute_batch(&schema_sql)
            .map_err(|e| ServerError::DbError(format!("Failed to apply schema: {e}")))?;
        Ok(())
    })?;

    println!("✅ Database initialized from {schema_path}");
    Ok(())
}

const SELECT_COLUMNS: &str = "listing_id, complex_name, building_label, floor_info, direction, \
     area_supply, area_exclusive, price_display, price_amount, realtor_name, \
     feature_description, trade_type, confirmed_date, snapshot_time";

fn row_to_record(row: &rusqlite::Row) -> Result<ListingRecord, rusqlite::Error> {
    Ok(ListingRecord {
        listing_id: row.get(0)?,
        complex_name: row.get(1)?,
        building_label: row.get(2)?,
        floor_info: row.get(3)?,
        direction: row.get(4)?,
        area_supply: row.get(5)?,
        area_exclusive: row.get(6)?,
        price_display: row.get(7)?,
        price_amount: row.get(8)?,
        realtor_name: row.get(9)?,
        feature_description: row.get(10)?,
        trade_type: row.get(11)?,
        confirmed_date: row.get(12)?,
        snapshot_time: row.get(13)?,
    })
}

fn collect_records(
    stmt: &mut rusqlite::Statement,
    params: &[&dyn rusqlite::ToSql],
) -> Result<Vec<ListingRecord>, ServerError> {
    let rows = stmt
        .query_map(params, row_to_record)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

impl SnapshotStore for SqliteStore {
    fn load(&self, scope: &str) -> Result<Vec<ListingRecord>, ServerError> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {SELECT_COLUMNS} FROM listing_records \
                     WHERE complex_name = ? ORDER BY id"
                ))
                .map_err(|e| ServerError::DbError(e.to_string()))?;
            collect_records(&mut stmt, &[&scope])
        })
    }

    fn load_all(&self) -> Result<Vec<ListingRecord>, ServerError> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {SELECT_COLUMNS} FROM listing_records ORDER BY id"
                ))
                .map_err(|e| ServerError::DbError(e.to_string()))?;
            collect_records(&mut stmt, &[])
        })
    }

    fn append(&self, records: &[ListingRecord]) -> Result<(), ServerError> {
        self.with_conn(|conn| {
            let tx = conn
                .transaction()
                .map_err(|e| ServerError::DbError(e.to_string()))?;

            for record in records {
                tx.execute(
                    "INSERT INTO listing_records (
                        listing_id, complex_name, building_label, floor_info, direction,
                        area_supply, area_exclusive, price_display, price_amount,
                        realtor_name, feature_description, trade_type, confirmed_date,
                        snapshot_time
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
                    params![
                        record.listing_id,
                        record.complex_name,
                        record.building_label,
                        record.floor_info,
                        record.direction,
                        record.area_supply,
                        record.area_exclusive,
                        record.price_display,
                        record.price_amount,
                        record.realtor_name,
                        record.feature_description,
                        record.trade_type,
                        record.confirmed_date,
                        record.snapshot_time,
                    ],
                )
                .map_err(|e| ServerError::DbError(e.to_string()))?;
            }

            tx.commit().map_err(|e| ServerError::DbError(e.to_string()))?;
            Ok(())
        })
    }

    fn clear(&self, scope: &str) -> Result<(), ServerError> {
        self.with_conn(|conn| {
            conn.execute(
                "DELETE FROM listing_records WHERE complex_name = ?",
                params![scope],
            )
            .map_err(|e| ServerError::DbError(e.to_string()))?;
            Ok(())
        })
    }
}
