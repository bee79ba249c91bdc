// src/app.rs

use std::sync::{Arc, Mutex};

use crate::config::AppConfig;
use crate::errors::ServerError;
use crate::scheduler::Scheduler;
use crate::store::{init_db, JsonFileStore, SnapshotStore, SqliteStore};

pub const SCHEMA_PATH: &str = "sql/schema.sql";

/// Shared server state: the storage backend behind the trait, the runtime
/// config, and the collection scheduler. One instance lives for the whole
/// server; worker threads share it through an `Arc`.
pub struct App {
    pub store: Arc<dyn SnapshotStore>,
    pub config: Mutex<AppConfig>,
    pub config_path: String,
    pub scheduler: Scheduler,
}

impl App {
    pub fn new(config: AppConfig, config_path: impl Into<String>) -> Result<Self, ServerError> {
        let store = open_store(&config)?;
        Ok(Self {
            store,
            config: Mutex::new(config),
            config_path: config_path.into(),
            scheduler: Scheduler::new(),
        })
    }

    /// A point-in-time copy of the config, so handlers don't hold the lock
    /// across rendering.
    pub fn config(&self) -> Result<AppConfig, ServerError> {
        Ok(self
            .config
            .lock()
            .map_err(|_| ServerError::InternalError)?
            .clone())
    }

    /// Mutate the config under the lock and persist the result.
    pub fn update_config<F>(&self, mutate: F) -> Result<AppConfig, ServerError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let updated = {
            let mut guard = self.config.lock().map_err(|_| ServerError::InternalError)?;
            mutate(&mut guard);
            guard.clone()
        };
        crate::config::save_config(&self.config_path, &updated)?;
        Ok(updated)
    }
}

/// Select the storage backend from config. The rest of the server only ever
/// sees the `SnapshotStore` trait.
pub fn open_store(config: &AppConfig) -> Result<Arc<dyn SnapshotStore>, ServerError> {
    match config.backend.as_str() {
        "sqlite" => {
            let store = SqliteStore::new(config.sqlite_path.clone());
            init_db(&store, SCHEMA_PATH)?;
            Ok(Arc::new(store))
        }
        "json" => Ok(Arc::new(JsonFileStore::new(config.json_path.clone()))),
        other => Err(ServerError::BadRequest(format!(
            "Unknown storage backend '{other}'"
        ))),
    }
}
