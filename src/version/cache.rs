//! Durable store for the single check record
//!
//! One record lives under one fixed key. A stored record is only served
//! back while it is fresh (TTL) and was produced by the same build version;
//! anything stale, mismatched, or corrupt is deleted on read so callers
//! never see it. Storage failures never reach the caller: a check must
//! complete even when persistence is broken.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

#[cfg(test)]
use mockall::automock;

use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info, warn};

use crate::config::CACHE_KEY;
use crate::version::error::CacheError;
use crate::version::types::{VersionInfo, current_timestamp_ms};

/// Read/write access to the persisted check record
///
/// All methods are best-effort: failures are logged and surface as absence,
/// never as errors.
#[cfg_attr(test, automock)]
pub trait VersionStore: Send + Sync {
    /// Load the stored record, if one exists and is still valid for
    /// `current_version`
    fn load(&self, current_version: &str) -> Option<VersionInfo>;

    /// Persist a resolved record
    fn store(&self, info: &VersionInfo);

    /// Drop the stored record
    fn clear(&self);
}

/// SQLite-backed [`VersionStore`]
pub struct SqliteStore {
    conn: Mutex<Connection>,
    ttl_ms: i64,
}

impl SqliteStore {
    pub fn new(db_path: &Path, ttl_ms: i64) -> Result<Self, CacheError> {
        info!("Initializing cache database at {:?}", db_path);

        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        let store = Self {
            conn: Mutex::new(conn),
            ttl_ms,
        };

        store.create_schema()?;
        debug!("Cache initialized");

        Ok(store)
    }

    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>, CacheError> {
        self.conn.lock().map_err(|_| CacheError::LockPoisoned)
    }

    fn create_schema(&self) -> Result<(), CacheError> {
        let conn = self.lock_conn()?;
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )
            "#,
            [],
        )?;
        Ok(())
    }

    fn read_raw(&self) -> Result<Option<String>, CacheError> {
        let conn = self.lock_conn()?;
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [CACHE_KEY], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write_raw(&self, value: &str) -> Result<(), CacheError> {
        let conn = self.lock_conn()?;
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (CACHE_KEY, value),
        )?;
        Ok(())
    }

    fn delete(&self) -> Result<(), CacheError> {
        let conn = self.lock_conn()?;
        conn.execute("DELETE FROM kv WHERE key = ?1", [CACHE_KEY])?;
        Ok(())
    }

    /// Delete the record, logging instead of failing
    fn purge(&self, reason: &str) {
        debug!("Purging cached version info: {}", reason);
        if let Err(e) = self.delete() {
            warn!("Failed to purge cached version info: {}", e);
        }
    }
}

impl VersionStore for SqliteStore {
    fn load(&self, current_version: &str) -> Option<VersionInfo> {
        let raw = match self.read_raw() {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read cached version info: {}", e);
                return None;
            }
        };

        let info: VersionInfo = match serde_json::from_str(&raw) {
            Ok(info) => info,
            Err(e) => {
                warn!("Failed to parse cached version info: {}", e);
                self.purge("corrupt record");
                return None;
            }
        };

        let now = current_timestamp_ms();
        if now - info.last_check_time > self.ttl_ms {
            self.purge("record expired");
            return None;
        }

        if info.current_version != current_version {
            self.purge("record from a different build");
            return None;
        }

        Some(info)
    }

    fn store(&self, info: &VersionInfo) {
        let serialized = match serde_json::to_string(info) {
            Ok(s) => s,
            Err(e) => {
                warn!("Failed to serialize version info: {}", e);
                return;
            }
        };

        if let Err(e) = self.write_raw(&serialized) {
            warn!("Failed to cache version info: {}", e);
        }
    }

    fn clear(&self) {
        if let Err(e) = self.delete() {
            warn!("Failed to clear cached version info: {}", e);
        }
    }
}
