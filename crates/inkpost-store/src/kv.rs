//! Key-value storage with change notifications.

use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use tokio::sync::broadcast;

use crate::database::Database;
use crate::error::{Result, StoreError};

/// Capacity of the change-notification channel. Slow subscribers see
/// `RecvError::Lagged` and should simply re-read.
const EVENT_CAPACITY: usize = 64;

/// A change to the store. `key` is `None` when everything was cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: Option<String>,
}

/// String key-value storage shared by every view of the application.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Returns whether it was present.
    fn remove(&self, key: &str) -> Result<bool>;

    fn clear(&self) -> Result<()>;

    /// Receive a [`StorageEvent`] after every successful write.
    fn subscribe(&self) -> broadcast::Receiver<StorageEvent>;
}

/// [`KeyValueStore`] backed by the `kv_store` table.
pub struct SqliteStore {
    db: Mutex<Database>,
    events: broadcast::Sender<StorageEvent>,
}

impl SqliteStore {
    pub fn new(db: Database) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            db: Mutex::new(db),
            events,
        }
    }

    /// Store backed by an in-memory database.
    pub fn in_memory() -> Result<Self> {
        Ok(Self::new(Database::open_in_memory()?))
    }

    fn with_db<T>(&self, f: impl FnOnce(&Database) -> Result<T>) -> Result<T> {
        let guard = self.db.lock().map_err(|_| StoreError::LockPoisoned)?;
        f(&guard)
    }

    fn notify(&self, key: Option<&str>) {
        // No receivers is fine: nobody is listening yet.
        let _ = self.events.send(StorageEvent {
            key: key.map(String::from),
        });
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_db(|db| {
            let value = db
                .conn()
                .query_row(
                    "SELECT value FROM kv_store WHERE key = ?1",
                    params![key],
                    |row| row.get::<_, String>(0),
                )
                .optional()?;
            Ok(value)
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.with_db(|db| {
            db.conn().execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )?;
            Ok(())
        })?;
        tracing::debug!(key, "storage key written");
        self.notify(Some(key));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let affected = self.with_db(|db| {
            Ok(db
                .conn()
                .execute("DELETE FROM kv_store WHERE key = ?1", params![key])?)
        })?;
        if affected > 0 {
            tracing::debug!(key, "storage key removed");
            self.notify(Some(key));
        }
        Ok(affected > 0)
    }

    fn clear(&self) -> Result<()> {
        self.with_db(|db| {
            db.conn().execute("DELETE FROM kv_store", [])?;
            Ok(())
        })?;
        self.notify(None);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.events.subscribe()
    }
}
