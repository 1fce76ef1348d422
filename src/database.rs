use rusqlite::{Connection, OptionalExtension};
use std::path::PathBuf;

use crate::store::{KeyValueStore, StoreError};

/// SQLite-backed key-value store. One table, one row per key.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create a new database connection and initialize the schema
    pub fn new(path: &str) -> Result<Self, StoreError> {
        let db_path = PathBuf::from(path);

        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StoreError::DirectoryError(e.to_string()))?;
            }
        }

        let conn = Connection::open(&db_path)?;
        tracing::info!(path = %db_path.display(), "opened store");

        let db = Database { conn };
        db.initialize_schema()?;

        Ok(db)
    }

    /// Open a throwaway database that lives only as long as the connection
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let db = Database {
            conn: Connection::open_in_memory()?,
        };
        db.initialize_schema()?;
        Ok(db)
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key             TEXT PRIMARY KEY,
                value           TEXT NOT NULL,
                updated_at      TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Number of stored keys
    pub fn key_count(&self) -> Result<i64, StoreError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))?;
        Ok(count)
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                rusqlite::params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let now = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            rusqlite::params![key, value, now],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", rusqlite::params![key])?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM kv_store", [])?;
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_overwrites_previous_value() {
        let db = Database::open_in_memory().unwrap();
        db.set("TASK_DONE_DAY", "3").unwrap();
        db.set("TASK_DONE_DAY", "7").unwrap();
        assert_eq!(db.get("TASK_DONE_DAY").unwrap().as_deref(), Some("7"));
        assert_eq!(db.key_count().unwrap(), 1);
    }

    #[test]
    fn missing_key_reads_as_none_and_remove_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get("PROFILE").unwrap(), None);
        db.remove("PROFILE").unwrap();

        db.set("PROFILE", "{}").unwrap();
        db.remove("PROFILE").unwrap();
        assert_eq!(db.get("PROFILE").unwrap(), None);
    }

    #[test]
    fn clear_drops_every_key() {
        let db = Database::open_in_memory().unwrap();
        db.set("a", "1").unwrap();
        db.set("b", "2").unwrap();
        db.clear().unwrap();
        assert_eq!(db.key_count().unwrap(), 0);
    }

    #[test]
    fn creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("zenpets.db");
        let db = Database::new(path.to_str().unwrap()).unwrap();
        db.set("k", "v").unwrap();
        assert!(path.exists());
    }
}
