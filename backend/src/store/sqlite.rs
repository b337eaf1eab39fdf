use super::{DocumentStore, StoreError};
use chrono::Utc;
use rusqlite::{params, Connection};
use serde_json::Value;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// SQLite-backed document store.
///
/// Each document is a row holding its collection name and the JSON text. A fresh
/// connection is opened per call, so the store itself holds no connection state and
/// can be shared freely between workers.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `path` and ensures the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let store = SqliteStore {
            path: path.as_ref().to_path_buf(),
        };
        let conn = store.connect()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS documents (
                id TEXT PRIMARY KEY,
                collection TEXT NOT NULL,
                data TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS documents_collection ON documents (collection);",
        )?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of documents stored in `collection`.
    pub fn count(&self, collection: &str) -> Result<u64, StoreError> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1",
            params![collection],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        Ok(Connection::open(&self.path)?)
    }
}

impl DocumentStore for SqliteStore {
    fn create(&self, collection: &str, document: &Value) -> Result<String, StoreError> {
        let data = serde_json::to_string(document)?;
        let id = Uuid::new_v4().to_string();

        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO documents (id, collection, data, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![&id, collection, &data, Utc::now().to_rfc3339()],
        )?;

        Ok(id)
    }
}
