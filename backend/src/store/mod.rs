//! Persistence seam for booking documents.
//!
//! The intake handler only ever needs one capability from storage: create a document
//! in a named collection and learn the identifier the store generated for it.
//! [`DocumentStore`] captures exactly that, and [`SqliteStore`] provides it on top
//! of a local SQLite file.

mod sqlite;

pub use sqlite::SqliteStore;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage worker failed: {0}")]
    Worker(String),
}

pub trait DocumentStore: Send + Sync {
    /// Stores `document` in `collection` and returns its generated id.
    fn create(&self, collection: &str, document: &Value) -> Result<String, StoreError>;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{DocumentStore, StoreError};
    use serde_json::Value;
    use std::sync::Mutex;

    /// Keeps created documents in memory, in creation order.
    #[derive(Default)]
    pub struct MemoryStore {
        pub documents: Mutex<Vec<(String, String, Value)>>,
    }

    impl MemoryStore {
        pub fn created(&self) -> Vec<(String, String, Value)> {
            self.documents.lock().unwrap().clone()
        }
    }

    impl DocumentStore for MemoryStore {
        fn create(&self, collection: &str, document: &Value) -> Result<String, StoreError> {
            let mut documents = self.documents.lock().unwrap();
            let id = format!("doc-{}", documents.len() + 1);
            documents.push((id.clone(), collection.to_string(), document.clone()));
            Ok(id)
        }
    }

    /// Fails every create with a detailed error.
    pub struct FailingStore;

    impl DocumentStore for FailingStore {
        fn create(&self, _collection: &str, _document: &Value) -> Result<String, StoreError> {
            Err(StoreError::Worker(
                "disk quota exceeded on /var/lib/secret-volume".to_string(),
            ))
        }
    }
}
