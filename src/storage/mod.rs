//! Key-value storage the loaders read course data from.
//!
//! Loaders never reach for ambient state: a [`Storage`] handle is passed
//! in, so tests can swap the SQLite store for [`MemoryStorage`].

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use anyhow::Result;
use async_trait::async_trait;

/// A string-keyed store of text blobs. Could be SQLite, in-memory, etc.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Get the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>>;
    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    /// Remove `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
