//! SQLite-backed local storage for drafts and auth state.
//!
//! The browser wizard keeps its drafts and tokens in `localStorage`. This
//! module provides the same key/value surface over a single SQLite table so
//! the keys and JSON values stay byte-compatible:
//!
//! - `draft_{section}_{subsection}_{editId|new}`: a [`DraftSnapshot`] as JSON
//! - `access_token` / `refresh_token`: raw JWTs
//! - `auth-storage`: the serialized auth store
//!
//! A [`LocalStorage`] is opened per operation and dropped afterwards.
//!
//! [`DraftSnapshot`]: crate::models::DraftSnapshot

use std::path::Path;

use rusqlite::Connection;
use tokio::task;

use crate::error::{PlanningError, Result, StorageResultExt};

pub mod drafts;
pub mod schema;
pub mod storage_queries;

pub use drafts::{DraftLoad, StoredDraft};

/// Prefix shared by every draft key.
pub const DRAFT_KEY_PREFIX: &str = "draft_";
/// Key of the stored access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Key of the stored refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
/// Key of the serialized auth store.
pub const AUTH_STORE_KEY: &str = "auth-storage";

/// Local storage connection and operations handler.
pub struct LocalStorage {
    connection: Connection,
}

impl LocalStorage {
    /// Opens the store and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection =
            Connection::open(path).storage_context("Failed to open local storage")?;

        let storage = Self { connection };
        storage.initialize_schema()?;
        Ok(storage)
    }
}

/// Runs `operation` against a freshly opened store on the blocking pool.
pub(crate) async fn blocking<T, F>(db_path: &Path, operation: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&mut LocalStorage) -> Result<T> + Send + 'static,
{
    let db_path = db_path.to_path_buf();
    task::spawn_blocking(move || {
        let mut storage = LocalStorage::new(&db_path)?;
        operation(&mut storage)
    })
    .await
    .map_err(|e| PlanningError::Configuration {
        message: format!("Task join error: {e}"),
    })?
}
