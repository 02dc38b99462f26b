//! Schema initialization.

use crate::error::{Result, StorageResultExt};

impl super::LocalStorage {
    /// Creates the key/value table from the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .storage_context("Failed to initialize local storage schema")
    }
}
