//! Raw key/value access.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use crate::error::{Result, StorageResultExt};

const SELECT_ITEM_SQL: &str = "SELECT value FROM local_storage WHERE key = ?1";
const UPSERT_ITEM_SQL: &str = "INSERT INTO local_storage (key, value, updated_at) VALUES (?1, ?2, ?3) \
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";
const DELETE_ITEM_SQL: &str = "DELETE FROM local_storage WHERE key = ?1";
const SELECT_KEYS_WITH_PREFIX_SQL: &str =
    "SELECT key FROM local_storage WHERE substr(key, 1, length(?1)) = ?1 ORDER BY key";

impl super::LocalStorage {
    /// Value stored under `key`, if any.
    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.connection
            .query_row(SELECT_ITEM_SQL, params![key], |row| row.get(0))
            .optional()
            .storage_context("Failed to read local storage item")
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let now = Timestamp::now().to_string();
        self.connection
            .execute(UPSERT_ITEM_SQL, params![key, value, now])
            .storage_context("Failed to write local storage item")?;
        Ok(())
    }

    /// Removes `key`. Returns whether anything was stored.
    pub fn remove_item(&mut self, key: &str) -> Result<bool> {
        let removed = self
            .connection
            .execute(DELETE_ITEM_SQL, params![key])
            .storage_context("Failed to remove local storage item")?;
        Ok(removed > 0)
    }

    /// All keys starting with `prefix`, sorted.
    ///
    /// Matches with `substr` rather than `LIKE` because draft keys contain
    /// underscores.
    pub fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_KEYS_WITH_PREFIX_SQL)
            .storage_context("Failed to prepare key listing")?;

        let keys = stmt
            .query_map(params![prefix], |row| row.get::<_, String>(0))
            .storage_context("Failed to list local storage keys")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .storage_context("Failed to read local storage key")?;

        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::super::LocalStorage;

    fn open() -> (TempDir, LocalStorage) {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().join("local.db")).unwrap();
        (dir, storage)
    }

    #[test]
    fn test_set_get_overwrite_remove() {
        let (_dir, mut storage) = open();
        assert_eq!(storage.get_item("access_token").unwrap(), None);

        storage.set_item("access_token", "one").unwrap();
        storage.set_item("access_token", "two").unwrap();
        assert_eq!(storage.get_item("access_token").unwrap().as_deref(), Some("two"));

        assert!(storage.remove_item("access_token").unwrap());
        assert!(!storage.remove_item("access_token").unwrap());
    }

    #[test]
    fn test_prefix_listing_treats_underscore_literally() {
        let (_dir, mut storage) = open();
        storage.set_item("draft_social_wedding_new", "{}").unwrap();
        storage.set_item("draft_corporate_conference_3", "{}").unwrap();
        storage.set_item("draftXsocial", "{}").unwrap();
        storage.set_item("refresh_token", "t").unwrap();

        assert_eq!(
            storage.keys_with_prefix("draft_").unwrap(),
            vec!["draft_corporate_conference_3", "draft_social_wedding_new"]
        );
    }
}
