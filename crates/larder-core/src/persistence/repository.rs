//! Repository for CRUD operations on stored items

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::params;

use super::schema::{Schema, SCHEMA_VERSION};
use crate::error::{PersistenceError, Result};
use crate::item::{Item, ItemDraft};

const ITEM_COLUMNS: &str = "id, name, description, storage_type, date_stored, use_by_date";

/// Repository for persisting items
pub struct Repository {
    conn: rusqlite::Connection,
}

impl Repository {
    /// Create a new repository with the given database path
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let conn = rusqlite::Connection::open(path)?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    /// Create an in-memory repository (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = rusqlite::Connection::open_in_memory()?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    /// Initialize the database schema
    fn initialize(&self) -> Result<()> {
        let current_version = self.get_schema_version().unwrap_or(0);

        if current_version == 0 {
            // Fresh database, create all tables
            self.conn.execute_batch(Schema::create_tables())?;
            self.set_schema_version(SCHEMA_VERSION)?;
        } else if current_version < SCHEMA_VERSION {
            for version in current_version..SCHEMA_VERSION {
                match Schema::migration(version, version + 1) {
                    Some(migration) => self.conn.execute_batch(migration)?,
                    None => {
                        return Err(PersistenceError::Migration(format!(
                            "no migration from schema version {} to {}",
                            version,
                            version + 1
                        ))
                        .into())
                    }
                }
            }
            self.set_schema_version(SCHEMA_VERSION)?;
        }

        Ok(())
    }

    fn get_schema_version(&self) -> Option<u32> {
        self.conn
            .query_row(
                "SELECT version FROM schema_version ORDER BY applied_at DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .ok()
    }

    fn set_schema_version(&self, version: u32) -> Result<()> {
        self.conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [version],
        )?;
        Ok(())
    }

    /// Insert a new item; the store assigns the id. Returns the stored row.
    pub fn insert_item(&self, draft: &ItemDraft) -> Result<Item> {
        let item = self.conn.query_row(
            &format!(
                "INSERT INTO food_items (name, description, storage_type, date_stored, use_by_date)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING {ITEM_COLUMNS}"
            ),
            params![
                draft.name,
                draft.description,
                draft.storage_type,
                draft.date_stored.to_string(),
                draft.use_by_date.to_string(),
            ],
            Self::row_to_item,
        )?;

        Ok(item)
    }

    /// Get an item by id
    pub fn get_item(&self, id: i64) -> Result<Option<Item>> {
        let result = self.conn.query_row(
            &format!("SELECT {ITEM_COLUMNS} FROM food_items WHERE id = ?1"),
            [id],
            Self::row_to_item,
        );

        match result {
            Ok(item) => Ok(Some(item)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(PersistenceError::from(e).into()),
        }
    }

    /// Get all items, ordered by ascending id
    pub fn list_items(&self) -> Result<Vec<Item>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ITEM_COLUMNS} FROM food_items ORDER BY id ASC"
        ))?;

        let items = stmt
            .query_map([], Self::row_to_item)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(items)
    }

    /// Replace all five fields of the row matching `id`.
    ///
    /// Returns `None` when no row matches.
    pub fn update_item(&self, id: i64, draft: &ItemDraft) -> Result<Option<Item>> {
        let result = self.conn.query_row(
            &format!(
                "UPDATE food_items
                 SET name = ?1, description = ?2, storage_type = ?3,
                     date_stored = ?4, use_by_date = ?5
                 WHERE id = ?6
                 RETURNING {ITEM_COLUMNS}"
            ),
            params![
                draft.name,
                draft.description,
                draft.storage_type,
                draft.date_stored.to_string(),
                draft.use_by_date.to_string(),
                id,
            ],
            Self::row_to_item,
        );

        match result {
            Ok(item) => Ok(Some(item)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(PersistenceError::from(e).into()),
        }
    }

    /// Remove the row matching `id`, returning its prior contents.
    ///
    /// Returns `None` when no row matches.
    pub fn delete_item(&self, id: i64) -> Result<Option<Item>> {
        let result = self.conn.query_row(
            &format!("DELETE FROM food_items WHERE id = ?1 RETURNING {ITEM_COLUMNS}"),
            [id],
            Self::row_to_item,
        );

        match result {
            Ok(item) => Ok(Some(item)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(PersistenceError::from(e).into()),
        }
    }

    fn row_to_item(row: &rusqlite::Row) -> rusqlite::Result<Item> {
        Ok(Item {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            storage_type: row.get(3)?,
            date_stored: Self::column_to_date(row, 4)?,
            use_by_date: Self::column_to_date(row, 5)?,
            days_left: None,
        })
    }

    fn column_to_date(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<NaiveDate> {
        let text: String = row.get(idx)?;
        text.parse().map_err(|e: chrono::ParseError| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milk_draft() -> ItemDraft {
        ItemDraft {
            name: "Milk".to_string(),
            description: Some("whole".to_string()),
            storage_type: "fridge".to_string(),
            date_stored: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            use_by_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        }
    }

    #[test]
    fn test_repository_creation() {
        let repo = Repository::in_memory().unwrap();
        assert!(repo.list_items().unwrap().is_empty());
    }

    #[test]
    fn test_on_disk_database_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("larder.db");

        {
            let repo = Repository::new(&path).unwrap();
            repo.insert_item(&milk_draft()).unwrap();
        }

        let repo = Repository::new(&path).unwrap();
        assert_eq!(repo.list_items().unwrap().len(), 1);
    }

    #[test]
    fn test_insert_assigns_id_and_returns_fields() {
        let repo = Repository::in_memory().unwrap();

        let item = repo.insert_item(&milk_draft()).unwrap();
        assert!(item.id > 0);
        assert_eq!(item.name, "Milk");
        assert_eq!(item.storage_type, "fridge");
        // days_left is never attached by the store
        assert_eq!(item.days_left, None);

        let fetched = repo.get_item(item.id).unwrap().unwrap();
        assert_eq!(fetched, item);
    }

    #[test]
    fn test_list_ordered_by_id() {
        let repo = Repository::in_memory().unwrap();

        let first = repo.insert_item(&milk_draft()).unwrap();
        let mut draft = milk_draft();
        draft.name = "Bread".to_string();
        let second = repo.insert_item(&draft).unwrap();

        let items = repo.list_items().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, first.id);
        assert_eq!(items[1].id, second.id);
    }

    #[test]
    fn test_update_replaces_all_fields() {
        let repo = Repository::in_memory().unwrap();
        let item = repo.insert_item(&milk_draft()).unwrap();

        let replacement = ItemDraft {
            name: "Oat milk".to_string(),
            description: None,
            storage_type: "pantry".to_string(),
            date_stored: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            use_by_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };
        let updated = repo.update_item(item.id, &replacement).unwrap().unwrap();

        assert_eq!(updated.id, item.id);
        assert_eq!(updated.name, "Oat milk");
        assert_eq!(updated.description, None);
        assert_eq!(updated.storage_type, "pantry");
        assert_eq!(repo.list_items().unwrap().len(), 1);
    }

    #[test]
    fn test_update_missing_returns_none() {
        let repo = Repository::in_memory().unwrap();
        repo.insert_item(&milk_draft()).unwrap();

        assert!(repo.update_item(999, &milk_draft()).unwrap().is_none());
        // The list is untouched
        assert_eq!(repo.list_items().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_returns_prior_row() {
        let repo = Repository::in_memory().unwrap();
        let item = repo.insert_item(&milk_draft()).unwrap();

        let removed = repo.delete_item(item.id).unwrap().unwrap();
        assert_eq!(removed, item);
        assert!(repo.list_items().unwrap().is_empty());
        assert!(repo.get_item(item.id).unwrap().is_none());
    }

    #[test]
    fn test_delete_missing_returns_none() {
        let repo = Repository::in_memory().unwrap();
        repo.insert_item(&milk_draft()).unwrap();

        assert!(repo.delete_item(999).unwrap().is_none());
        assert_eq!(repo.list_items().unwrap().len(), 1);
    }
}
