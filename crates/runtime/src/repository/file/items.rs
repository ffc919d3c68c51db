//! File-based ItemRepository implementation.

use std::path::Path;

use arena_core::{Item, ItemId};

use super::table::JsonTable;
use crate::repository::{ItemRecord, ItemRepository, Result};

/// Stores every item variant as rows of a single `items.json` table.
pub struct FileItemRepository {
    table: JsonTable,
}

impl FileItemRepository {
    pub const FILE_NAME: &'static str = "items.json";

    /// Create a repository rooted at `base_dir`, creating the directory.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            table: JsonTable::open(base_dir.as_ref(), Self::FILE_NAME)?,
        })
    }
}

impl ItemRepository for FileItemRepository {
    fn save(&self, item: &Item) -> Result<()> {
        let record = ItemRecord::from(item);
        self.table.modify::<ItemRecord, _>(|rows| {
            rows.insert(record.id, record);
        })?;

        tracing::debug!(
            "Saved {} ({}) to {}",
            item.id,
            item.name,
            self.table.path().display()
        );
        Ok(())
    }

    fn load(&self, id: ItemId) -> Result<Option<Item>> {
        self.table
            .get::<ItemRecord>(id.0)?
            .map(Item::try_from)
            .transpose()
    }

    fn exists(&self, id: ItemId) -> bool {
        self.table
            .read_all::<ItemRecord>()
            .map(|rows| rows.contains_key(&id.0))
            .unwrap_or(false)
    }

    fn delete(&self, id: ItemId) -> Result<()> {
        self.table.modify::<ItemRecord, _>(|rows| {
            rows.remove(&id.0);
        })?;
        tracing::debug!("Deleted {}", id);
        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<ItemId>> {
        let rows = self.table.read_all::<ItemRecord>()?;
        Ok(rows.keys().copied().map(ItemId).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepositoryError;

    #[test]
    fn one_table_holds_both_kinds() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileItemRepository::new(dir.path()).unwrap();
        let sword = Item::weapon(ItemId(1), "Sword", 12, 30).with_description("sharp");
        let mail = Item::armor(ItemId(2), "Mail", 5, 40).with_value(80);

        repo.save(&sword).unwrap();
        repo.save(&mail).unwrap();

        assert_eq!(repo.fetch(ItemId(1)).unwrap(), sword);
        assert_eq!(repo.fetch(ItemId(2)).unwrap(), mail);
        assert_eq!(repo.list_ids().unwrap(), vec![ItemId(1), ItemId(2)]);

        let raw = std::fs::read_to_string(dir.path().join(FileItemRepository::FILE_NAME)).unwrap();
        assert!(raw.contains("\"tag\": \"weapon\""));
        assert!(raw.contains("\"tag\": \"armor\""));
    }

    #[test]
    fn delete_removes_row() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileItemRepository::new(dir.path()).unwrap();
        repo.save(&Item::weapon(ItemId(1), "Sword", 12, 30)).unwrap();

        repo.delete(ItemId(1)).unwrap();

        assert!(!repo.exists(ItemId(1)));
        assert!(matches!(
            repo.fetch(ItemId(1)),
            Err(RepositoryError::NotFound { id: 1, .. })
        ));
    }
}
