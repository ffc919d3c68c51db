//! In-memory ItemRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use arena_core::{Item, ItemId};

use crate::repository::{ItemRepository, RepositoryError, Result};

/// In-memory implementation of ItemRepository holding every item variant.
pub struct InMemoryItemRepo {
    items: RwLock<BTreeMap<ItemId, Item>>,
}

impl InMemoryItemRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            items: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create pre-populated with `items`.
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let items = items.into_iter().map(|item| (item.id, item)).collect();
        Self {
            items: RwLock::new(items),
        }
    }
}

impl Default for InMemoryItemRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemRepository for InMemoryItemRepo {
    fn save(&self, item: &Item) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        items.insert(item.id, item.clone());
        Ok(())
    }

    fn load(&self, id: ItemId) -> Result<Option<Item>> {
        let items = self
            .items
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(items.get(&id).cloned())
    }

    fn exists(&self, id: ItemId) -> bool {
        self.items
            .read()
            .map(|items| items.contains_key(&id))
            .unwrap_or(false)
    }

    fn delete(&self, id: ItemId) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        items.remove(&id);
        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<ItemId>> {
        let items = self
            .items
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(items.keys().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weapons_and_armor_share_one_repository() {
        let repo = InMemoryItemRepo::with_items([
            Item::weapon(ItemId(1), "Sword", 10, 5),
            Item::armor(ItemId(2), "Mail", 4, 5),
        ]);

        assert!(repo.fetch(ItemId(1)).unwrap().as_weapon().is_some());
        assert!(repo.fetch(ItemId(2)).unwrap().as_armor().is_some());
    }

    #[test]
    fn save_replaces_existing() {
        let repo = InMemoryItemRepo::new();
        let mut sword = Item::weapon(ItemId(1), "Sword", 10, 5);
        repo.save(&sword).unwrap();

        sword.wear();
        repo.save(&sword).unwrap();

        assert_eq!(repo.fetch(ItemId(1)).unwrap().durability().0, 4);
        assert_eq!(repo.list_ids().unwrap(), vec![ItemId(1)]);
    }
}
