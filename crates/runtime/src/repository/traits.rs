//! Repository contracts for loading and saving encounter participants.

use arena_core::{Character, CharacterId, Item, ItemId};

use super::{RecordKind, RepositoryError, Result};

/// Repository for character persistence.
///
/// Characters are stored together with their equipment (item references
/// only; item records live in an [`ItemRepository`]).
pub trait CharacterRepository: Send + Sync {
    /// Insert or replace a character.
    fn save(&self, character: &Character) -> Result<()>;

    /// Load a character by id.
    fn load(&self, id: CharacterId) -> Result<Option<Character>>;

    /// Check if a character exists
    fn exists(&self, id: CharacterId) -> bool;

    /// Delete a character
    fn delete(&self, id: CharacterId) -> Result<()>;

    /// List all stored character ids in ascending order
    fn list_ids(&self) -> Result<Vec<CharacterId>>;

    /// Load a character that must exist.
    fn fetch(&self, id: CharacterId) -> Result<Character> {
        self.load(id)?.ok_or(RepositoryError::NotFound {
            kind: RecordKind::Character,
            id: id.0,
        })
    }
}

/// Repository for item persistence.
///
/// Every item variant lives in the same repository.
pub trait ItemRepository: Send + Sync {
    /// Insert or replace an item.
    fn save(&self, item: &Item) -> Result<()>;

    /// Load an item by id.
    fn load(&self, id: ItemId) -> Result<Option<Item>>;

    /// Check if an item exists
    fn exists(&self, id: ItemId) -> bool;

    /// Delete an item
    fn delete(&self, id: ItemId) -> Result<()>;

    /// List all stored item ids in ascending order
    fn list_ids(&self) -> Result<Vec<ItemId>>;

    /// Load an item that must exist.
    fn fetch(&self, id: ItemId) -> Result<Item> {
        self.load(id)?.ok_or(RepositoryError::NotFound {
            kind: RecordKind::Item,
            id: id.0,
        })
    }
}
