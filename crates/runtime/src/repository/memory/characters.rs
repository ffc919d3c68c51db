//! In-memory CharacterRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use arena_core::{Character, CharacterId};

use crate::repository::{CharacterRepository, RepositoryError, Result};

/// In-memory implementation of CharacterRepository.
///
/// Stores characters by value, so saved copies are isolated from later
/// mutations of the caller's instance.
pub struct InMemoryCharacterRepo {
    characters: RwLock<BTreeMap<CharacterId, Character>>,
}

impl InMemoryCharacterRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            characters: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create pre-populated with `characters`.
    pub fn with_characters(characters: impl IntoIterator<Item = Character>) -> Self {
        let characters = characters.into_iter().map(|c| (c.id, c)).collect();
        Self {
            characters: RwLock::new(characters),
        }
    }
}

impl Default for InMemoryCharacterRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterRepository for InMemoryCharacterRepo {
    fn save(&self, character: &Character) -> Result<()> {
        let mut characters = self
            .characters
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        characters.insert(character.id, character.clone());
        Ok(())
    }

    fn load(&self, id: CharacterId) -> Result<Option<Character>> {
        let characters = self
            .characters
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(characters.get(&id).cloned())
    }

    fn exists(&self, id: CharacterId) -> bool {
        self.characters
            .read()
            .map(|characters| characters.contains_key(&id))
            .unwrap_or(false)
    }

    fn delete(&self, id: CharacterId) -> Result<()> {
        let mut characters = self
            .characters
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        characters.remove(&id);
        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<CharacterId>> {
        let characters = self
            .characters
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(characters.keys().copied().collect())
    }
}
