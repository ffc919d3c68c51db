//! File-based CharacterRepository implementation.

use std::path::Path;

use arena_core::{Character, CharacterId};

use super::table::JsonTable;
use crate::repository::{CharacterRecord, CharacterRepository, Result};

/// Stores characters as rows of `characters.json`.
///
/// Equipment is flattened into the character row as item references.
pub struct FileCharacterRepository {
    table: JsonTable,
}

impl FileCharacterRepository {
    pub const FILE_NAME: &'static str = "characters.json";

    /// Create a repository rooted at `base_dir`, creating the directory.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            table: JsonTable::open(base_dir.as_ref(), Self::FILE_NAME)?,
        })
    }
}

impl CharacterRepository for FileCharacterRepository {
    fn save(&self, character: &Character) -> Result<()> {
        let record = CharacterRecord::from(character);
        self.table.modify::<CharacterRecord, _>(|rows| {
            rows.insert(record.id, record);
        })?;

        tracing::debug!(
            "Saved {} ({}) to {}",
            character.id,
            character.name,
            self.table.path().display()
        );
        Ok(())
    }

    fn load(&self, id: CharacterId) -> Result<Option<Character>> {
        let Some(record) = self.table.get::<CharacterRecord>(id.0)? else {
            return Ok(None);
        };
        let character = Character::try_from(record)?;

        tracing::debug!("Loaded {} from {}", id, self.table.path().display());
        Ok(Some(character))
    }

    fn exists(&self, id: CharacterId) -> bool {
        self.table
            .read_all::<CharacterRecord>()
            .map(|rows| rows.contains_key(&id.0))
            .unwrap_or(false)
    }

    fn delete(&self, id: CharacterId) -> Result<()> {
        self.table.modify::<CharacterRecord, _>(|rows| {
            rows.remove(&id.0);
        })?;
        tracing::debug!("Deleted {}", id);
        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<CharacterId>> {
        let rows = self.table.read_all::<CharacterRecord>()?;
        Ok(rows.keys().copied().map(CharacterId).collect())
    }
}

#[cfg(test)]
mod tests {
    use arena_core::{Equipment, EquipmentId, ItemId};

    use super::*;

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileCharacterRepository::new(dir.path()).unwrap();
        let mut hero = Character::player(CharacterId(0), "Hero", 40)
            .with_equipment(Equipment::builder(EquipmentId(1)).armor(ItemId(2)).build());
        hero.health.apply_damage(15);

        repo.save(&hero).unwrap();
        let reopened = FileCharacterRepository::new(dir.path()).unwrap();

        assert_eq!(reopened.fetch(CharacterId(0)).unwrap(), hero);
        assert!(dir.path().join(FileCharacterRepository::FILE_NAME).exists());
    }

    #[test]
    fn missing_table_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileCharacterRepository::new(dir.path()).unwrap();

        assert_eq!(repo.load(CharacterId(1)).unwrap(), None);
        assert!(repo.list_ids().unwrap().is_empty());
        assert!(!repo.exists(CharacterId(1)));
    }

    #[test]
    fn garbage_table_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(FileCharacterRepository::FILE_NAME), "not json").unwrap();
        let repo = FileCharacterRepository::new(dir.path()).unwrap();

        assert!(matches!(
            repo.load(CharacterId(0)),
            Err(crate::repository::RepositoryError::Json(_))
        ));
    }
}
