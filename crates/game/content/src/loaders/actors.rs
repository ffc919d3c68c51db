//! Actor roster loader.
//!
//! Loads players and adversaries, with their abilities and starting
//! equipment, from RON files.

use std::path::Path;

use arena_core::{
    Ability, AbilitySet, Character, CharacterId, CharacterKind, Equipment, EquipmentId, Health,
    ItemId,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Character variant as written in roster files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KindSpec {
    Player,
    Goblin {
        #[serde(default)]
        loot: Option<ItemId>,
    },
}

/// Starting equipment as written in roster files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentSpec {
    pub id: EquipmentId,
    #[serde(default)]
    pub weapon: Option<ItemId>,
    #[serde(default)]
    pub armor: Option<ItemId>,
}

/// One roster entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSpec {
    pub id: CharacterId,
    pub name: String,
    pub kind: KindSpec,
    /// Maximum (and starting) health.
    pub health: u32,
    #[serde(default)]
    pub abilities: Vec<Ability>,
    #[serde(default)]
    pub equipment: Option<EquipmentSpec>,
}

impl ActorSpec {
    /// Builds the runtime character described by this entry.
    pub fn into_character(self) -> Character {
        let kind = match self.kind {
            KindSpec::Player => CharacterKind::Player,
            KindSpec::Goblin { loot } => CharacterKind::Goblin { loot },
        };
        let abilities: AbilitySet = self.abilities.into_iter().collect();

        let character = Character::new(self.id, self.name, Health::full(self.health), kind)
            .with_abilities(abilities);

        match self.equipment {
            Some(spec) => character.with_equipment(
                Equipment::builder(spec.id)
                    .slots(spec.weapon, spec.armor)
                    .build(),
            ),
            None => character,
        }
    }
}

/// Loader for the actor roster from RON files.
pub struct ActorLoader;

impl ActorLoader {
    /// Load the roster from a RON file.
    ///
    /// RON format: `Vec<ActorSpec>`
    pub fn load(path: &Path) -> LoadResult<Vec<ActorSpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ActorSpec>> {
        let actors: Vec<ActorSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse actor roster RON: {}", e))?;

        Ok(actors)
    }
}
