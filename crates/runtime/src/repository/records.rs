//! Flat storage rows.
//!
//! Items of every kind share one row shape: the `tag` column says which
//! variant the row holds, and variant columns unused by that kind stay
//! empty. Characters flatten their equipment into the same row.

use arena_core::{
    AbilitySet, ArmorData, Character, CharacterId, CharacterKind, Durability, Equipment,
    EquipmentId, Health, Item, ItemId, ItemKind, ItemTag, WeaponData,
};
use serde::{Deserialize, Serialize};

use super::RepositoryError;

/// One row of the item table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: u32,
    pub tag: ItemTag,
    pub name: String,
    pub value: u32,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_power: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defense_rating: Option<u32>,
    pub durability: u32,
}

impl From<&Item> for ItemRecord {
    fn from(item: &Item) -> Self {
        let (attack_power, defense_rating, durability) = match item.kind {
            ItemKind::Weapon(data) => (Some(data.attack_power), None, data.durability),
            ItemKind::Armor(data) => (None, Some(data.defense_rating), data.durability),
        };

        Self {
            id: item.id.0,
            tag: item.tag(),
            name: item.name.clone(),
            value: item.value,
            description: item.description.clone(),
            attack_power,
            defense_rating,
            durability: durability.0,
        }
    }
}

impl TryFrom<ItemRecord> for Item {
    type Error = RepositoryError;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        let durability = Durability(record.durability);
        let kind = match (record.tag, record.attack_power, record.defense_rating) {
            (ItemTag::Weapon, Some(attack_power), None) => ItemKind::Weapon(WeaponData {
                attack_power,
                durability,
            }),
            (ItemTag::Armor, None, Some(defense_rating)) => ItemKind::Armor(ArmorData {
                defense_rating,
                durability,
            }),
            (tag, _, _) => {
                return Err(RepositoryError::CorruptedData(format!(
                    "item row {} tagged {} has mismatched stat columns",
                    record.id, tag
                )));
            }
        };

        Ok(Item::new(
            ItemId(record.id),
            record.name,
            record.value,
            record.description,
            kind,
        ))
    }
}

/// Character variant column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterTag {
    Player,
    Goblin,
}

/// One row of the character table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub id: u32,
    pub tag: CharacterTag,
    pub name: String,
    pub health: u32,
    pub max_health: u32,
    pub abilities: AbilitySet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub armor_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loot_id: Option<u32>,
}

impl From<&Character> for CharacterRecord {
    fn from(character: &Character) -> Self {
        let (tag, loot_id) = match &character.kind {
            CharacterKind::Player => (CharacterTag::Player, None),
            CharacterKind::Goblin { loot } => (CharacterTag::Goblin, loot.map(|id| id.0)),
        };
        let equipment = character.equipment();

        Self {
            id: character.id.0,
            tag,
            name: character.name.clone(),
            health: character.health.current(),
            max_health: character.health.maximum(),
            abilities: character.abilities,
            equipment_id: equipment.map(|e| e.id().0),
            weapon_id: equipment.and_then(Equipment::weapon).map(|id| id.0),
            armor_id: equipment.and_then(Equipment::armor).map(|id| id.0),
            loot_id,
        }
    }
}

impl TryFrom<CharacterRecord> for Character {
    type Error = RepositoryError;

    fn try_from(record: CharacterRecord) -> Result<Self, Self::Error> {
        let kind = match (record.tag, record.loot_id) {
            (CharacterTag::Player, None) => CharacterKind::Player,
            (CharacterTag::Goblin, loot) => CharacterKind::Goblin {
                loot: loot.map(ItemId),
            },
            (CharacterTag::Player, Some(_)) => {
                return Err(RepositoryError::CorruptedData(format!(
                    "player row {} carries loot",
                    record.id
                )));
            }
        };

        let character = Character::new(
            CharacterId(record.id),
            record.name,
            Health::new(record.health, record.max_health),
            kind,
        )
        .with_abilities(record.abilities);

        match record.equipment_id {
            Some(equipment_id) => Ok(character.with_equipment(
                Equipment::builder(EquipmentId(equipment_id))
                    .slots(record.weapon_id.map(ItemId), record.armor_id.map(ItemId))
                    .build(),
            )),
            None if record.weapon_id.is_some() || record.armor_id.is_some() => {
                Err(RepositoryError::CorruptedData(format!(
                    "character row {} has slot references without equipment",
                    record.id
                )))
            }
            None => Ok(character),
        }
    }
}

#[cfg(test)]
mod tests {
    use arena_core::Ability;

    use super::*;

    #[test]
    fn weapon_row_leaves_defense_column_empty() {
        let sword = Item::weapon(ItemId(1), "Sword", 9, 4).with_value(20);

        let record = ItemRecord::from(&sword);

        assert_eq!(record.tag, ItemTag::Weapon);
        assert_eq!(record.attack_power, Some(9));
        assert_eq!(record.defense_rating, None);
        assert_eq!(Item::try_from(record).unwrap(), sword);
    }

    #[test]
    fn mismatched_item_row_is_corrupted() {
        let record = ItemRecord {
            id: 3,
            tag: ItemTag::Armor,
            name: "Odd".into(),
            value: 0,
            description: String::new(),
            attack_power: Some(4),
            defense_rating: None,
            durability: 1,
        };

        assert!(matches!(
            Item::try_from(record),
            Err(RepositoryError::CorruptedData(_))
        ));
    }

    #[test]
    fn character_row_keeps_equipment_and_loot() {
        let goblin = Character::goblin(CharacterId(4), "Grub", 18)
            .with_abilities(Ability::Taunt.flag())
            .with_loot(ItemId(6))
            .with_equipment(Equipment::builder(EquipmentId(3)).weapon(ItemId(5)).build());

        let record = CharacterRecord::from(&goblin);
        assert_eq!(record.weapon_id, Some(5));
        assert_eq!(record.armor_id, None);

        let restored = Character::try_from(record).unwrap();
        assert_eq!(restored, goblin);
        assert_eq!(
            restored.equipment().and_then(Equipment::owner),
            Some(CharacterId(4))
        );
    }

    #[test]
    fn slots_without_equipment_are_corrupted() {
        let mut record = CharacterRecord::from(&Character::player(CharacterId(0), "Hero", 10));
        record.weapon_id = Some(1);

        assert!(Character::try_from(record).is_err());
    }
}
