//! Domain state: identifiers, items, equipment, abilities and characters.
//!
//! Ownership runs strictly Character → Equipment → (references to) Items.
//! Equipment keeps a non-owning back-reference to its owner's id only.
pub mod types;

pub use types::{
    Ability, AbilityActivation, AbilitySet, ArmorData, Character, CharacterId, CharacterKind,
    Durability, Equipment, EquipmentBuilder, EquipmentId, Health, Item, ItemId, ItemKind, ItemTag,
    Side, Targetable, UseEffect, WeaponData,
};
