mod abilities;
mod character;
mod common;
mod equipment;
mod item;

pub use abilities::{Ability, AbilityActivation, AbilitySet};
pub use character::{Character, CharacterKind, Side, Targetable};
pub use common::{CharacterId, EquipmentId, Health, ItemId};
pub use equipment::{Equipment, EquipmentBuilder};
pub use item::{ArmorData, Durability, Item, ItemKind, ItemTag, UseEffect, WeaponData};
