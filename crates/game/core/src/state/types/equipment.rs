//! Equipment slots for characters.
//!
//! An [`Equipment`] binds at most one weapon and one armor piece. Slots hold
//! [`ItemId`] references only; item data (kind, stats, durability) stays in
//! the caller's [`ItemStore`](crate::env::ItemStore). Replacing a slot never
//! touches the item that was previously referenced.

use super::{CharacterId, EquipmentId, Item, ItemId, ItemTag};
use crate::combat::CombatError;

/// Equipment state for a character.
///
/// `owner` is a non-owning back-reference. It is `None` while the set lies
/// detached (e.g. as loot) and is maintained by
/// [`Character::outfit`](super::Character::outfit) / [`Character::strip`](super::Character::strip).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    id: EquipmentId,
    weapon: Option<ItemId>,
    armor: Option<ItemId>,
    owner: Option<CharacterId>,
}

impl Equipment {
    /// Creates empty, detached equipment.
    pub fn empty(id: EquipmentId) -> Self {
        Self {
            id,
            weapon: None,
            armor: None,
            owner: None,
        }
    }

    /// Creates a builder for constructing equipment.
    pub fn builder(id: EquipmentId) -> EquipmentBuilder {
        EquipmentBuilder::new(id)
    }

    pub fn id(&self) -> EquipmentId {
        self.id
    }

    pub fn weapon(&self) -> Option<ItemId> {
        self.weapon
    }

    pub fn armor(&self) -> Option<ItemId> {
        self.armor
    }

    pub fn owner(&self) -> Option<CharacterId> {
        self.owner
    }

    /// Whether either slot references `item`.
    pub fn holds(&self, item: ItemId) -> bool {
        self.weapon == Some(item) || self.armor == Some(item)
    }

    pub fn is_empty(&self) -> bool {
        self.weapon.is_none() && self.armor.is_none()
    }

    pub(crate) fn set_owner(&mut self, owner: Option<CharacterId>) {
        self.owner = owner;
    }

    /// Equips a weapon, returning the previously equipped weapon id if any.
    pub fn equip_weapon(&mut self, item: &Item) -> Result<Option<ItemId>, CombatError> {
        expect_tag(item, ItemTag::Weapon)?;
        Ok(self.weapon.replace(item.id))
    }

    /// Equips armor, returning the previously equipped armor id if any.
    pub fn equip_armor(&mut self, item: &Item) -> Result<Option<ItemId>, CombatError> {
        expect_tag(item, ItemTag::Armor)?;
        Ok(self.armor.replace(item.id))
    }

    /// Equips `item` into the slot matching its kind.
    pub fn equip(&mut self, item: &Item) -> Option<ItemId> {
        match item.tag() {
            ItemTag::Weapon => self.weapon.replace(item.id),
            ItemTag::Armor => self.armor.replace(item.id),
        }
    }

    /// Unequips the current weapon, returning its id if any was equipped.
    pub fn unequip_weapon(&mut self) -> Option<ItemId> {
        self.weapon.take()
    }

    /// Unequips the current armor, returning its id if any was equipped.
    pub fn unequip_armor(&mut self) -> Option<ItemId> {
        self.armor.take()
    }
}

fn expect_tag(item: &Item, expected: ItemTag) -> Result<(), CombatError> {
    if item.tag() == expected {
        Ok(())
    } else {
        Err(CombatError::ItemKindMismatch {
            item: item.id,
            expected,
        })
    }
}

/// Builder for constructing equipment from stored references.
///
/// The builder does not check item kinds; references loaded from storage are
/// taken as-is and the resolver treats mismatched slots as empty.
pub struct EquipmentBuilder {
    id: EquipmentId,
    weapon: Option<ItemId>,
    armor: Option<ItemId>,
}

impl EquipmentBuilder {
    pub fn new(id: EquipmentId) -> Self {
        Self {
            id,
            weapon: None,
            armor: None,
        }
    }

    /// Sets the weapon by item id.
    pub fn weapon(mut self, id: ItemId) -> Self {
        self.weapon = Some(id);
        self
    }

    /// Sets the armor by item id.
    pub fn armor(mut self, id: ItemId) -> Self {
        self.armor = Some(id);
        self
    }

    /// Sets both slots from optional references.
    pub fn slots(mut self, weapon: Option<ItemId>, armor: Option<ItemId>) -> Self {
        self.weapon = weapon;
        self.armor = armor;
        self
    }

    /// Builds detached equipment.
    pub fn build(self) -> Equipment {
        Equipment {
            id: self.id,
            weapon: self.weapon,
            armor: self.armor,
            owner: None,
        }
    }
}
