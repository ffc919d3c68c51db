//! Item hierarchy.
//!
//! # Design: Base + Kind Pattern
//!
//! - [`Item`] holds the fields every item shares (id, name, value, description)
//! - [`ItemKind`] is a closed sum of variant payloads ([`WeaponData`], [`ArmorData`])
//! - [`ItemTag`] names the variant; storage layers use it to keep every kind
//!   in one table
//!
//! Both variants wear out: once [`Durability`] reaches zero the item is inert.
//! Equipment slots holding an inert item behave as if they were empty.

use super::{CharacterId, ItemId, Targetable};
use crate::combat::{CombatError, TargetRejection};

/// Remaining uses before an item becomes inert.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Durability(pub u32);

impl Durability {
    pub fn is_exhausted(self) -> bool {
        self.0 == 0
    }

    /// Removes one point. Returns false if the item was already exhausted.
    pub fn wear(&mut self) -> bool {
        match self.0.checked_sub(1) {
            Some(next) => {
                self.0 = next;
                true
            }
            None => false,
        }
    }
}

/// Discriminant of [`ItemKind`], used as the storage type tag.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemTag {
    Weapon,
    Armor,
}

/// Weapon-specific data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponData {
    pub attack_power: u32,
    pub durability: Durability,
}

impl WeaponData {
    pub fn new(attack_power: u32, durability: u32) -> Self {
        Self {
            attack_power,
            durability: Durability(durability),
        }
    }
}

/// Armor-specific data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmorData {
    pub defense_rating: u32,
    pub durability: Durability,
}

impl ArmorData {
    pub fn new(defense_rating: u32, durability: u32) -> Self {
        Self {
            defense_rating,
            durability: Durability(durability),
        }
    }
}

/// Item type with type-specific data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    /// Equippable weapon.
    Weapon(WeaponData),

    /// Equippable armor.
    Armor(ArmorData),
}

impl ItemKind {
    pub fn tag(&self) -> ItemTag {
        match self {
            ItemKind::Weapon(_) => ItemTag::Weapon,
            ItemKind::Armor(_) => ItemTag::Armor,
        }
    }
}

/// Effect produced by a successful [`Item::use_on`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UseEffect {
    /// A weapon struck the target with its raw attack power.
    Struck { damage: u32, defeated: bool },

    /// An armor piece was braced; no state changed.
    Braced { defense_rating: u32 },
}

/// An item record with common fields and type-specific data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub value: u32,
    pub description: String,
    pub kind: ItemKind,
}

impl Item {
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        value: u32,
        description: impl Into<String>,
        kind: ItemKind,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            value,
            description: description.into(),
            kind,
        }
    }

    /// Shorthand for a weapon with an empty description.
    pub fn weapon(
        id: ItemId,
        name: impl Into<String>,
        attack_power: u32,
        durability: u32,
    ) -> Self {
        Self::new(
            id,
            name,
            0,
            "",
            ItemKind::Weapon(WeaponData::new(attack_power, durability)),
        )
    }

    /// Shorthand for an armor piece with an empty description.
    pub fn armor(
        id: ItemId,
        name: impl Into<String>,
        defense_rating: u32,
        durability: u32,
    ) -> Self {
        Self::new(
            id,
            name,
            0,
            "",
            ItemKind::Armor(ArmorData::new(defense_rating, durability)),
        )
    }

    #[must_use]
    pub fn with_value(mut self, value: u32) -> Self {
        self.value = value;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn tag(&self) -> ItemTag {
        self.kind.tag()
    }

    pub fn as_weapon(&self) -> Option<&WeaponData> {
        match &self.kind {
            ItemKind::Weapon(data) => Some(data),
            ItemKind::Armor(_) => None,
        }
    }

    pub fn as_armor(&self) -> Option<&ArmorData> {
        match &self.kind {
            ItemKind::Armor(data) => Some(data),
            ItemKind::Weapon(_) => None,
        }
    }

    pub fn durability(&self) -> Durability {
        match &self.kind {
            ItemKind::Weapon(data) => data.durability,
            ItemKind::Armor(data) => data.durability,
        }
    }

    /// Returns true while the item still has durability left.
    pub fn is_usable(&self) -> bool {
        !self.durability().is_exhausted()
    }

    /// Removes one durability point. Returns false if the item was already inert.
    pub fn wear(&mut self) -> bool {
        match &mut self.kind {
            ItemKind::Weapon(data) => data.durability.wear(),
            ItemKind::Armor(data) => data.durability.wear(),
        }
    }

    /// Uses the item on behalf of `actor` against `target`.
    ///
    /// - Weapon: deals its raw attack power to the target (armor is not
    ///   consulted) and wears by one point.
    /// - Armor: braces; no state changes and no wear.
    ///
    /// Fails with [`CombatError::ItemUnusable`] when durability is exhausted,
    /// before anything else is checked or mutated.
    pub fn use_on<T>(&mut self, actor: CharacterId, target: &mut T) -> Result<UseEffect, CombatError>
    where
        T: Targetable + ?Sized,
    {
        if !self.is_usable() {
            return Err(CombatError::ItemUnusable { item: self.id });
        }

        match &mut self.kind {
            ItemKind::Weapon(data) => {
                if target.id() == actor {
                    return Err(CombatError::InvalidTarget {
                        target: actor,
                        reason: TargetRejection::SelfTarget,
                    });
                }
                if target.is_defeated() {
                    return Err(CombatError::InvalidTarget {
                        target: target.id(),
                        reason: TargetRejection::AlreadyDefeated,
                    });
                }

                let damage = target.health_mut().apply_damage(data.attack_power);
                data.durability.wear();

                Ok(UseEffect::Struck {
                    damage,
                    defeated: target.is_defeated(),
                })
            }
            ItemKind::Armor(data) => Ok(UseEffect::Braced {
                defense_rating: data.defense_rating,
            }),
        }
    }
}
