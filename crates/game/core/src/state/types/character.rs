//! Characters: players and adversaries.
//!
//! A [`Character`] holds identity, health, known abilities and at most one
//! owned [`Equipment`]. The player/adversary distinction is a closed
//! [`CharacterKind`]; both kinds take part in combat symmetrically.

use super::{Ability, AbilityActivation, AbilitySet, CharacterId, Equipment, Health, ItemId};
use crate::combat::{AttackOutcome, CombatError, CombatResolver, TargetRejection};
use crate::env::ItemStore;

/// Anything that can be attacked.
pub trait Targetable {
    fn id(&self) -> CharacterId;

    fn name(&self) -> &str;

    fn health(&self) -> &Health;

    fn health_mut(&mut self) -> &mut Health;

    /// Equipment worn by this combatant, consulted for its armor slot.
    fn equipment(&self) -> Option<&Equipment>;

    /// A combatant at zero health is defeated and may not be targeted again.
    fn is_defeated(&self) -> bool {
        self.health().is_depleted()
    }
}

/// Which side of an encounter a character fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Heroes,
    Adversaries,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Heroes => Side::Adversaries,
            Side::Adversaries => Side::Heroes,
        }
    }
}

/// Character variant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacterKind {
    /// The player character.
    Player,

    /// A goblin adversary, optionally carrying an item it drops on defeat.
    Goblin { loot: Option<ItemId> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub health: Health,
    pub abilities: AbilitySet,
    pub kind: CharacterKind,
    equipment: Option<Equipment>,
}

impl Character {
    pub fn new(id: CharacterId, name: impl Into<String>, health: Health, kind: CharacterKind) -> Self {
        Self {
            id,
            name: name.into(),
            health,
            abilities: AbilitySet::empty(),
            kind,
            equipment: None,
        }
    }

    /// Creates a player at full health.
    pub fn player(id: CharacterId, name: impl Into<String>, max_health: u32) -> Self {
        Self::new(id, name, Health::full(max_health), CharacterKind::Player)
    }

    /// Creates a goblin at full health with nothing to drop.
    pub fn goblin(id: CharacterId, name: impl Into<String>, max_health: u32) -> Self {
        Self::new(
            id,
            name,
            Health::full(max_health),
            CharacterKind::Goblin { loot: None },
        )
    }

    #[must_use]
    pub fn with_abilities(mut self, abilities: AbilitySet) -> Self {
        self.abilities = abilities;
        self
    }

    #[must_use]
    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.outfit(equipment);
        self
    }

    /// Sets the item dropped on defeat. Has no effect on players.
    #[must_use]
    pub fn with_loot(mut self, item: ItemId) -> Self {
        if let CharacterKind::Goblin { loot } = &mut self.kind {
            *loot = Some(item);
        }
        self
    }

    pub fn side(&self) -> Side {
        match self.kind {
            CharacterKind::Player => Side::Heroes,
            CharacterKind::Goblin { .. } => Side::Adversaries,
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, CharacterKind::Player)
    }

    pub fn is_defeated(&self) -> bool {
        self.health.is_depleted()
    }

    pub fn equipment(&self) -> Option<&Equipment> {
        self.equipment.as_ref()
    }

    pub fn equipment_mut(&mut self) -> Option<&mut Equipment> {
        self.equipment.as_mut()
    }

    /// Attaches `equipment`, claiming ownership. Returns the previously worn
    /// set, detached.
    pub fn outfit(&mut self, mut equipment: Equipment) -> Option<Equipment> {
        equipment.set_owner(Some(self.id));
        let previous = self.equipment.replace(equipment);
        previous.map(detach)
    }

    /// Removes and detaches the worn equipment.
    pub fn strip(&mut self) -> Option<Equipment> {
        self.equipment.take().map(detach)
    }

    /// Item dropped on defeat, if any.
    pub fn loot(&self) -> Option<ItemId> {
        match &self.kind {
            CharacterKind::Goblin { loot } => *loot,
            CharacterKind::Player => None,
        }
    }

    /// Hands over the loot of a defeated adversary exactly once.
    pub fn take_loot(&mut self) -> Option<ItemId> {
        if !self.is_defeated() {
            return None;
        }
        match &mut self.kind {
            CharacterKind::Goblin { loot } => loot.take(),
            CharacterKind::Player => None,
        }
    }

    /// Attacks `target` using `equipment` for the weapon slot.
    ///
    /// `equipment` is ordinarily this character's own, but any set may be
    /// passed to evaluate borrowed weapons. The target's own equipment
    /// supplies its armor.
    pub fn attack<T, S>(
        &self,
        target: &mut T,
        equipment: &Equipment,
        items: &mut S,
        resolver: &CombatResolver,
    ) -> Result<AttackOutcome, CombatError>
    where
        T: Targetable + ?Sized,
        S: ItemStore + ?Sized,
    {
        resolver.resolve(self, Some(equipment), target, items)
    }

    /// Attacks `target` with this character's own equipment (unarmed if none).
    pub fn strike<T, S>(
        &self,
        target: &mut T,
        items: &mut S,
        resolver: &CombatResolver,
    ) -> Result<AttackOutcome, CombatError>
    where
        T: Targetable + ?Sized,
        S: ItemStore + ?Sized,
    {
        resolver.resolve(self, self.equipment.as_ref(), target, items)
    }

    /// Validates and records the activation of `ability` against `target`.
    ///
    /// Abilities may target their user (e.g. `Heal`), but never a defeated
    /// combatant, and a defeated user cannot act.
    pub fn use_ability<T>(&self, ability: Ability, target: &T) -> Result<AbilityActivation, CombatError>
    where
        T: Targetable + ?Sized,
    {
        if !self.abilities.has(ability) {
            return Err(CombatError::AbilityNotOwned {
                actor: self.id,
                ability,
            });
        }
        if self.is_defeated() {
            return Err(CombatError::AttackerDefeated { actor: self.id });
        }
        if target.is_defeated() {
            return Err(CombatError::InvalidTarget {
                target: target.id(),
                reason: TargetRejection::AlreadyDefeated,
            });
        }

        Ok(AbilityActivation {
            actor: self.id,
            ability,
            target: target.id(),
        })
    }
}

fn detach(mut equipment: Equipment) -> Equipment {
    equipment.set_owner(None);
    equipment
}

impl Targetable for Character {
    fn id(&self) -> CharacterId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn health(&self) -> &Health {
        &self.health
    }

    fn health_mut(&mut self) -> &mut Health {
        &mut self.health
    }

    fn equipment(&self) -> Option<&Equipment> {
        self.equipment.as_ref()
    }
}
