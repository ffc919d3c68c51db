//! Combat result types.

use core::fmt;

use crate::state::{CharacterId, ItemId};

/// Structured record of one resolved attack exchange.
///
/// Presentation layers format this for display; [`fmt::Display`] provides the
/// default narration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackOutcome {
    pub attacker: CharacterId,
    pub attacker_name: String,
    pub target: CharacterId,
    pub target_name: String,

    /// Weapon that contributed the attack power (`None` when unarmed).
    pub weapon: Option<ItemId>,
    pub weapon_name: Option<String>,

    /// Armor that contributed the defense rating (`None` when unarmored).
    pub armor: Option<ItemId>,

    pub attack_power: u32,
    pub defense_rating: u32,
    pub damage: u32,
    pub health_before: u32,
    pub health_after: u32,
    pub defeated: bool,
}

impl AttackOutcome {
    /// Returns true if armor fully negated the attack.
    pub fn was_negated(&self) -> bool {
        self.damage == 0
    }
}

impl fmt::Display for AttackOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.weapon_name {
            Some(weapon) => write!(
                f,
                "{} strikes {} with {}",
                self.attacker_name, self.target_name, weapon
            )?,
            None => write!(
                f,
                "{} strikes {} bare-handed",
                self.attacker_name, self.target_name
            )?,
        }

        if self.was_negated() {
            write!(f, ", but the blow is fully absorbed")?;
        } else {
            write!(
                f,
                " for {} damage ({} -> {} HP)",
                self.damage, self.health_before, self.health_after
            )?;
        }

        if self.defeated {
            write!(f, ". {} is defeated!", self.target_name)
        } else {
            write!(f, ".")
        }
    }
}

/// Result of a healing action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealOutcome {
    pub target: CharacterId,
    pub restored: u32,
    pub health_after: u32,
}
