//! Combat errors.
//!
//! Every variant is a value returned to the immediate caller. Rejected
//! actions never mutate state; a zero-damage hit is an outcome, not an error.

use core::fmt;

use crate::error::{ErrorSeverity, GameError};
use crate::state::{Ability, CharacterId, ItemId, ItemTag};

/// Why a target was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetRejection {
    /// The actor targeted itself.
    SelfTarget,
    /// The target's health is already zero.
    AlreadyDefeated,
}

impl fmt::Display for TargetRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetRejection::SelfTarget => f.write_str("cannot target itself"),
            TargetRejection::AlreadyDefeated => f.write_str("already defeated"),
        }
    }
}

/// Errors raised while resolving combat actions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatError {
    /// Attacking oneself or an already-defeated combatant.
    #[error("invalid target {target}: {reason}")]
    InvalidTarget {
        target: CharacterId,
        reason: TargetRejection,
    },

    /// The actor does not know the requested ability.
    #[error("{actor} does not know {ability}")]
    AbilityNotOwned { actor: CharacterId, ability: Ability },

    /// The item's durability is exhausted.
    #[error("{item} is worn out and cannot be used")]
    ItemUnusable { item: ItemId },

    /// A defeated combatant tried to act.
    #[error("{actor} is defeated and cannot act")]
    AttackerDefeated { actor: CharacterId },

    /// An item was placed in a slot of the wrong kind.
    #[error("{item} is not a {expected}")]
    ItemKindMismatch { item: ItemId, expected: ItemTag },

    /// The item is already worn or carried by another combatant.
    #[error("{item} is held by {holder}")]
    ItemInUse { item: ItemId, holder: CharacterId },
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        use CombatError::*;
        match self {
            InvalidTarget {
                reason: TargetRejection::SelfTarget,
                ..
            } => ErrorSeverity::Validation,
            InvalidTarget {
                reason: TargetRejection::AlreadyDefeated,
                ..
            } => ErrorSeverity::Recoverable,
            AbilityNotOwned { .. } | ItemKindMismatch { .. } | ItemInUse { .. } => {
                ErrorSeverity::Validation
            }
            ItemUnusable { .. } | AttackerDefeated { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        use CombatError::*;
        match self {
            InvalidTarget { .. } => "COMBAT_INVALID_TARGET",
            AbilityNotOwned { .. } => "COMBAT_ABILITY_NOT_OWNED",
            ItemUnusable { .. } => "COMBAT_ITEM_UNUSABLE",
            AttackerDefeated { .. } => "COMBAT_ATTACKER_DEFEATED",
            ItemKindMismatch { .. } => "COMBAT_ITEM_KIND_MISMATCH",
            ItemInUse { .. } => "COMBAT_ITEM_IN_USE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_entities() {
        let err = CombatError::InvalidTarget {
            target: CharacterId(4),
            reason: TargetRejection::AlreadyDefeated,
        };
        assert_eq!(err.to_string(), "invalid target character#4: already defeated");
        assert_eq!(err.error_code(), "COMBAT_INVALID_TARGET");
        assert!(err.severity().is_recoverable());
    }
}
