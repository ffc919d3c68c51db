//! Combat event payloads.

use std::fmt;

use arena_core::{
    AbilityActivation, AttackOutcome, CharacterId, CombatError, HealOutcome, ItemId, Side,
    UseEffect,
};
use serde::{Deserialize, Serialize};

/// Action an actor attempted.
///
/// `Display` reads as the verb phrase used in narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    #[strum(to_string = "attack")]
    Attack,
    #[strum(to_string = "use an ability")]
    Ability,
    #[strum(to_string = "heal")]
    Heal,
    #[strum(to_string = "use an item")]
    UseItem,
    #[strum(to_string = "equip an item")]
    Equip,
}

/// Everything an encounter reports, successful or not.
///
/// Events carry display names next to ids so consumers can narrate without
/// looking anything up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// An attack exchange was resolved.
    Exchange(AttackOutcome),

    /// An ability activation passed validation.
    AbilityUsed {
        activation: AbilityActivation,
        actor_name: String,
        target_name: String,
    },

    Healed {
        healer: CharacterId,
        healer_name: String,
        target_name: String,
        outcome: HealOutcome,
    },

    ItemUsed {
        actor: CharacterId,
        actor_name: String,
        item: ItemId,
        item_name: String,
        target: CharacterId,
        target_name: String,
        effect: UseEffect,
    },

    /// An item went into an equipment slot.
    Equipped {
        actor: CharacterId,
        actor_name: String,
        item: ItemId,
        item_name: String,
        replaced: Option<ItemId>,
        replaced_name: Option<String>,
    },

    /// An action was refused. Nothing changed.
    Rejected {
        actor: CharacterId,
        actor_name: String,
        action: ActionKind,
        error: CombatError,
    },

    /// A defeated adversary dropped its loot.
    LootDropped {
        from: CharacterId,
        from_name: String,
        item: ItemId,
        item_name: String,
    },

    BattleEnded { rounds: u32, victor: Option<Side> },
}

impl CombatEvent {
    pub fn topic(&self) -> super::Topic {
        match self {
            CombatEvent::LootDropped { .. } => super::Topic::Loot,
            _ => super::Topic::Combat,
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, CombatEvent::Rejected { .. })
    }
}

impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatEvent::Exchange(outcome) => write!(f, "{outcome}"),
            CombatEvent::AbilityUsed {
                activation,
                actor_name,
                target_name,
            } => write!(f, "{actor_name} uses {} on {target_name}.", activation.ability),
            CombatEvent::Healed {
                healer_name,
                target_name,
                outcome,
                ..
            } => write!(
                f,
                "{healer_name} restores {} HP to {target_name} (now {} HP).",
                outcome.restored, outcome.health_after
            ),
            CombatEvent::ItemUsed {
                actor_name,
                item_name,
                target_name,
                effect,
                ..
            } => match effect {
                UseEffect::Struck { damage, defeated } => {
                    write!(
                        f,
                        "{actor_name} hurls {item_name} at {target_name} for {damage} damage"
                    )?;
                    if *defeated {
                        write!(f, ". {target_name} is defeated!")
                    } else {
                        write!(f, ".")
                    }
                }
                UseEffect::Braced { defense_rating } => write!(
                    f,
                    "{actor_name} braces behind {item_name} ({defense_rating} defense)."
                ),
            },
            CombatEvent::Equipped {
                actor_name,
                item_name,
                replaced_name,
                ..
            } => match replaced_name {
                Some(old) => write!(f, "{actor_name} swaps {old} for {item_name}."),
                None => write!(f, "{actor_name} equips {item_name}."),
            },
            CombatEvent::Rejected {
                actor_name,
                action,
                error,
                ..
            } => write!(f, "{actor_name} cannot {action}: {error}."),
            CombatEvent::LootDropped {
                from_name,
                item_name,
                ..
            } => write!(f, "{from_name} drops {item_name}."),
            CombatEvent::BattleEnded { rounds, victor } => match victor {
                Some(side) => write!(f, "Battle over after {rounds} rounds: {side} win."),
                None => write!(f, "Battle halted after {rounds} rounds with no victor."),
            },
        }
    }
}
