//! Deterministic combat rules and data types shared across the arena crates.
//!
//! `arena-core` defines the canonical domain model (items, equipment slots,
//! characters, abilities) and the combat resolver that turns equipped-item
//! stats into attack and defense outcomes. Everything here is pure: storage,
//! narration and scheduling live in `arena-runtime`, which depends on the
//! types re-exported below.
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod state;

pub use combat::{
    AttackOutcome, CombatError, CombatResolver, HealOutcome, ResolvedArmor, ResolvedWeapon,
    TargetRejection, apply_damage, calculate_damage,
};
pub use config::{CombatRules, DurabilityPolicy};
pub use env::ItemStore;
pub use error::{ErrorSeverity, GameError};
pub use state::{
    Ability, AbilityActivation, AbilitySet, ArmorData, Character, CharacterId, CharacterKind,
    Durability, Equipment, EquipmentBuilder, EquipmentId, Health, Item, ItemId, ItemKind, ItemTag,
    Side, Targetable, UseEffect, WeaponData,
};
