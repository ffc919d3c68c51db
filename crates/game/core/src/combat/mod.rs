//! Combat resolution system.
//!
//! All combat logic is deterministic: given attacker, target and equipment
//! state, an exchange always yields the same outcome. There is no hit roll
//! and no critical variance.
//!
//! # Exchange
//!
//! 1. Resolve attack power from the attacker's weapon slot (baseline if empty)
//! 2. Resolve defense rating from the target's armor slot (baseline if empty)
//! 3. `damage = max(0, attack - defense)`
//! 4. `health = max(0, health - damage)`
//! 5. Zero health marks the target defeated
//! 6. An [`AttackOutcome`] describes the exchange

pub mod damage;
pub mod error;
pub mod resolver;
pub mod result;

pub use damage::{apply_damage, calculate_damage};
pub use error::{CombatError, TargetRejection};
pub use resolver::{CombatResolver, ResolvedArmor, ResolvedWeapon};
pub use result::{AttackOutcome, HealOutcome};
