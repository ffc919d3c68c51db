//! Special actions a character may know.
//!
//! [`Ability`] is the closed list of special actions; [`AbilitySet`] is the
//! compact set stored on each character. Ability effects are resolved by the
//! surrounding game; the core only validates activation.

use bitflags::bitflags;
use strum::IntoEnumIterator;

use super::CharacterId;

/// A special action that can be activated against a target.
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
pub enum Ability {
    PowerStrike,
    ShieldBash,
    Heal,
    WarCry,
    Backstab,
    Taunt,
}

impl Ability {
    /// Returns the set bit representing this ability.
    pub const fn flag(self) -> AbilitySet {
        match self {
            Ability::PowerStrike => AbilitySet::POWER_STRIKE,
            Ability::ShieldBash => AbilitySet::SHIELD_BASH,
            Ability::Heal => AbilitySet::HEAL,
            Ability::WarCry => AbilitySet::WAR_CRY,
            Ability::Backstab => AbilitySet::BACKSTAB,
            Ability::Taunt => AbilitySet::TAUNT,
        }
    }
}

bitflags! {
    /// Abilities known by a character.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct AbilitySet: u16 {
        const POWER_STRIKE = 1 << 0;
        const SHIELD_BASH  = 1 << 1;
        const HEAL         = 1 << 2;
        const WAR_CRY      = 1 << 3;
        const BACKSTAB     = 1 << 4;
        const TAUNT        = 1 << 5;
    }
}

impl AbilitySet {
    pub fn has(&self, ability: Ability) -> bool {
        self.contains(ability.flag())
    }

    pub fn grant(&mut self, ability: Ability) {
        self.insert(ability.flag());
    }

    pub fn revoke(&mut self, ability: Ability) {
        self.remove(ability.flag());
    }

    /// Iterates the known abilities in declaration order.
    pub fn abilities(&self) -> impl Iterator<Item = Ability> + '_ {
        Ability::iter().filter(move |ability| self.has(*ability))
    }
}

impl FromIterator<Ability> for AbilitySet {
    fn from_iter<I: IntoIterator<Item = Ability>>(iter: I) -> Self {
        iter.into_iter()
            .fold(AbilitySet::empty(), |set, ability| set | ability.flag())
    }
}

/// Record of a successful ability activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityActivation {
    pub actor: CharacterId,
    pub ability: Ability,
    pub target: CharacterId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_tracks_granted_abilities() {
        let mut set: AbilitySet = [Ability::PowerStrike, Ability::Heal].into_iter().collect();
        assert!(set.has(Ability::Heal));
        assert!(!set.has(Ability::Taunt));

        set.revoke(Ability::Heal);
        set.grant(Ability::Taunt);

        let known: Vec<_> = set.abilities().collect();
        assert_eq!(known, vec![Ability::PowerStrike, Ability::Taunt]);
    }

    #[test]
    fn ability_names_are_snake_case() {
        assert_eq!(Ability::PowerStrike.to_string(), "power_strike");
        assert_eq!("war_cry".parse::<Ability>().unwrap(), Ability::WarCry);
    }
}
