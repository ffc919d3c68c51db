/// When item durability is consumed during combat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DurabilityPolicy {
    /// Every attack exchange wears the attacker's weapon and the target's
    /// armor by one point, in addition to explicit `use_on` calls.
    #[default]
    PerExchange,

    /// Only explicit `use_on` calls wear items; exchanges never do.
    ExplicitUse,
}

/// Combat tuning parameters.
///
/// Baseline values apply whenever a slot is empty, points at an item of the
/// wrong kind, or holds an item whose durability is exhausted.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatRules {
    /// Attack power of an unarmed combatant.
    pub unarmed_attack: u32,

    /// Defense rating of an unarmored combatant.
    pub unarmored_defense: u32,

    /// Durability consumption policy.
    pub durability: DurabilityPolicy,
}

impl CombatRules {
    pub const DEFAULT_UNARMED_ATTACK: u32 = 0;
    pub const DEFAULT_UNARMORED_DEFENSE: u32 = 0;

    pub fn new() -> Self {
        Self {
            unarmed_attack: Self::DEFAULT_UNARMED_ATTACK,
            unarmored_defense: Self::DEFAULT_UNARMORED_DEFENSE,
            durability: DurabilityPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_unarmed_attack(mut self, unarmed_attack: u32) -> Self {
        self.unarmed_attack = unarmed_attack;
        self
    }

    #[must_use]
    pub fn with_durability(mut self, durability: DurabilityPolicy) -> Self {
        self.durability = durability;
        self
    }

    /// Returns true if attack exchanges consume durability.
    pub fn wears_on_exchange(&self) -> bool {
        matches!(self.durability, DurabilityPolicy::PerExchange)
    }
}

impl Default for CombatRules {
    fn default() -> Self {
        Self::new()
    }
}
