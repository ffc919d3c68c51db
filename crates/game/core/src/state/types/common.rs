use std::fmt;

/// Unique identifier for a character (player or adversary).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CharacterId(pub u32);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "character#{}", self.0)
    }
}

/// Unique identifier for an item record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Unique identifier for an equipment set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EquipmentId(pub u32);

impl fmt::Display for EquipmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "equipment#{}", self.0)
    }
}

/// Health meter tracked per character.
///
/// `current` never exceeds `maximum` and never drops below zero. A meter at
/// zero marks its owner as defeated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Health {
    current: u32,
    maximum: u32,
}

impl Health {
    /// Creates a meter, clamping `current` into `0..=maximum`.
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    /// Creates a full meter.
    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Subtracts `amount`, saturating at zero. Returns the health actually lost.
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = crate::combat::apply_damage(before, amount);
        before - self.current
    }

    /// Adds `amount`, saturating at the maximum. Returns the health actually restored.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = before.saturating_add(amount).min(self.maximum);
        self.current - before
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.maximum)
    }
}
