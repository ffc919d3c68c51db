//! Damage calculation and application.

/// Net damage of an attack after armor.
///
/// # Formula
///
/// ```text
/// damage = max(0, attack_power - defense_rating)
/// ```
///
/// Armor can negate an attack completely but never heals the target.
pub fn calculate_damage(attack_power: u32, defense_rating: u32) -> u32 {
    attack_power.saturating_sub(defense_rating)
}

/// Apply damage to current health.
///
/// # Returns
///
/// New health value (clamped to 0)
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}
