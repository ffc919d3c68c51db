//! Attack exchange resolution.

use crate::config::CombatRules;
use crate::env::ItemStore;
use crate::state::{Equipment, ItemId, Targetable};

use super::damage::calculate_damage;
use super::error::{CombatError, TargetRejection};
use super::result::{AttackOutcome, HealOutcome};

/// Attack power resolved from a weapon slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedWeapon {
    /// The contributing weapon, `None` when the baseline applied.
    pub item: Option<ItemId>,
    pub name: Option<String>,
    pub attack_power: u32,
}

/// Defense rating resolved from an armor slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedArmor {
    /// The contributing armor, `None` when the baseline applied.
    pub item: Option<ItemId>,
    pub defense_rating: u32,
}

/// Resolves attack exchanges under a fixed set of [`CombatRules`].
#[derive(Clone, Debug, Default)]
pub struct CombatResolver {
    rules: CombatRules,
}

impl CombatResolver {
    pub fn new(rules: CombatRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &CombatRules {
        &self.rules
    }

    /// Attack power of the weapon slot in `equipment`.
    ///
    /// An empty slot, a dangling reference, a non-weapon item or a worn-out
    /// weapon all resolve to the unarmed baseline.
    pub fn resolve_weapon<S>(&self, equipment: Option<&Equipment>, items: &S) -> ResolvedWeapon
    where
        S: ItemStore + ?Sized,
    {
        equipment
            .and_then(Equipment::weapon)
            .and_then(|id| items.item(id))
            .filter(|item| item.is_usable())
            .and_then(|item| {
                item.as_weapon().map(|weapon| ResolvedWeapon {
                    item: Some(item.id),
                    name: Some(item.name.clone()),
                    attack_power: weapon.attack_power,
                })
            })
            .unwrap_or(ResolvedWeapon {
                item: None,
                name: None,
                attack_power: self.rules.unarmed_attack,
            })
    }

    /// Defense rating of the armor slot in `equipment`, with the same
    /// fallbacks as [`resolve_weapon`](Self::resolve_weapon).
    pub fn resolve_armor<S>(&self, equipment: Option<&Equipment>, items: &S) -> ResolvedArmor
    where
        S: ItemStore + ?Sized,
    {
        equipment
            .and_then(Equipment::armor)
            .and_then(|id| items.item(id))
            .filter(|item| item.is_usable())
            .and_then(|item| {
                item.as_armor().map(|armor| ResolvedArmor {
                    item: Some(item.id),
                    defense_rating: armor.defense_rating,
                })
            })
            .unwrap_or(ResolvedArmor {
                item: None,
                defense_rating: self.rules.unarmored_defense,
            })
    }

    /// Resolves one attack exchange and applies it to `target`.
    ///
    /// `loadout` supplies the weapon slot; the target's own equipment supplies
    /// the armor slot. Rejections happen before any mutation.
    pub fn resolve<A, T, S>(
        &self,
        attacker: &A,
        loadout: Option<&Equipment>,
        target: &mut T,
        items: &mut S,
    ) -> Result<AttackOutcome, CombatError>
    where
        A: Targetable + ?Sized,
        T: Targetable + ?Sized,
        S: ItemStore + ?Sized,
    {
        if attacker.id() == target.id() {
            return Err(CombatError::InvalidTarget {
                target: target.id(),
                reason: TargetRejection::SelfTarget,
            });
        }
        if attacker.is_defeated() {
            return Err(CombatError::AttackerDefeated {
                actor: attacker.id(),
            });
        }
        if target.is_defeated() {
            return Err(CombatError::InvalidTarget {
                target: target.id(),
                reason: TargetRejection::AlreadyDefeated,
            });
        }

        let weapon = self.resolve_weapon(loadout, &*items);
        let armor = self.resolve_armor(target.equipment(), &*items);

        let damage = calculate_damage(weapon.attack_power, armor.defense_rating);
        let health_before = target.health().current();
        target.health_mut().apply_damage(damage);
        let health_after = target.health().current();

        if self.rules.wears_on_exchange() {
            for id in [weapon.item, armor.item].into_iter().flatten() {
                if let Some(item) = items.item_mut(id) {
                    item.wear();
                }
            }
        }

        Ok(AttackOutcome {
            attacker: attacker.id(),
            attacker_name: attacker.name().to_owned(),
            target: target.id(),
            target_name: target.name().to_owned(),
            weapon: weapon.item,
            weapon_name: weapon.name,
            armor: armor.item,
            attack_power: weapon.attack_power,
            defense_rating: armor.defense_rating,
            damage,
            health_before,
            health_after,
            defeated: target.is_defeated(),
        })
    }

    /// Restores up to `amount` health. Defeat is terminal, so defeated
    /// targets are rejected.
    pub fn heal<T>(&self, target: &mut T, amount: u32) -> Result<HealOutcome, CombatError>
    where
        T: Targetable + ?Sized,
    {
        if target.is_defeated() {
            return Err(CombatError::InvalidTarget {
                target: target.id(),
                reason: TargetRejection::AlreadyDefeated,
            });
        }

        let restored = target.health_mut().restore(amount);

        Ok(HealOutcome {
            target: target.id(),
            restored,
            health_after: target.health().current(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use proptest::prelude::*;

    use super::*;
    use crate::config::DurabilityPolicy;
    use crate::state::{Character, CharacterId, Durability, EquipmentId, Health, Item};

    const SWORD: ItemId = ItemId(1);
    const SHIELD: ItemId = ItemId(2);

    fn setup(
        attack: Option<u32>,
        defense: Option<u32>,
        target_health: u32,
    ) -> (Character, Character, BTreeMap<ItemId, Item>) {
        let mut items = BTreeMap::new();

        let mut hero_gear = Equipment::empty(EquipmentId(1));
        if let Some(power) = attack {
            let sword = Item::weapon(SWORD, "Sword", power, 100);
            hero_gear.equip_weapon(&sword).unwrap();
            items.insert(SWORD, sword);
        }

        let mut goblin_gear = Equipment::empty(EquipmentId(2));
        if let Some(rating) = defense {
            let shield = Item::armor(SHIELD, "Shield", rating, 100);
            goblin_gear.equip_armor(&shield).unwrap();
            items.insert(SHIELD, shield);
        }

        let hero = Character::player(CharacterId(0), "Hero", 50).with_equipment(hero_gear);
        let mut goblin = Character::goblin(CharacterId(1), "Goblin", 100).with_equipment(goblin_gear);
        goblin.health = Health::new(target_health, 100);

        (hero, goblin, items)
    }

    #[test]
    fn armored_target_takes_reduced_damage() {
        let (hero, mut goblin, mut items) = setup(Some(15), Some(5), 20);

        let outcome = hero
            .strike(&mut goblin, &mut items, &CombatResolver::default())
            .unwrap();

        assert_eq!(outcome.damage, 10);
        assert_eq!(goblin.health.current(), 10);
        assert!(!outcome.defeated);
        assert_eq!(outcome.weapon_name.as_deref(), Some("Sword"));
    }

    #[test]
    fn unarmed_attack_against_armor_deals_nothing() {
        let (hero, mut goblin, mut items) = setup(None, Some(3), 20);

        let outcome = hero
            .strike(&mut goblin, &mut items, &CombatResolver::default())
            .unwrap();

        assert_eq!(outcome.damage, 0);
        assert_eq!(outcome.weapon, None);
        assert_eq!(goblin.health.current(), 20);
    }

    #[test]
    fn overkill_clamps_health_and_defeats() {
        let (hero, mut goblin, mut items) = setup(Some(25), None, 10);

        let outcome = hero
            .strike(&mut goblin, &mut items, &CombatResolver::default())
            .unwrap();

        assert_eq!(outcome.damage, 25);
        assert_eq!(outcome.health_after, 0);
        assert!(outcome.defeated);
        assert!(goblin.is_defeated());
    }

    #[test]
    fn defeated_target_is_rejected_without_change() {
        let (hero, mut goblin, mut items) = setup(Some(25), None, 0);

        let result = hero.strike(&mut goblin, &mut items, &CombatResolver::default());

        assert_eq!(
            result,
            Err(CombatError::InvalidTarget {
                target: CharacterId(1),
                reason: TargetRejection::AlreadyDefeated,
            })
        );
        assert_eq!(goblin.health.current(), 0);
        assert_eq!(items[&SWORD].durability(), Durability(100));
    }

    #[test]
    fn self_attack_is_rejected() {
        let (hero, _, mut items) = setup(Some(10), None, 10);
        let mut mirror = hero.clone();

        let result = hero.strike(&mut mirror, &mut items, &CombatResolver::default());

        assert!(matches!(
            result,
            Err(CombatError::InvalidTarget {
                reason: TargetRejection::SelfTarget,
                ..
            })
        ));
        assert_eq!(mirror.health.current(), 50);
    }

    #[test]
    fn defeated_attacker_cannot_act() {
        let (mut hero, mut goblin, mut items) = setup(Some(10), None, 10);
        hero.health.apply_damage(1_000);

        let result = hero.strike(&mut goblin, &mut items, &CombatResolver::default());

        assert_eq!(
            result,
            Err(CombatError::AttackerDefeated {
                actor: CharacterId(0)
            })
        );
    }

    #[test]
    fn exchange_wears_weapon_and_armor() {
        let (hero, mut goblin, mut items) = setup(Some(10), Some(2), 100);

        hero.strike(&mut goblin, &mut items, &CombatResolver::default())
            .unwrap();

        assert_eq!(items[&SWORD].durability(), Durability(99));
        assert_eq!(items[&SHIELD].durability(), Durability(99));
    }

    #[test]
    fn explicit_use_policy_leaves_durability_alone() {
        let (hero, mut goblin, mut items) = setup(Some(10), Some(2), 100);
        let resolver =
            CombatResolver::new(CombatRules::new().with_durability(DurabilityPolicy::ExplicitUse));

        hero.strike(&mut goblin, &mut items, &resolver).unwrap();

        assert_eq!(items[&SWORD].durability(), Durability(100));
    }

    #[test]
    fn worn_out_weapon_falls_back_to_unarmed() {
        let mut items = BTreeMap::new();
        let dagger = Item::weapon(SWORD, "Dagger", 6, 1);
        let mut gear = Equipment::empty(EquipmentId(1));
        gear.equip_weapon(&dagger).unwrap();
        items.insert(SWORD, dagger);
        let hero = Character::player(CharacterId(0), "Hero", 50).with_equipment(gear);
        let mut goblin = Character::goblin(CharacterId(1), "Goblin", 30);
        let resolver = CombatResolver::default();

        let first = hero.strike(&mut goblin, &mut items, &resolver).unwrap();
        let second = hero.strike(&mut goblin, &mut items, &resolver).unwrap();

        assert_eq!(first.damage, 6);
        assert_eq!(second.weapon, None);
        assert_eq!(second.damage, 0);
    }

    #[test]
    fn unarmed_baseline_comes_from_rules() {
        let (hero, mut goblin, mut items) = setup(None, None, 20);
        let resolver = CombatResolver::new(CombatRules::new().with_unarmed_attack(2));

        let outcome = hero.strike(&mut goblin, &mut items, &resolver).unwrap();

        assert_eq!(outcome.attack_power, 2);
        assert_eq!(goblin.health.current(), 18);
    }

    #[test]
    fn heal_is_capped_and_rejects_defeated() {
        let (_, mut goblin, _) = setup(None, None, 95);
        let resolver = CombatResolver::default();

        let healed = resolver.heal(&mut goblin, 20).unwrap();
        assert_eq!(healed.restored, 5);
        assert_eq!(healed.health_after, 100);

        goblin.health.apply_damage(100);
        assert!(resolver.heal(&mut goblin, 20).is_err());
        assert_eq!(goblin.health.current(), 0);
    }

    #[test]
    fn full_negation_lasts_only_while_armor_is_usable() {
        let (hero, mut goblin, mut items) = setup(Some(5), Some(5), 40);
        items.insert(SHIELD, Item::armor(SHIELD, "Shield", 5, 2));
        let resolver = CombatResolver::default();

        let damage: Vec<u32> = (0..4)
            .map(|_| hero.strike(&mut goblin, &mut items, &resolver).unwrap().damage)
            .collect();

        assert_eq!(damage, [0, 0, 5, 5]);
        assert!(!items[&SHIELD].is_usable());
        assert_eq!(goblin.health.current(), 30);
    }

    proptest! {
        #[test]
        fn damage_law_holds_for_any_source(
            attack in proptest::option::of(0u32..200),
            defense in proptest::option::of(0u32..200),
            health in 1u32..100,
        ) {
            let (hero, mut goblin, mut items) = setup(attack, defense, health);

            let outcome = hero
                .strike(&mut goblin, &mut items, &CombatResolver::default())
                .unwrap();

            let a = attack.unwrap_or(CombatRules::DEFAULT_UNARMED_ATTACK);
            let d = defense.unwrap_or(CombatRules::DEFAULT_UNARMORED_DEFENSE);
            prop_assert_eq!(outcome.damage, a.saturating_sub(d));
            prop_assert_eq!(goblin.health.current(), health.saturating_sub(outcome.damage));
        }

        #[test]
        fn health_is_non_increasing_across_attacks(
            attack in 0u32..30,
            defense in 0u32..30,
            rounds in 1usize..40,
        ) {
            let (hero, mut goblin, mut items) = setup(Some(attack), Some(defense), 100);
            let resolver = CombatResolver::default();
            let mut previous = goblin.health.current();

            for _ in 0..rounds {
                match hero.strike(&mut goblin, &mut items, &resolver) {
                    Ok(_) => {}
                    Err(CombatError::InvalidTarget { reason: TargetRejection::AlreadyDefeated, .. }) => {
                        prop_assert_eq!(goblin.health.current(), 0);
                    }
                    Err(other) => prop_assert!(false, "unexpected error: {other}"),
                }
                prop_assert!(goblin.health.current() <= previous);
                previous = goblin.health.current();
            }
        }

        // Armor never wears out here, so negation holds for every round.
        #[test]
        fn zero_damage_attacks_are_idempotent(
            defense in 1u32..50,
            slack in 0u32..50,
            rounds in 1usize..20,
        ) {
            let attack = defense.saturating_sub(slack);
            let (hero, mut goblin, mut items) = setup(Some(attack), Some(defense), 40);
            let resolver = CombatResolver::new(
                CombatRules::new().with_durability(DurabilityPolicy::ExplicitUse),
            );

            for _ in 0..rounds {
                let outcome = hero.strike(&mut goblin, &mut items, &resolver).unwrap();
                prop_assert_eq!(outcome.damage, 0);
            }
            prop_assert_eq!(goblin.health.current(), 40);
        }
    }
}
