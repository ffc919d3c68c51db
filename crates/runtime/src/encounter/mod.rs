//! Encounter orchestration.
//!
//! An [`Encounter`] owns its participants and the items they reference for
//! the duration of a fight. Every action is resolved fully (resolve, apply,
//! report) before the next one starts. Repositories are touched only by
//! [`Encounter::load`] and [`Encounter::commit`], never mid-exchange.

mod battle;
mod error;
mod loot;

use std::collections::{BTreeMap, BTreeSet};

use arena_core::{
    Ability, AbilityActivation, AttackOutcome, Character, CharacterId, CombatError,
    CombatResolver, CombatRules, Equipment, HealOutcome, Item, ItemId, Side, TargetRejection,
    UseEffect,
};

pub use battle::BattleSummary;
pub use error::EncounterError;
pub use loot::{LootDrop, LootPile};

use crate::events::{ActionKind, CombatEvent, Reporter, TracingReporter};
use crate::repository::Repositories;

pub type Result<T> = std::result::Result<T, EncounterError>;

/// A single fight between heroes and adversaries.
pub struct Encounter<R = TracingReporter> {
    resolver: CombatResolver,
    participants: BTreeMap<CharacterId, Character>,
    /// Roster order, used for turn order in [`Encounter::run`].
    order: Vec<CharacterId>,
    items: BTreeMap<ItemId, Item>,
    loot: LootPile,
    reporter: R,
    dirty_characters: BTreeSet<CharacterId>,
    dirty_items: BTreeSet<ItemId>,
}

impl<R: Reporter> Encounter<R> {
    pub fn new(rules: CombatRules, reporter: R) -> Self {
        Self {
            resolver: CombatResolver::new(rules),
            participants: BTreeMap::new(),
            order: Vec::new(),
            items: BTreeMap::new(),
            loot: LootPile::new(),
            reporter,
            dirty_characters: BTreeSet::new(),
            dirty_items: BTreeSet::new(),
        }
    }

    /// Loads `ids` and every item their equipment or loot references.
    ///
    /// Fails with [`RepositoryError::NotFound`](crate::repository::RepositoryError::NotFound)
    /// if any of them is missing.
    pub fn load(
        ids: &[CharacterId],
        repos: &Repositories,
        rules: CombatRules,
        reporter: R,
    ) -> Result<Self> {
        let mut encounter = Self::new(rules, reporter);

        for &id in ids {
            let character = repos.characters.fetch(id)?;
            let referenced: Vec<ItemId> = character
                .equipment()
                .into_iter()
                .flat_map(|e| [e.weapon(), e.armor()])
                .chain([character.loot()])
                .flatten()
                .collect();

            for item_id in referenced {
                if !encounter.items.contains_key(&item_id) {
                    encounter.stock(repos.items.fetch(item_id)?);
                }
            }
            encounter.add(character);
        }

        tracing::debug!(
            characters = encounter.participants.len(),
            items = encounter.items.len(),
            "Loaded encounter"
        );
        Ok(encounter)
    }

    /// Adds a participant at the end of the roster, or replaces one with the
    /// same id in place.
    pub fn add(&mut self, character: Character) {
        let id = character.id;
        if self.participants.insert(id, character).is_none() {
            self.order.push(id);
        }
    }

    /// Makes an item available to the encounter.
    pub fn stock(&mut self, item: Item) {
        self.items.insert(item.id, item);
    }

    pub fn rules(&self) -> &CombatRules {
        self.resolver.rules()
    }

    pub fn participant(&self, id: CharacterId) -> Option<&Character> {
        self.participants.get(&id)
    }

    /// Participants in roster order.
    pub fn participants(&self) -> impl Iterator<Item = &Character> {
        self.order.iter().filter_map(|id| self.participants.get(id))
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn loot(&self) -> &LootPile {
        &self.loot
    }

    pub fn loot_mut(&mut self) -> &mut LootPile {
        &mut self.loot
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn reporter_mut(&mut self) -> &mut R {
        &mut self.reporter
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Side with living members when the other side has none.
    pub fn victor(&self) -> Option<Side> {
        let standing = |side: Side| {
            self.participants
                .values()
                .any(|c| c.side() == side && !c.is_defeated())
        };
        match (standing(Side::Heroes), standing(Side::Adversaries)) {
            (true, false) => Some(Side::Heroes),
            (false, true) => Some(Side::Adversaries),
            _ => None,
        }
    }

    /// `attacker` strikes `target` with its own equipment.
    pub fn attack(&mut self, attacker: CharacterId, target: CharacterId) -> Result<AttackOutcome> {
        self.exchange(attacker, target, None)
    }

    /// `attacker` strikes `target` with the weapon slot of `equipment`.
    ///
    /// Items referenced by `equipment` must be stocked in this encounter.
    pub fn attack_with(
        &mut self,
        attacker: CharacterId,
        target: CharacterId,
        equipment: &Equipment,
    ) -> Result<AttackOutcome> {
        self.exchange(attacker, target, Some(equipment))
    }

    fn exchange(
        &mut self,
        attacker: CharacterId,
        target: CharacterId,
        loadout: Option<&Equipment>,
    ) -> Result<AttackOutcome> {
        self.get(attacker)?;

        let result = if attacker == target {
            Err(CombatError::InvalidTarget {
                target,
                reason: TargetRejection::SelfTarget,
            })
        } else {
            // Lift the defender out so the attacker can be borrowed alongside it.
            let mut defender = self
                .participants
                .remove(&target)
                .ok_or(EncounterError::NotInEncounter(target))?;
            let result = match self.participants.get(&attacker) {
                Some(striker) => Some(self.resolver.resolve(
                    striker,
                    loadout.or(striker.equipment()),
                    &mut defender,
                    &mut self.items,
                )),
                None => None,
            };
            self.participants.insert(target, defender);
            result.ok_or(EncounterError::NotInEncounter(attacker))?
        };

        match result {
            Ok(outcome) => {
                self.dirty_characters.insert(target);
                if self.resolver.rules().wears_on_exchange() {
                    self.dirty_items
                        .extend([outcome.weapon, outcome.armor].into_iter().flatten());
                }
                self.report(CombatEvent::Exchange(outcome.clone()));
                if outcome.defeated {
                    self.drop_loot(target);
                }
                Ok(outcome)
            }
            Err(err) => Err(self.reject(attacker, ActionKind::Attack, err)),
        }
    }

    /// Validates `actor` activating `ability` on `target` and reports it.
    pub fn use_ability(
        &mut self,
        actor: CharacterId,
        ability: Ability,
        target: CharacterId,
    ) -> Result<AbilityActivation> {
        let result = self.get(actor)?.use_ability(ability, self.get(target)?);

        match result {
            Ok(activation) => {
                let actor_name = self.name_of(actor);
                let target_name = self.name_of(target);
                self.report(CombatEvent::AbilityUsed {
                    activation,
                    actor_name,
                    target_name,
                });
                Ok(activation)
            }
            Err(err) => Err(self.reject(actor, ActionKind::Ability, err)),
        }
    }

    /// `healer` restores up to `amount` health to `target` (itself allowed).
    ///
    /// Requires the [`Ability::Heal`] ability.
    pub fn heal(
        &mut self,
        healer: CharacterId,
        target: CharacterId,
        amount: u32,
    ) -> Result<HealOutcome> {
        let checked = self
            .get(healer)?
            .use_ability(Ability::Heal, self.get(target)?);
        if let Err(err) = checked {
            return Err(self.reject(healer, ActionKind::Heal, err));
        }

        let patient = self
            .participants
            .get_mut(&target)
            .ok_or(EncounterError::NotInEncounter(target))?;
        match self.resolver.heal(patient, amount) {
            Ok(outcome) => {
                self.dirty_characters.insert(target);
                let healer_name = self.name_of(healer);
                let target_name = self.name_of(target);
                self.report(CombatEvent::Healed {
                    healer,
                    healer_name,
                    target_name,
                    outcome,
                });
                Ok(outcome)
            }
            Err(err) => Err(self.reject(healer, ActionKind::Heal, err)),
        }
    }

    /// `actor` uses `item` on `target`.
    ///
    /// The item need not be equipped, only stocked in the encounter.
    pub fn use_item(
        &mut self,
        actor: CharacterId,
        item: ItemId,
        target: CharacterId,
    ) -> Result<UseEffect> {
        if self.get(actor)?.is_defeated() {
            return Err(self.reject(
                actor,
                ActionKind::UseItem,
                CombatError::AttackerDefeated { actor },
            ));
        }

        let actor_name = self.name_of(actor);
        let target_name = self.name_of(target);
        let used = self
            .items
            .get_mut(&item)
            .ok_or(EncounterError::ItemNotInEncounter(item))?;
        let subject = self
            .participants
            .get_mut(&target)
            .ok_or(EncounterError::NotInEncounter(target))?;
        let result = used.use_on(actor, subject);
        let item_name = used.name.clone();

        match result {
            Ok(effect) => {
                self.dirty_items.insert(item);
                self.dirty_characters.insert(target);
                self.report(CombatEvent::ItemUsed {
                    actor,
                    actor_name,
                    item,
                    item_name,
                    target,
                    target_name,
                    effect,
                });
                if let UseEffect::Struck { defeated: true, .. } = effect {
                    self.drop_loot(target);
                }
                Ok(effect)
            }
            Err(err) => Err(self.reject(actor, ActionKind::UseItem, err)),
        }
    }

    /// Puts `item` into the matching slot of `actor`'s equipment. Returns the
    /// item it replaced.
    ///
    /// An item worn by another participant, or still carried as loot, is
    /// rejected with [`CombatError::ItemInUse`]. A dropped item is claimed
    /// from the loot pile.
    pub fn equip(&mut self, actor: CharacterId, item: ItemId) -> Result<Option<ItemId>> {
        if self.get(actor)?.is_defeated() {
            return Err(self.reject(
                actor,
                ActionKind::Equip,
                CombatError::AttackerDefeated { actor },
            ));
        }
        if !self.items.contains_key(&item) {
            return Err(EncounterError::ItemNotInEncounter(item));
        }
        if self.get(actor)?.equipment().is_none() {
            return Err(EncounterError::NoEquipment(actor));
        }
        if let Some(holder) = self.holder_of(item, actor) {
            return Err(self.reject(
                actor,
                ActionKind::Equip,
                CombatError::ItemInUse { item, holder },
            ));
        }

        if let Some(claimed) = self.loot.claim(item) {
            tracing::debug!(%item, from = %claimed.from, "Claimed loot");
        }

        let gear = self
            .items
            .get(&item)
            .ok_or(EncounterError::ItemNotInEncounter(item))?;
        let equipment = self
            .participants
            .get_mut(&actor)
            .and_then(Character::equipment_mut)
            .ok_or(EncounterError::NoEquipment(actor))?;
        let replaced = equipment.equip(gear);

        self.dirty_characters.insert(actor);
        let actor_name = self.name_of(actor);
        let item_name = self.item_name(item);
        let replaced_name = replaced.map(|old| self.item_name(old));
        self.report(CombatEvent::Equipped {
            actor,
            actor_name,
            item,
            item_name,
            replaced,
            replaced_name,
        });
        Ok(replaced)
    }

    /// Saves every participant and item changed since the last commit.
    pub fn commit(&mut self, repos: &Repositories) -> Result<()> {
        for id in &self.dirty_characters {
            if let Some(character) = self.participants.get(id) {
                repos.characters.save(character)?;
            }
        }
        for id in &self.dirty_items {
            if let Some(item) = self.items.get(id) {
                repos.items.save(item)?;
            }
        }

        tracing::debug!(
            characters = self.dirty_characters.len(),
            items = self.dirty_items.len(),
            "Committed encounter"
        );
        self.dirty_characters.clear();
        self.dirty_items.clear();
        Ok(())
    }

    /// Number of participants and items awaiting [`commit`](Self::commit).
    pub fn pending_changes(&self) -> (usize, usize) {
        (self.dirty_characters.len(), self.dirty_items.len())
    }

    fn get(&self, id: CharacterId) -> Result<&Character> {
        self.participants
            .get(&id)
            .ok_or(EncounterError::NotInEncounter(id))
    }

    /// Participant wearing `item` (other than `actor`), or carrying it as
    /// undropped loot.
    fn holder_of(&self, item: ItemId, actor: CharacterId) -> Option<CharacterId> {
        self.participants.values().find_map(|c| {
            let worn = c.id != actor && c.equipment().is_some_and(|e| e.holds(item));
            (worn || c.loot() == Some(item)).then_some(c.id)
        })
    }

    fn name_of(&self, id: CharacterId) -> String {
        self.participants
            .get(&id)
            .map_or_else(|| id.to_string(), |c| c.name.clone())
    }

    fn item_name(&self, id: ItemId) -> String {
        self.items
            .get(&id)
            .map_or_else(|| id.to_string(), |i| i.name.clone())
    }

    fn drop_loot(&mut self, from: CharacterId) {
        let Some(item) = self
            .participants
            .get_mut(&from)
            .and_then(Character::take_loot)
        else {
            return;
        };

        self.loot.push(from, item);
        self.dirty_characters.insert(from);
        let from_name = self.name_of(from);
        let item_name = self.item_name(item);
        self.report(CombatEvent::LootDropped {
            from,
            from_name,
            item,
            item_name,
        });
    }

    fn report(&mut self, event: CombatEvent) {
        self.reporter.report(&event);
    }

    fn reject(&mut self, actor: CharacterId, action: ActionKind, error: CombatError) -> EncounterError {
        let actor_name = self.name_of(actor);
        self.report(CombatEvent::Rejected {
            actor,
            actor_name,
            action,
            error: error.clone(),
        });
        EncounterError::Combat(error)
    }
}

#[cfg(test)]
mod tests {
    use arena_core::{AbilitySet, EquipmentId};

    use super::*;
    use crate::events::RecordingReporter;

    const HERO: CharacterId = CharacterId(0);
    const GOBLIN: CharacterId = CharacterId(1);
    const SWORD: ItemId = ItemId(1);
    const CLEAVER: ItemId = ItemId(5);
    const AXE: ItemId = ItemId(6);
    const TRINKET: ItemId = ItemId(9);

    fn encounter(goblin_health: u32) -> Encounter<RecordingReporter> {
        let mut encounter = Encounter::new(CombatRules::default(), RecordingReporter::new());
        encounter.stock(Item::weapon(SWORD, "Sword", 10, 20));
        encounter.stock(Item::armor(TRINKET, "Trinket", 1, 1));
        encounter.add(
            Character::player(HERO, "Hero", 30)
                .with_abilities(AbilitySet::HEAL)
                .with_equipment(Equipment::builder(EquipmentId(1)).weapon(SWORD).build()),
        );
        encounter.add(Character::goblin(GOBLIN, "Goblin", goblin_health).with_loot(TRINKET));
        encounter
    }

    #[test]
    fn self_attack_is_reported_and_harmless() {
        let mut encounter = encounter(20);

        let err = encounter.attack(HERO, HERO).unwrap_err();

        assert!(matches!(
            err.as_combat(),
            Some(CombatError::InvalidTarget {
                reason: TargetRejection::SelfTarget,
                ..
            })
        ));
        assert_eq!(encounter.participant(HERO).unwrap().health.current(), 30);
        assert_eq!(encounter.reporter().rejections().count(), 1);
        assert_eq!(encounter.pending_changes(), (0, 0));
    }

    #[test]
    fn defeat_drops_loot_once() {
        let mut encounter = encounter(10);

        let outcome = encounter.attack(HERO, GOBLIN).unwrap();
        assert!(outcome.defeated);
        assert!(encounter.loot().contains(TRINKET));
        assert_eq!(encounter.participant(GOBLIN).unwrap().loot(), None);

        let again = encounter.attack(HERO, GOBLIN);
        assert!(matches!(
            again,
            Err(EncounterError::Combat(CombatError::InvalidTarget {
                reason: TargetRejection::AlreadyDefeated,
                ..
            }))
        ));
        assert_eq!(encounter.loot().len(), 1);
        assert_eq!(encounter.victor(), Some(Side::Heroes));
    }

    #[test]
    fn exchange_wears_both_contributing_items() {
        let mut encounter = encounter(20);

        encounter.attack(HERO, GOBLIN).unwrap();

        assert_eq!(encounter.item(SWORD).unwrap().durability().0, 19);
        assert_eq!(encounter.pending_changes(), (1, 1));
    }

    #[test]
    fn heal_requires_the_ability() {
        let mut encounter = encounter(20);
        encounter.attack(HERO, GOBLIN).unwrap();

        let err = encounter.heal(GOBLIN, GOBLIN, 5).unwrap_err();
        assert!(matches!(
            err.as_combat(),
            Some(CombatError::AbilityNotOwned { .. })
        ));

        let outcome = encounter.heal(HERO, GOBLIN, 50).unwrap();
        assert_eq!(outcome.restored, 10);
        assert_eq!(outcome.health_after, 20);
    }

    #[test]
    fn unknown_participant_is_not_reported() {
        let mut encounter = encounter(20);

        let err = encounter.attack(HERO, CharacterId(42)).unwrap_err();

        assert!(matches!(err, EncounterError::NotInEncounter(CharacterId(42))));
        assert!(encounter.reporter().events().is_empty());
        assert!(encounter.participant(GOBLIN).is_some());
    }

    #[test]
    fn worn_out_item_cannot_be_used() {
        let mut encounter = encounter(20);
        encounter.stock(Item::weapon(ItemId(5), "Stub", 4, 0));

        let err = encounter.use_item(HERO, ItemId(5), GOBLIN).unwrap_err();

        assert!(matches!(
            err.as_combat(),
            Some(CombatError::ItemUnusable { item: ItemId(5) })
        ));
        assert_eq!(encounter.participant(GOBLIN).unwrap().health.current(), 20);
    }

    fn weapon_of(encounter: &Encounter<RecordingReporter>, id: CharacterId) -> Option<ItemId> {
        encounter.participant(id)?.equipment()?.weapon()
    }

    #[test]
    fn attack_with_borrowed_equipment_uses_its_weapon() {
        let mut encounter = encounter(30);
        encounter.stock(Item::weapon(AXE, "Axe", 25, 20));
        let loan = Equipment::builder(EquipmentId(7)).weapon(AXE).build();

        let outcome = encounter.attack_with(HERO, GOBLIN, &loan).unwrap();

        assert_eq!(outcome.weapon, Some(AXE));
        assert_eq!(outcome.damage, 25);
        assert_eq!(outcome.health_after, 5);
        assert_eq!(encounter.item(AXE).unwrap().durability().0, 19);
        assert_eq!(encounter.item(SWORD).unwrap().durability().0, 20);
        assert_eq!(weapon_of(&encounter, HERO), Some(SWORD));
        assert_eq!(
            encounter.reporter().events(),
            [CombatEvent::Exchange(outcome)].as_slice()
        );
    }

    #[test]
    fn thrown_weapon_defeats_and_drops_loot() {
        let mut encounter = encounter(10);

        let effect = encounter.use_item(HERO, SWORD, GOBLIN).unwrap();

        assert_eq!(
            effect,
            UseEffect::Struck {
                damage: 10,
                defeated: true
            }
        );
        assert!(encounter.participant(GOBLIN).unwrap().is_defeated());
        assert!(encounter.loot().contains(TRINKET));
        assert_eq!(encounter.item(SWORD).unwrap().durability().0, 19);
        assert_eq!(encounter.pending_changes(), (1, 1));

        let narration: Vec<String> = encounter
            .reporter()
            .events()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            narration,
            [
                "Hero hurls Sword at Goblin for 10 damage. Goblin is defeated!",
                "Goblin drops Trinket.",
            ]
        );
    }

    #[test]
    fn equip_replaces_slot_and_reports() {
        let mut encounter = encounter(20);
        encounter.stock(Item::weapon(AXE, "Axe", 25, 20));

        let replaced = encounter.equip(HERO, AXE).unwrap();

        assert_eq!(replaced, Some(SWORD));
        assert_eq!(weapon_of(&encounter, HERO), Some(AXE));
        assert_eq!(encounter.pending_changes(), (1, 0));
        let last = encounter.reporter().events().last().unwrap();
        assert!(matches!(
            last,
            CombatEvent::Equipped {
                item: AXE,
                replaced: Some(SWORD),
                ..
            }
        ));
        assert_eq!(last.to_string(), "Hero swaps Sword for Axe.");
    }

    #[test]
    fn equip_rejects_item_worn_by_another() {
        let mut encounter = encounter(20);
        encounter.stock(Item::weapon(CLEAVER, "Cleaver", 6, 10));
        encounter.add(
            Character::goblin(GOBLIN, "Goblin", 20)
                .with_equipment(Equipment::builder(EquipmentId(2)).weapon(CLEAVER).build()),
        );

        let err = encounter.equip(HERO, CLEAVER).unwrap_err();

        assert!(matches!(
            err.as_combat(),
            Some(CombatError::ItemInUse {
                item: CLEAVER,
                holder: GOBLIN
            })
        ));
        assert_eq!(weapon_of(&encounter, HERO), Some(SWORD));
        assert_eq!(weapon_of(&encounter, GOBLIN), Some(CLEAVER));
        assert_eq!(encounter.reporter().rejections().count(), 1);
        assert_eq!(encounter.pending_changes(), (0, 0));
    }

    #[test]
    fn equip_rejects_undropped_loot() {
        let mut encounter = encounter(20);

        let err = encounter.equip(HERO, TRINKET).unwrap_err();

        assert!(matches!(
            err.as_combat(),
            Some(CombatError::ItemInUse {
                item: TRINKET,
                holder: GOBLIN
            })
        ));
        assert_eq!(encounter.participant(GOBLIN).unwrap().loot(), Some(TRINKET));
        let hero = encounter.participant(HERO).unwrap();
        assert_eq!(hero.equipment().unwrap().armor(), None);
    }

    #[test]
    fn equip_claims_dropped_loot() {
        let mut encounter = encounter(10);
        encounter.attack(HERO, GOBLIN).unwrap();
        assert!(encounter.loot().contains(TRINKET));

        let replaced = encounter.equip(HERO, TRINKET).unwrap();

        assert_eq!(replaced, None);
        assert!(encounter.loot().is_empty());
        let hero = encounter.participant(HERO).unwrap();
        assert_eq!(hero.equipment().unwrap().armor(), Some(TRINKET));
        assert_eq!(
            encounter.reporter().events().last().unwrap().to_string(),
            "Hero equips Trinket."
        );
    }

    #[test]
    fn equip_without_equipment_fails() {
        let mut encounter = encounter(20);

        let err = encounter.equip(GOBLIN, SWORD).unwrap_err();

        assert!(matches!(err, EncounterError::NoEquipment(GOBLIN)));
    }
}
