//! Automatic round-based battle.

use arena_core::{CharacterId, Side};

use super::Encounter;
use crate::events::{CombatEvent, Reporter};

/// How an automatic battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleSummary {
    pub rounds: u32,
    /// `None` when the round limit ran out first.
    pub victor: Option<Side>,
}

impl<R: Reporter> Encounter<R> {
    /// Fights until one side is wiped out or `max_rounds` have passed.
    ///
    /// Each round, every living participant in roster order attacks the
    /// first living member of the opposing side.
    pub fn run(&mut self, max_rounds: u32) -> BattleSummary {
        let mut rounds = 0;

        while rounds < max_rounds && self.victor().is_none() {
            rounds += 1;
            tracing::debug!(round = rounds, "Round start");

            for attacker in self.order.clone() {
                let Some(side) = self
                    .participant(attacker)
                    .filter(|c| !c.is_defeated())
                    .map(|c| c.side())
                else {
                    continue;
                };
                let Some(target) = self.first_standing(side.opponent()) else {
                    break;
                };

                // Rejections are already reported; the round goes on.
                if let Err(err) = self.attack(attacker, target) {
                    tracing::debug!(%attacker, %target, error = %err, "Attack failed");
                }
            }
        }

        let summary = BattleSummary {
            rounds,
            victor: self.victor(),
        };
        self.report(CombatEvent::BattleEnded {
            rounds: summary.rounds,
            victor: summary.victor,
        });
        summary
    }

    fn first_standing(&self, side: Side) -> Option<CharacterId> {
        self.participants()
            .find(|c| c.side() == side && !c.is_defeated())
            .map(|c| c.id)
    }
}

#[cfg(test)]
mod tests {
    use arena_core::{Character, CombatRules, Equipment, EquipmentId, Item, ItemId};

    use super::*;
    use crate::events::RecordingReporter;

    #[test]
    fn armed_hero_beats_unarmed_goblins() {
        let mut encounter = Encounter::new(CombatRules::default(), RecordingReporter::new());
        encounter.stock(Item::weapon(ItemId(1), "Sword", 10, 100));
        encounter.add(
            Character::player(CharacterId(0), "Hero", 30)
                .with_equipment(Equipment::builder(EquipmentId(1)).weapon(ItemId(1)).build()),
        );
        encounter.add(Character::goblin(CharacterId(1), "A", 10));
        encounter.add(Character::goblin(CharacterId(2), "B", 15));

        let summary = encounter.run(10);

        assert_eq!(summary.victor, Some(Side::Heroes));
        assert_eq!(summary.rounds, 3);
        assert!(matches!(
            encounter.reporter().events().last(),
            Some(CombatEvent::BattleEnded { rounds: 3, .. })
        ));
    }

    #[test]
    fn stalemate_stops_at_round_limit() {
        let mut encounter = Encounter::new(CombatRules::default(), RecordingReporter::new());
        encounter.add(Character::player(CharacterId(0), "Hero", 5));
        encounter.add(Character::goblin(CharacterId(1), "Goblin", 5));

        let summary = encounter.run(4);

        assert_eq!(summary, BattleSummary { rounds: 4, victor: None });
        assert_eq!(encounter.participant(CharacterId(0)).unwrap().health.current(), 5);
    }
}
