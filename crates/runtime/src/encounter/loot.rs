//! Items dropped by defeated adversaries.

use arena_core::{CharacterId, ItemId};

/// One dropped item and who dropped it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LootDrop {
    pub from: CharacterId,
    pub item: ItemId,
}

/// Loot collected during an encounter, in drop order.
#[derive(Debug, Clone, Default)]
pub struct LootPile {
    drops: Vec<LootDrop>,
}

impl LootPile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, from: CharacterId, item: ItemId) {
        self.drops.push(LootDrop { from, item });
    }

    pub fn drops(&self) -> &[LootDrop] {
        &self.drops
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.drops.iter().any(|d| d.item == item)
    }

    pub fn len(&self) -> usize {
        self.drops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    /// Removes `item` from the pile.
    pub fn claim(&mut self, item: ItemId) -> Option<LootDrop> {
        let index = self.drops.iter().position(|d| d.item == item)?;
        Some(self.drops.remove(index))
    }

    pub fn take_all(&mut self) -> Vec<LootDrop> {
        std::mem::take(&mut self.drops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_removes_one_drop() {
        let mut pile = LootPile::new();
        pile.push(CharacterId(1), ItemId(4));
        pile.push(CharacterId(2), ItemId(5));

        let drop = pile.claim(ItemId(4)).unwrap();

        assert_eq!(drop.from, CharacterId(1));
        assert!(!pile.contains(ItemId(4)));
        assert_eq!(pile.len(), 1);
        assert_eq!(pile.claim(ItemId(4)), None);
    }
}
