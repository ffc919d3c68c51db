//! Read/write access to item data from inside the combat core.
//!
//! Equipment slots hold [`ItemId`] references only; the item records
//! themselves live in whatever store the caller owns. The resolver reaches
//! them through [`ItemStore`] so it never depends on a storage technology.

use std::collections::BTreeMap;

use crate::state::{Item, ItemId};

/// Lookup of item records by identifier.
pub trait ItemStore {
    fn item(&self, id: ItemId) -> Option<&Item>;

    fn item_mut(&mut self, id: ItemId) -> Option<&mut Item>;
}

impl ItemStore for BTreeMap<ItemId, Item> {
    fn item(&self, id: ItemId) -> Option<&Item> {
        self.get(&id)
    }

    fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.get_mut(&id)
    }
}

