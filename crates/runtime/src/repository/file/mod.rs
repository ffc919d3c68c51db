//! File-based repository implementations.
//!
//! Each record kind is one JSON table under a base directory:
//!
//! ```text
//! base_dir/
//! ├── characters.json
//! └── items.json
//! ```

mod characters;
mod items;
mod table;

pub use characters::FileCharacterRepository;
pub use items::FileItemRepository;

use super::{CharacterRecord, ItemRecord};

impl table::Row for CharacterRecord {
    fn key(&self) -> u32 {
        self.id
    }
}

impl table::Row for ItemRecord {
    fn key(&self) -> u32 {
        self.id
    }
}
