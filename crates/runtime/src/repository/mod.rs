//! Repository layer for characters and items.
//!
//! Repositories load participants before an encounter and persist their
//! mutations (health, equipment references, durability) after it. They never
//! take part in damage computation.
//!
//! - [`memory`] keeps domain values in process, for tests and local runs
//! - [`file`] keeps one JSON table per record kind; every item variant shares
//!   the same table, disambiguated by [`ItemTag`](arena_core::ItemTag)

mod error;
mod records;
mod traits;

pub mod file;
pub mod memory;

use std::path::Path;
use std::sync::Arc;

pub use error::{RecordKind, RepositoryError, Result};
pub use file::{FileCharacterRepository, FileItemRepository};
pub use memory::{InMemoryCharacterRepo, InMemoryItemRepo};
pub use records::{CharacterRecord, CharacterTag, ItemRecord};
pub use traits::{CharacterRepository, ItemRepository};

/// The pair of repositories an encounter loads from and commits to.
#[derive(Clone)]
pub struct Repositories {
    pub characters: Arc<dyn CharacterRepository>,
    pub items: Arc<dyn ItemRepository>,
}

impl Repositories {
    pub fn new(characters: Arc<dyn CharacterRepository>, items: Arc<dyn ItemRepository>) -> Self {
        Self { characters, items }
    }

    /// Empty in-memory repositories.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryCharacterRepo::new()),
            Arc::new(InMemoryItemRepo::new()),
        )
    }

    /// JSON tables under `base_dir` (created if missing).
    pub fn file(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        Ok(Self::new(
            Arc::new(FileCharacterRepository::new(base_dir)?),
            Arc::new(FileItemRepository::new(base_dir)?),
        ))
    }
}
