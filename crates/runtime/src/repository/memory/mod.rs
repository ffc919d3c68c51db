//! In-memory repository implementations for testing and development.

mod characters;
mod items;

pub use characters::InMemoryCharacterRepo;
pub use items::InMemoryItemRepo;
