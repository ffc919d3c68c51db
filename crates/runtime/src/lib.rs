//! Runtime adapters around the arena combat core.
//!
//! Modules are organized by responsibility:
//! - [`repository`] loads and saves characters and items
//! - [`events`] carries combat events to reporters and bus subscribers
//! - [`encounter`] orchestrates a fight between loaded participants
pub mod encounter;
pub mod events;
pub mod repository;

pub use encounter::{BattleSummary, Encounter, EncounterError, LootDrop, LootPile};
pub use events::{
    ActionKind, CombatEvent, EventBus, RecordingReporter, Reporter, Topic, TracingReporter,
};
pub use repository::{
    CharacterRepository, FileCharacterRepository, FileItemRepository, InMemoryCharacterRepo,
    InMemoryItemRepo, ItemRepository, Repositories, RepositoryError,
};
