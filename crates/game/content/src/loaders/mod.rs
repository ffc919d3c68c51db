//! Content loaders for reading arena data from files.

pub mod actors;
pub mod config;
pub mod factory;
pub mod item;

pub use actors::{ActorLoader, ActorSpec, EquipmentSpec, KindSpec};
pub use config::ConfigLoader;
pub use factory::{Content, ContentFactory};
pub use item::ItemLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
