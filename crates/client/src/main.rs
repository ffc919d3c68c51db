//! Arena client binary.
//!
//! Composition root: loads content, seeds the repositories, runs one
//! automatic battle and narrates it on stdout while logs go through
//! `tracing`.
//!
//! ```bash
//! # Bundled content, in-memory storage
//! cargo run -p arena-client
//!
//! # Keep state between runs
//! ARENA_SAVE_DIR=./saves cargo run -p arena-client
//! ```
mod config;
mod logging;

use anyhow::{Context, Result};
use arena_content::{Content, ContentFactory};
use arena_core::CharacterId;
use arena_runtime::{CombatEvent, Encounter, EventBus, Repositories, Topic, TracingReporter};
use tokio::sync::broadcast;

use crate::config::ArenaConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ArenaConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    let factory = match &config.data_dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::bundled(),
    };
    let content = factory
        .load()
        .with_context(|| format!("loading content from {}", factory.data_dir().display()))?;
    tracing::info!(
        "Loaded {} characters and {} items",
        content.roster.len(),
        content.items.len()
    );

    let repos = match config.save_location() {
        Some(dir) => {
            tracing::info!("Saving to {}", dir.display());
            Repositories::file(&dir)?
        }
        None => Repositories::in_memory(),
    };
    let ids = seed(&repos, &content)?;

    let bus = EventBus::with_capacity(1024);
    let narrator = tokio::spawn(narrate(
        bus.subscribe(Topic::Combat),
        bus.subscribe(Topic::Loot),
    ));

    let mut encounter = Encounter::load(&ids, &repos, content.rules, (TracingReporter, bus))?;
    let summary = encounter.run(config.max_rounds);
    encounter.commit(&repos)?;

    let dropped = encounter.loot().len();
    // Dropping the encounter closes the bus and ends the narrator.
    drop(encounter);
    narrator.await?;

    tracing::info!(
        rounds = summary.rounds,
        victor = ?summary.victor,
        dropped,
        "Battle finished"
    );
    Ok(())
}

/// Stores roster entries and items the repositories do not know yet, so a
/// saved arena resumes where it stopped.
fn seed(repos: &Repositories, content: &Content) -> Result<Vec<CharacterId>> {
    for item in content.items.values() {
        if !repos.items.exists(item.id) {
            repos.items.save(item)?;
        }
    }
    for character in &content.roster {
        if !repos.characters.exists(character.id) {
            repos.characters.save(character)?;
        }
    }
    Ok(content.roster.iter().map(|c| c.id).collect())
}

async fn narrate(
    mut combat: broadcast::Receiver<CombatEvent>,
    mut loot: broadcast::Receiver<CombatEvent>,
) {
    let mut combat_open = true;
    let mut loot_open = true;

    while combat_open || loot_open {
        tokio::select! {
            event = combat.recv(), if combat_open => match event {
                Ok(event) => println!("{event}"),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!("Narration skipped {} combat events", missed);
                }
                Err(broadcast::error::RecvError::Closed) => combat_open = false,
            },
            event = loot.recv(), if loot_open => match event {
                Ok(event) => println!("  * {event}"),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!("Narration skipped {} loot events", missed);
                }
                Err(broadcast::error::RecvError::Closed) => loot_open = false,
            },
        }
    }
}
