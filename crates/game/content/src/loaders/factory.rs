//! Content factory for loading a complete arena from data files.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use arena_core::{Character, CombatRules, Item, ItemId, ItemTag};

use crate::loaders::{ActorLoader, ActorSpec, ConfigLoader, ItemLoader, LoadResult};

/// Everything needed to stage an encounter.
#[derive(Debug, Clone)]
pub struct Content {
    pub rules: CombatRules,
    pub items: BTreeMap<ItemId, Item>,
    pub roster: Vec<Character>,
}

/// Content factory that loads all arena content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── items.ron
/// └── actors.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Directory bundled with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load combat rules from `config.toml`, or defaults if the file is absent.
    pub fn load_config(&self) -> LoadResult<CombatRules> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(CombatRules::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<Item>> {
        let path = self.data_dir.join("items.ron");
        ItemLoader::load(&path)
    }

    /// Load actor roster from `actors.ron`.
    pub fn load_actors(&self) -> LoadResult<Vec<ActorSpec>> {
        let path = self.data_dir.join("actors.ron");
        ActorLoader::load(&path)
    }

    /// Load and cross-check all content.
    ///
    /// Fails on duplicate ids, equipment slots referencing missing items or
    /// items of the wrong kind, an item equipped twice, and loot that does
    /// not exist.
    pub fn load(&self) -> LoadResult<Content> {
        let rules = self.load_config()?;
        let items = index_items(self.load_items()?)?;
        let actors = self.load_actors()?;
        validate_actors(&actors, &items)?;

        Ok(Content {
            rules,
            items,
            roster: actors.into_iter().map(ActorSpec::into_character).collect(),
        })
    }
}

fn index_items(items: Vec<Item>) -> LoadResult<BTreeMap<ItemId, Item>> {
    let mut index = BTreeMap::new();
    for item in items {
        let id = item.id;
        if index.insert(id, item).is_some() {
            anyhow::bail!("Duplicate item id {}", id);
        }
    }
    Ok(index)
}

fn validate_actors(actors: &[ActorSpec], items: &BTreeMap<ItemId, Item>) -> LoadResult<()> {
    let mut character_ids = BTreeSet::new();
    let mut equipment_ids = BTreeSet::new();
    let mut equipped = BTreeSet::new();

    for actor in actors {
        if !character_ids.insert(actor.id) {
            anyhow::bail!("Duplicate character id {}", actor.id);
        }

        if let Some(spec) = &actor.equipment {
            if !equipment_ids.insert(spec.id) {
                anyhow::bail!("Duplicate equipment id {} on '{}'", spec.id, actor.name);
            }
            let slots = [(spec.weapon, ItemTag::Weapon), (spec.armor, ItemTag::Armor)];
            for (slot, expected) in slots {
                let Some(id) = slot else { continue };
                let item = items.get(&id).ok_or_else(|| {
                    anyhow::anyhow!("'{}' equips unknown item {}", actor.name, id)
                })?;
                if item.tag() != expected {
                    anyhow::bail!(
                        "'{}' equips {} '{}' in its {} slot",
                        actor.name,
                        item.tag(),
                        item.name,
                        expected
                    );
                }
                if !equipped.insert(id) {
                    anyhow::bail!("Item {} is equipped by more than one character", id);
                }
            }
        }

        if let crate::loaders::KindSpec::Goblin { loot: Some(id) } = &actor.kind
            && !items.contains_key(id)
        {
            anyhow::bail!("'{}' drops unknown item {}", actor.name, id);
        }
    }

    Ok(())
}
