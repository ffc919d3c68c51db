//! Combat rules loader.

use std::path::Path;

use arena_core::CombatRules;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat rules from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load combat rules from a TOML file.
    ///
    /// Missing keys fall back to [`CombatRules::default`].
    pub fn load(path: &Path) -> LoadResult<CombatRules> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatRules> {
        let rules: CombatRules = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules TOML: {}", e))?;

        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use arena_core::DurabilityPolicy;

    use super::*;

    #[test]
    fn partial_rules_use_defaults() {
        let rules = ConfigLoader::parse("unarmed_attack = 1\n").unwrap();

        assert_eq!(rules.unarmed_attack, 1);
        assert_eq!(rules.unarmored_defense, 0);
        assert_eq!(rules.durability, DurabilityPolicy::PerExchange);
    }

    #[test]
    fn durability_policy_is_snake_case() {
        let rules = ConfigLoader::parse("durability = \"explicit_use\"\n").unwrap();
        assert_eq!(rules.durability, DurabilityPolicy::ExplicitUse);
    }
}
