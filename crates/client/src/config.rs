//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Default round limit for the automatic battle.
pub const DEFAULT_MAX_ROUNDS: u32 = 50;

/// Configuration required to stage and run an arena battle.
#[derive(Clone, Debug)]
pub struct ArenaConfig {
    /// Content directory; the bundled content when unset.
    pub data_dir: Option<PathBuf>,
    /// Directory for the JSON tables; in-memory storage when unset.
    pub save_dir: Option<PathBuf>,
    /// Use the platform data directory when no save dir is given.
    pub persist: bool,
    pub max_rounds: u32,
    /// Directory for rolling log files; stderr when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            save_dir: None,
            persist: false,
            max_rounds: DEFAULT_MAX_ROUNDS,
            log_dir: None,
        }
    }
}

impl ArenaConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_DATA_DIR` - Content directory (default: bundled content)
    /// - `ARENA_SAVE_DIR` - Save directory (default: in-memory)
    /// - `ARENA_PERSIST` - Save under the platform data directory (default: false)
    /// - `ARENA_MAX_ROUNDS` - Round limit (default: 50)
    /// - `ARENA_LOG_DIR` - Log to daily files in this directory (default: stderr)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        config.data_dir = lookup("ARENA_DATA_DIR").map(PathBuf::from);
        config.save_dir = lookup("ARENA_SAVE_DIR").map(PathBuf::from);
        config.log_dir = lookup("ARENA_LOG_DIR").map(PathBuf::from);

        if let Some(rounds) = parse::<u32>(lookup("ARENA_MAX_ROUNDS")) {
            config.max_rounds = rounds.max(1);
        }

        // A bare `ARENA_PERSIST=` also counts as enabled.
        config.persist = lookup("ARENA_PERSIST")
            .is_some_and(|value| matches!(value.trim(), "" | "1" | "true" | "yes"));

        config
    }

    /// Where the JSON tables live, if anywhere.
    pub fn save_location(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.save_dir {
            return Some(dir.clone());
        }
        if !self.persist {
            return None;
        }
        directories::ProjectDirs::from("", "", "arena").map(|dirs| dirs.data_dir().join("saves"))
    }
}

fn parse<T>(value: Option<String>) -> Option<T>
where
    T: std::str::FromStr,
{
    value?.parse().ok()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> ArenaConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ArenaConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_in_memory_bundled_run() {
        let config = config(&[]);

        assert_eq!(config.max_rounds, DEFAULT_MAX_ROUNDS);
        assert_eq!(config.save_location(), None);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn save_dir_wins_over_persist() {
        let config = config(&[("ARENA_SAVE_DIR", "/tmp/arena"), ("ARENA_PERSIST", "1")]);

        assert!(config.persist);
        assert_eq!(config.save_location(), Some(PathBuf::from("/tmp/arena")));
    }

    #[test]
    fn bad_round_limit_keeps_default() {
        assert_eq!(config(&[("ARENA_MAX_ROUNDS", "many")]).max_rounds, DEFAULT_MAX_ROUNDS);
        assert_eq!(config(&[("ARENA_MAX_ROUNDS", "0")]).max_rounds, 1);
    }

    #[test]
    fn persist_accepts_common_spellings() {
        assert!(config(&[("ARENA_PERSIST", "true")]).persist);
        assert!(config(&[("ARENA_PERSIST", "")]).persist);
        assert!(!config(&[("ARENA_PERSIST", "0")]).persist);
        assert!(!config(&[("ARENA_PERSIST", "false")]).persist);
    }
}
