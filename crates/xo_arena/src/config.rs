//! Arena configuration.
//!
//! Values come from an optional TOML file; command-line flags override
//! them afterwards. Every field has a default, so an empty file is valid.

use crate::{ArenaError, Timings};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};
use xo_engine::{DEFAULT_HINTS, DEFAULT_UNDOS, GameMode, InMemoryLedger, SessionConfig, Tier};

/// Configuration for an arena session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Player-vs-AI or hot-seat.
    mode: GameMode,

    /// AI difficulty.
    tier: Tier,

    /// Artificial AI thinking delay in milliseconds.
    ai_delay_ms: u64,

    /// How long a hint stays visible in milliseconds.
    hint_duration_ms: u64,

    /// Hint charges granted at start-up.
    starting_hints: u32,

    /// Undo charges granted at start-up.
    starting_undos: u32,

    /// Tracing filter used when `RUST_LOG` is unset.
    log_filter: String,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            tier: Tier::default(),
            ai_delay_ms: 800,
            hint_duration_ms: 3_000,
            starting_hints: DEFAULT_HINTS,
            starting_undos: DEFAULT_UNDOS,
            log_filter: "warn".to_string(),
        }
    }
}

impl ArenaConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ArenaError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ArenaError::new(format!("Failed to read config file: {}", e)))?;
        let config: Self = toml::from_str(&content)?;
        info!(mode = %config.mode, tier = %config.tier, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if given, otherwise the defaults.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ArenaError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Overrides the mode.
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    /// Overrides the tier.
    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = tier;
        self
    }

    /// Overrides the AI delay.
    pub fn with_ai_delay_ms(mut self, ms: u64) -> Self {
        self.ai_delay_ms = ms;
        self
    }

    /// Session settings for the engine.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::new(self.mode, self.tier)
    }

    /// Fresh ledger with the configured starting charges.
    pub fn ledger(&self) -> InMemoryLedger {
        InMemoryLedger::new(self.starting_hints, self.starting_undos)
    }

    /// AI delay as a duration.
    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.ai_delay_ms)
    }

    /// Hint display duration.
    pub fn hint_duration(&self) -> Duration {
        Duration::from_millis(self.hint_duration_ms)
    }

    /// Delays for the arena driver.
    pub fn timings(&self) -> Timings {
        Timings {
            ai_delay: self.ai_delay(),
            hint_duration: self.hint_duration(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_reference_timings() {
        let config = ArenaConfig::default();
        assert_eq!(config.ai_delay(), Duration::from_millis(800));
        assert_eq!(config.hint_duration(), Duration::from_secs(3));
        assert_eq!(config.ledger(), InMemoryLedger::new(3, 2));
        assert_eq!(*config.mode(), GameMode::PlayerVsAi);
        assert_eq!(*config.tier(), Tier::Grandmaster);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tier = \"chaos\"\nmode = \"pvp\"\nai_delay_ms = 10").unwrap();

        let config = ArenaConfig::from_file(file.path()).unwrap();
        assert_eq!(*config.tier(), Tier::Chaos);
        assert_eq!(*config.mode(), GameMode::PlayerVsPlayer);
        assert_eq!(*config.ai_delay_ms(), 10);
        assert_eq!(*config.starting_hints(), 3);
        assert_eq!(config.log_filter(), "warn");
    }

    #[test]
    fn test_bad_file_reports_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tier = \"impossible\"").unwrap();
        let err = ArenaConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.contains("Config parse error"));

        let missing = ArenaConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(missing.message.contains("Failed to read config file"));
    }

    #[test]
    fn test_load_without_path_is_default() {
        assert_eq!(ArenaConfig::load(None).unwrap(), ArenaConfig::default());
    }
}
