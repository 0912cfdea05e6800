#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::roster::DEFAULT_SEPARATOR;
use crate::domain::model::TeamSize;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::time::Duration;

pub const DEFAULT_STORE_PATH: &str = "./random-team.json";
pub const DEFAULT_DELAY_MS: u64 = 2000;
pub const MAX_DELAY_MS: u64 = 60_000;

/// Fully resolved settings: defaults, then the TOML file, then CLI flags.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_path: String,
    pub delay_ms: u64,
    pub default_team_size: TeamSize,
    pub separator: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_path: DEFAULT_STORE_PATH.to_string(),
            delay_ms: DEFAULT_DELAY_MS,
            default_team_size: TeamSize::default(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl ConfigProvider for AppConfig {
    fn store_path(&self) -> &str {
        &self.store_path
    }

    fn generation_delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    fn default_team_size(&self) -> TeamSize {
        self.default_team_size
    }

    fn name_separator(&self) -> &str {
        &self.separator
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("storage.path", &self.store_path)?;
        validation::validate_range("generation.delay_ms", self.delay_ms, 0, MAX_DELAY_MS)?;
        validation::validate_non_empty_string("roster.separator", &self.separator)?;
        Ok(())
    }
}
