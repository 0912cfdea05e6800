use crate::config::toml_config::TomlConfig;
use crate::config::AppConfig;
use crate::domain::model::TeamSize;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "random-team")]
#[command(about = "Keep a list of players and pick a random team from it")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Store file (overrides storage.path)
    #[arg(long, global = true)]
    pub store: Option<String>,

    /// Artificial delay before the result is shown, in milliseconds
    #[arg(long, global = true)]
    pub delay_ms: Option<u64>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Add one or more players (comma separated)
    Add {
        #[arg(required = true, num_args = 1..)]
        names: Vec<String>,
    },
    /// Remove the player at a position, as shown by `list`
    Remove { position: usize },
    /// Show the current players
    List,
    /// Remove every player
    Clear,
    /// Show or change the team size (2, 3 or 5)
    Size { size: Option<TeamSize> },
    /// Pick a random team from the current players
    Generate,
    /// Show the last generated team
    Show,
}

impl CliConfig {
    /// Defaults, then the TOML file (if any), then command-line flags.
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = AppConfig::default();

        if let Some(path) = &self.config {
            tracing::debug!("Loading configuration from {}", path);
            TomlConfig::from_file(path)?.apply_to(&mut config)?;
        }

        if let Some(store) = &self.store {
            config.store_path = store.clone();
        }
        if let Some(delay_ms) = self.delay_ms {
            config.delay_ms = delay_ms;
        }

        Ok(config)
    }
}
