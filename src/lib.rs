pub mod adapters;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::{FileStore, MemoryStore};
pub use crate::config::AppConfig;
pub use crate::core::engine::{GenerateOutcome, TeamEngine};
pub use crate::core::partition::{partition, partition_with_rng};
pub use crate::core::roster::RosterStore;
pub use crate::core::session::SessionState;
pub use crate::domain::model::{PartitionResult, TeamSize};
pub use crate::utils::error::{Result, TeamError};
