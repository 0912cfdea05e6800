use crate::domain::model::TeamSize;
use crate::utils::error::Result;
use std::time::Duration;

pub const PLAYERS_KEY: &str = "random-team-players";
pub const RESULT_KEY: &str = "random-team-result";
pub const TEAM_SIZE_KEY: &str = "random-team-size";

/// String-keyed persistent store. Clones are handles onto the same data.
pub trait KeyValueStore: Clone + Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn store_path(&self) -> &str;
    fn generation_delay(&self) -> Duration;
    fn default_team_size(&self) -> TeamSize;
    fn name_separator(&self) -> &str;
}
