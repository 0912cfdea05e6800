use crate::config::AppConfig;
use crate::domain::model::TeamSize;
use crate::utils::error::{Result, TeamError};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional settings file. Every section and key may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub roster: RosterConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub delay_ms: Option<u64>,
    pub default_team_size: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterConfig {
    pub separator: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TeamError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TeamError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RANDOM_TEAM_STORE})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TeamError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 套用到既有設定上，只覆蓋檔案中有寫的欄位
    pub fn apply_to(&self, config: &mut AppConfig) -> Result<()> {
        if let Some(path) = &self.storage.path {
            config.store_path = path.clone();
        }
        if let Some(delay_ms) = self.generation.delay_ms {
            config.delay_ms = delay_ms;
        }
        if let Some(size) = self.generation.default_team_size {
            config.default_team_size = TeamSize::try_from(size).map_err(|_| {
                TeamError::InvalidConfigValueError {
                    field: "generation.default_team_size".to_string(),
                    value: size.to_string(),
                    reason: "Team size must be one of 2, 3, 5".to_string(),
                }
            })?;
        }
        if let Some(separator) = &self.roster.separator {
            config.separator = separator.clone();
        }
        Ok(())
    }

    pub fn to_app_config(&self) -> Result<AppConfig> {
        let mut config = AppConfig::default();
        self.apply_to(&mut config)?;
        Ok(config)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.to_app_config()?.validate()
    }
}
