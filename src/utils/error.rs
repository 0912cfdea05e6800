use thiserror::Error;

#[derive(Error, Debug)]
pub enum TeamError {
    #[error("Not enough players: need at least {required}, have {available}")]
    InsufficientPlayers { required: usize, available: usize },

    #[error("Invalid team size: {value} (allowed: 2, 3, 5)")]
    InvalidTeamSize { value: String },

    #[error("A team generation is already in progress")]
    GenerationInProgress,

    #[error("Malformed persisted state for '{key}': {message}")]
    MalformedPersistedState { key: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    User,
    Storage,
    Configuration,
    Session,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TeamError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TeamError::InsufficientPlayers { .. } | TeamError::InvalidTeamSize { .. } => {
                ErrorCategory::User
            }
            TeamError::GenerationInProgress => ErrorCategory::Session,
            TeamError::MalformedPersistedState { .. }
            | TeamError::IoError(_)
            | TeamError::SerializationError(_) => ErrorCategory::Storage,
            TeamError::ConfigError { .. } | TeamError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 使用者可以直接修正的狀況
            TeamError::InsufficientPlayers { .. }
            | TeamError::InvalidTeamSize { .. }
            | TeamError::GenerationInProgress => ErrorSeverity::Medium,
            // 會在本地重置為預設值，不應該傳到使用者
            TeamError::MalformedPersistedState { .. } => ErrorSeverity::Low,
            TeamError::ConfigError { .. } | TeamError::InvalidConfigValueError { .. } => {
                ErrorSeverity::High
            }
            TeamError::IoError(_) | TeamError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            TeamError::InsufficientPlayers { required, available } => format!(
                "Add {} more player(s) or pick a smaller team size",
                required - available.min(required)
            ),
            TeamError::InvalidTeamSize { .. } => "Choose a team size of 2, 3 or 5".to_string(),
            TeamError::GenerationInProgress => {
                "Wait for the current generation to finish".to_string()
            }
            TeamError::MalformedPersistedState { key, .. } => {
                format!("Entry '{}' was reset to its default value", key)
            }
            TeamError::IoError(_) => {
                "Check that the store file location exists and is writable".to_string()
            }
            TeamError::SerializationError(_) => {
                "Delete or repair the store file and try again".to_string()
            }
            TeamError::ConfigError { .. } | TeamError::InvalidConfigValueError { .. } => {
                "Review the command-line flags and the TOML configuration file".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TeamError::InsufficientPlayers { required, .. } => format!(
                "You need at least {} players to build the team.",
                required
            ),
            TeamError::InvalidTeamSize { value } => {
                format!("'{}' is not a valid team size.", value)
            }
            TeamError::GenerationInProgress => "Teams are being generated right now.".to_string(),
            TeamError::MalformedPersistedState { .. } => {
                "Saved data was unreadable and has been reset.".to_string()
            }
            TeamError::IoError(e) => format!("Could not access the store: {}", e),
            TeamError::SerializationError(e) => format!("Could not encode saved data: {}", e),
            TeamError::ConfigError { message } => format!("Configuration problem: {}", message),
            TeamError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, TeamError>;
