use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned {status} for {endpoint}: {body}")]
    ApiStatusError {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Configuration,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PlannerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PlannerError::ApiError(_) | PlannerError::ApiStatusError { .. } => {
                ErrorCategory::Network
            }
            PlannerError::IoError(_) => ErrorCategory::Storage,
            PlannerError::ConfigError { .. }
            | PlannerError::MissingConfigError { .. }
            | PlannerError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            PlannerError::SerializationError(_) => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PlannerError::ApiStatusError { status, .. } if *status == 404 => ErrorSeverity::Low,
            PlannerError::ApiError(_) | PlannerError::ApiStatusError { .. } => {
                ErrorSeverity::Medium
            }
            PlannerError::SerializationError(_) => ErrorSeverity::High,
            PlannerError::IoError(_)
            | PlannerError::ConfigError { .. }
            | PlannerError::MissingConfigError { .. }
            | PlannerError::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PlannerError::ApiError(_) => "Could not reach the recipe service".to_string(),
            PlannerError::ApiStatusError { status, .. } => {
                format!("The recipe service rejected the request (HTTP {})", status)
            }
            PlannerError::IoError(e) => format!("Could not read or write a local file: {}", e),
            PlannerError::SerializationError(_) => {
                "Received data in an unexpected format".to_string()
            }
            PlannerError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PlannerError::ApiError(_) => "Check your network connection and try again",
            PlannerError::ApiStatusError { status: 401, .. }
            | PlannerError::ApiStatusError { status: 402, .. } => {
                "Check that the API key is valid and has quota left"
            }
            PlannerError::ApiStatusError { .. } => "Try again later",
            PlannerError::IoError(_) => "Check that the data directory exists and is writable",
            PlannerError::SerializationError(_) => {
                "The API response format may have changed; run with --verbose for details"
            }
            PlannerError::MissingConfigError { .. } => {
                "Pass --api-key or set [api].key in the file given to --config"
            }
            PlannerError::ConfigError { .. } | PlannerError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
