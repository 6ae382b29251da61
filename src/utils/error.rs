use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardError {
    #[error("invalid card id '{id}': {reason}")]
    InvalidId { id: String, reason: String },

    #[error("{message}")]
    InvalidInput { message: String },

    #[error("Card with name '{name}' already exists")]
    Conflict { name: String },

    #[error("Card not found")]
    NotFound,

    #[error("Storage error: {0}")]
    StorageError(#[from] mongodb::error::Error),

    #[error("Storage error: {message}")]
    BackendError { message: String },

    #[error("Storage operation '{operation}' timed out after {seconds}s")]
    Timeout { operation: &'static str, seconds: u64 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Server error: {message}")]
    ServerError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidInput,
    Conflict,
    NotFound,
    Internal,
    Configuration,
}

impl CardError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidId { .. } | Self::InvalidInput { .. } => ErrorCategory::InvalidInput,
            Self::Conflict { .. } => ErrorCategory::Conflict,
            Self::NotFound => ErrorCategory::NotFound,
            Self::StorageError(_)
            | Self::BackendError { .. }
            | Self::Timeout { .. }
            | Self::IoError(_)
            | Self::ServerError { .. } => ErrorCategory::Internal,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    /// HTTP status carried in the response envelope for this error.
    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::InvalidInput => 400,
            ErrorCategory::Conflict => 409,
            ErrorCategory::NotFound => 404,
            ErrorCategory::Internal | ErrorCategory::Configuration => 500,
        }
    }

    /// Process exit code used when this error aborts startup.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, CardError>;
