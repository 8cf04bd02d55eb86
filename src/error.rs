use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum AgriSenseError {
    ValidationError(String),
    SourceError(String),
    CacheError(String),
    StoreError(String),
    NotificationError(String),
    ConfigurationError(String),
}

impl fmt::Display for AgriSenseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgriSenseError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            AgriSenseError::SourceError(msg) => write!(f, "Source error: {msg}"),
            AgriSenseError::CacheError(msg) => write!(f, "Cache error: {msg}"),
            AgriSenseError::StoreError(msg) => write!(f, "Store error: {msg}"),
            AgriSenseError::NotificationError(msg) => write!(f, "Notification error: {msg}"),
            AgriSenseError::ConfigurationError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for AgriSenseError {}

pub type Result<T> = std::result::Result<T, AgriSenseError>;
