//! Error types

use thiserror::Error;

/// Errors reported at the engine boundary.
///
/// Detection itself never fails; these only come out of registration and
/// model loading.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Intent already registered: {0}")]
    DuplicateIntent(String),

    #[error("Invalid config for intent '{intent}': {message}")]
    InvalidConfig { intent: String, message: String },

    #[error("Failed to load model description: {0}")]
    ModelLoad(String),

    #[error("Intent not found: {0}")]
    IntentNotFound(String),
}

impl Error {
    pub fn invalid_config(intent: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidConfig {
            intent: intent.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::DuplicateIntent("greeting".to_string());
        assert_eq!(err.to_string(), "Intent already registered: greeting");

        let err = Error::invalid_config("ask_price", "threshold 1.5 is outside [0, 1]");
        assert_eq!(
            err.to_string(),
            "Invalid config for intent 'ask_price': threshold 1.5 is outside [0, 1]"
        );
    }
}
