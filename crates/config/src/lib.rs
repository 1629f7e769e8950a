//! Configuration for the Vietnamese intent engine
//!
//! Two kinds of configuration live here:
//! - Engine settings (scoring weights, default threshold, logging), layered
//!   from defaults, `config/default.*`, `config/{env}.*` and `VIET_INTENT__*`
//!   environment variables
//! - Model descriptions: the intent-name → patterns/keywords/threshold/response
//!   mapping consumed at engine initialization, as JSON or YAML

pub mod constants;
pub mod model;
pub mod settings;

pub use model::{LoadWarning, ModelDescription, ModelFormat};
pub use settings::{
    load_settings, load_settings_from, EngineSettings, ModelSettings, ObservabilityConfig,
    Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Environment error: {0}")]
    Environment(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<ConfigError> for viet_intent_core::Error {
    fn from(err: ConfigError) -> Self {
        viet_intent_core::Error::ModelLoad(err.to_string())
    }
}
