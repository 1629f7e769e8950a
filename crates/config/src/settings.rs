//! Engine settings

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{env, scoring};
use crate::ConfigError;

/// Top-level settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Scoring and threshold settings
    #[serde(default)]
    pub engine: EngineSettings,

    /// Where the initial model comes from
    #[serde(default)]
    pub model: ModelSettings,

    /// Logging configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Settings {
    /// Validate all sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.observability.validate()?;
        Ok(())
    }
}

/// Scoring settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Threshold for intents registered without one
    #[serde(default = "default_threshold")]
    pub default_threshold: f32,

    /// Weight of the pattern signal
    #[serde(default = "default_pattern_weight")]
    pub pattern_weight: f32,

    /// Weight of the keyword signal
    #[serde(default = "default_keyword_weight")]
    pub keyword_weight: f32,

    /// Scores within this distance count as tied
    #[serde(default = "default_tie_epsilon")]
    pub tie_epsilon: f32,

    /// Runner-up intents reported in results
    #[serde(default = "default_max_alternatives")]
    pub max_alternatives: usize,
}

fn default_threshold() -> f32 {
    scoring::DEFAULT_THRESHOLD
}

fn default_pattern_weight() -> f32 {
    scoring::PATTERN_WEIGHT
}

fn default_keyword_weight() -> f32 {
    scoring::KEYWORD_WEIGHT
}

fn default_tie_epsilon() -> f32 {
    scoring::TIE_EPSILON
}

fn default_max_alternatives() -> usize {
    scoring::MAX_ALTERNATIVES
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            default_threshold: default_threshold(),
            pattern_weight: default_pattern_weight(),
            keyword_weight: default_keyword_weight(),
            tie_epsilon: default_tie_epsilon(),
            max_alternatives: default_max_alternatives(),
        }
    }
}

impl EngineSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit_range("engine.default_threshold", self.default_threshold)?;
        check_unit_range("engine.pattern_weight", self.pattern_weight)?;
        check_unit_range("engine.keyword_weight", self.keyword_weight)?;

        let sum = self.pattern_weight + self.keyword_weight;
        if (sum - 1.0).abs() > scoring::WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::InvalidValue {
                field: "engine.pattern_weight".to_string(),
                message: format!("Weights must sum to 1.0, got {}", sum),
            });
        }

        if self.pattern_weight <= self.keyword_weight {
            return Err(ConfigError::InvalidValue {
                field: "engine.pattern_weight".to_string(),
                message: format!(
                    "Must be greater than keyword_weight ({} <= {})",
                    self.pattern_weight, self.keyword_weight
                ),
            });
        }

        if !(0.0..=scoring::MAX_TIE_EPSILON).contains(&self.tie_epsilon) {
            return Err(ConfigError::InvalidValue {
                field: "engine.tie_epsilon".to_string(),
                message: format!(
                    "Must be between 0.0 and {}, got {}",
                    scoring::MAX_TIE_EPSILON,
                    self.tie_epsilon
                ),
            });
        }

        Ok(())
    }
}

fn check_unit_range(field: &str, value: f32) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            message: format!("Must be between 0.0 and 1.0, got {}", value),
        });
    }
    Ok(())
}

/// Initial model source
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ModelSettings {
    /// Model description file (.json, .yaml, .yml)
    #[serde(default)]
    pub path: Option<String>,

    /// Also register the built-in Vietnamese chit-chat intents, after the
    /// model file; built-ins whose name the model already uses are skipped
    #[serde(default)]
    pub load_defaults: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON log lines
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl ObservabilityConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "observability.log_level".to_string(),
                message: format!("Unknown log level '{}'", self.log_level),
            });
        }
        Ok(())
    }
}

/// Load settings from `config/` in the working directory
///
/// Priority: env vars > config/{env}.* > config/default.* > defaults
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from(Path::new("config"), env)
}

/// Load settings from a specific config directory
pub fn load_settings_from(dir: &Path, env_name: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    let default_path = dir.join("default");
    builder = builder.add_source(File::with_name(&default_path.to_string_lossy()).required(false));

    if let Some(env_name) = env_name {
        let env_path = dir.join(env_name);
        builder = builder.add_source(File::with_name(&env_path.to_string_lossy()).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix(env::PREFIX)
            .prefix_separator(env::SEPARATOR)
            .separator(env::SEPARATOR)
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    tracing::debug!(
        dir = %dir.display(),
        env = env_name.unwrap_or("default"),
        "Loaded settings"
    );

    Ok(settings)
}
