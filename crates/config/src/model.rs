//! Model descriptions
//!
//! A model description maps intent names to their patterns, keywords,
//! threshold and response template:
//!
//! ```yaml
//! greeting:
//!   patterns: ["xin chào", "chào bạn"]
//!   keywords: ["chào", "xin"]
//!   threshold: 0.3
//!   response: "Xin chào! Tôi có thể giúp gì cho bạn?"
//! ask_price:
//!   patterns: ["giá bao nhiêu"]
//!   gazetteer:
//!     product: ["áo dài"]
//! ```
//!
//! Document order is registration order. Parsing is two-level: the document
//! itself must be a readable mapping (otherwise [`ConfigError`]), while each
//! entry is checked on its own so that one malformed intent does not sink the
//! whole load.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use viet_intent_core::IntentDefinition;

use crate::ConfigError;

/// Serialization format of a model description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Json,
    Yaml,
}

impl ModelFormat {
    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "json" => Some(ModelFormat::Json),
            "yaml" | "yml" => Some(ModelFormat::Yaml),
            _ => None,
        }
    }
}

/// A model entry that was skipped during loading
#[derive(Debug, Clone, PartialEq)]
pub struct LoadWarning {
    pub intent: String,
    pub message: String,
}

impl LoadWarning {
    pub fn new(intent: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            intent: intent.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skipped intent '{}': {}", self.intent, self.message)
    }
}

/// Shape of one entry, minus the name which is the mapping key
#[derive(Debug, Deserialize)]
struct IntentEntry {
    patterns: Vec<String>,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    threshold: Option<f32>,
    #[serde(default)]
    response: String,
    #[serde(default)]
    gazetteer: BTreeMap<String, Vec<String>>,
}

/// Parsed but not yet validated model description
#[derive(Debug, Clone, Default)]
pub struct ModelDescription {
    entries: Vec<(String, Value)>,
}

impl ModelDescription {
    /// Read a description file, choosing the format from its extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ModelFormat::from_path(path).ok_or_else(|| ConfigError::InvalidValue {
            field: "model.path".to_string(),
            message: format!("Unsupported model file extension: {}", path.display()),
        })?;

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileNotFound(format!("{}: {}", path.display(), e)))?;

        Self::parse(&content, format)
    }

    pub fn parse(content: &str, format: ModelFormat) -> Result<Self, ConfigError> {
        match format {
            ModelFormat::Json => Self::from_json_str(content),
            ModelFormat::Yaml => Self::from_yaml_str(content),
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        let value = serde_json::to_value(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Self::from_value(value)
    }

    fn from_value(value: Value) -> Result<Self, ConfigError> {
        match value {
            Value::Object(map) => Ok(Self {
                entries: map.into_iter().collect(),
            }),
            other => Err(ConfigError::ParseError(format!(
                "Model description must be a mapping of intent names, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Build a description from already-typed definitions
    pub fn from_definitions(definitions: impl IntoIterator<Item = IntentDefinition>) -> Self {
        let entries = definitions
            .into_iter()
            .map(|def| {
                let mut body = serde_json::Map::new();
                body.insert("patterns".to_string(), Value::from(def.patterns));
                body.insert("keywords".to_string(), Value::from(def.keywords));
                if let Some(threshold) = def.threshold {
                    body.insert("threshold".to_string(), Value::from(threshold));
                }
                body.insert("response".to_string(), Value::from(def.response));
                if !def.gazetteer.is_empty() {
                    let gazetteer: serde_json::Map<String, Value> = def
                        .gazetteer
                        .into_iter()
                        .map(|(name, terms)| (name, Value::from(terms)))
                        .collect();
                    body.insert("gazetteer".to_string(), Value::Object(gazetteer));
                }
                (def.name, Value::Object(body))
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Intent names in document order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Convert entries into definitions, collecting a warning for each
    /// entry that has to be skipped
    pub fn definitions(&self) -> (Vec<IntentDefinition>, Vec<LoadWarning>) {
        let mut definitions = Vec::with_capacity(self.entries.len());
        let mut warnings = Vec::new();

        for (name, body) in &self.entries {
            match Self::definition(name, body) {
                Ok(def) => definitions.push(def),
                Err(warning) => {
                    tracing::warn!(intent = %name, reason = %warning.message, "Skipping model entry");
                    warnings.push(warning);
                },
            }
        }

        (definitions, warnings)
    }

    fn definition(name: &str, body: &Value) -> Result<IntentDefinition, LoadWarning> {
        if name.trim().is_empty() {
            return Err(LoadWarning::new(name, "intent name is empty"));
        }

        if !body.is_object() {
            return Err(LoadWarning::new(
                name,
                format!("expected an object, got {}", json_kind(body)),
            ));
        }

        if body.get("patterns").is_none() {
            return Err(LoadWarning::new(name, "missing required field 'patterns'"));
        }

        let entry: IntentEntry = IntentEntry::deserialize(body)
            .map_err(|e| LoadWarning::new(name, e.to_string()))?;

        if entry.patterns.is_empty() {
            return Err(LoadWarning::new(name, "'patterns' must not be empty"));
        }

        if let Some(threshold) = entry.threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(LoadWarning::new(
                    name,
                    format!("threshold {} is outside [0, 1]", threshold),
                ));
            }
        }

        Ok(IntentDefinition {
            name: name.to_string(),
            patterns: entry.patterns,
            keywords: entry.keywords,
            threshold: entry.threshold,
            response: entry.response,
            gazetteer: entry.gazetteer,
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL_JSON: &str = r#"{
        "greeting": {
            "patterns": ["xin chào", "chào bạn"],
            "keywords": ["chào", "xin"],
            "threshold": 0.3,
            "response": "Xin chào!"
        },
        "ask_price": {
            "patterns": ["giá bao nhiêu"],
            "gazetteer": {"product": ["áo dài"]}
        }
    }"#;

    #[test]
    fn test_json_description() {
        let model = ModelDescription::from_json_str(MODEL_JSON).unwrap();
        assert_eq!(model.names(), vec!["greeting", "ask_price"]);

        let (defs, warnings) = model.definitions();
        assert!(warnings.is_empty());
        assert_eq!(defs.len(), 2);

        assert_eq!(defs[0].threshold, Some(0.3));
        assert_eq!(defs[0].response, "Xin chào!");
        assert!(defs[1].keywords.is_empty());
        assert!(defs[1].threshold.is_none());
        assert_eq!(defs[1].gazetteer["product"], vec!["áo dài"]);
    }

    #[test]
    fn test_yaml_description_preserves_order() {
        let yaml = r#"
thank_you:
  patterns: ["cảm ơn"]
greeting:
  patterns: ["xin chào"]
goodbye:
  patterns: ["tạm biệt"]
"#;
        let model = ModelDescription::from_yaml_str(yaml).unwrap();
        assert_eq!(model.names(), vec!["thank_you", "greeting", "goodbye"]);
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let json = r#"{
            "no_patterns": {"keywords": ["a"]},
            "empty_patterns": {"patterns": []},
            "bad_threshold": {"patterns": ["x"], "threshold": 1.5},
            "wrong_type": {"patterns": "xin chào"},
            "not_object": ["xin chào"],
            "valid": {"patterns": ["xin chào"]}
        }"#;
        let model = ModelDescription::from_json_str(json).unwrap();
        let (defs, warnings) = model.definitions();

        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "valid");

        let skipped: Vec<&str> = warnings.iter().map(|w| w.intent.as_str()).collect();
        assert_eq!(
            skipped,
            vec!["no_patterns", "empty_patterns", "bad_threshold", "wrong_type", "not_object"]
        );
        assert!(warnings[0].to_string().contains("patterns"));
    }

    #[test]
    fn test_top_level_must_be_mapping() {
        assert!(matches!(
            ModelDescription::from_json_str(r#"["greeting"]"#),
            Err(ConfigError::ParseError(_))
        ));
        assert!(matches!(
            ModelDescription::from_json_str("{not json"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_null_document_rejected() {
        assert!(matches!(
            ModelDescription::from_json_str("null"),
            Err(ConfigError::ParseError(_))
        ));
        assert!(matches!(
            ModelDescription::from_yaml_str(""),
            Err(ConfigError::ParseError(_))
        ));
        assert!(matches!(
            ModelDescription::from_yaml_str("~"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("intents.json");
        std::fs::write(&path, MODEL_JSON).unwrap();

        let model = ModelDescription::from_path(&path).unwrap();
        assert_eq!(model.len(), 2);

        let missing = dir.path().join("missing.yaml");
        assert!(matches!(
            ModelDescription::from_path(&missing),
            Err(ConfigError::FileNotFound(_))
        ));

        let unsupported = dir.path().join("intents.txt");
        assert!(matches!(
            ModelDescription::from_path(&unsupported),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_from_definitions() {
        let model = ModelDescription::from_definitions(vec![
            IntentDefinition::new("greeting", ["xin chào"]).with_threshold(0.3),
            IntentDefinition::new("goodbye", ["tạm biệt"]).with_gazetteer("product", ["nón lá"]),
        ]);

        let (defs, warnings) = model.definitions();
        assert!(warnings.is_empty());
        assert_eq!(defs[0].threshold, Some(0.3));
        assert_eq!(defs[1].gazetteer["product"], vec!["nón lá"]);
    }
}
