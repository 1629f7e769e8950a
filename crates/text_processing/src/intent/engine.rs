//! Intent engine
//!
//! Owns the intent registry and answers `detect` calls. Registration and
//! model loading take a write lock; detection takes a read lock, so any
//! number of threads may detect concurrently on a shared engine.

use parking_lot::RwLock;
use std::path::Path;

use viet_intent_config::{
    ConfigError, EngineSettings, LoadWarning, ModelDescription, ModelFormat, Settings,
};
use viet_intent_core::{DetectionResult, Error, IntentDefinition, Result, ScoredIntent};

use super::defaults;
use super::index::{IndexedIntent, IntentRegistry};
use super::scorer::{QueryTokens, ScoreBreakdown, Scorer};
use crate::entities::EntityExtractor;
use crate::normalizer::normalize;

/// One intent's score within a single detection
struct Candidate<'a> {
    intent: &'a IndexedIntent,
    breakdown: ScoreBreakdown,
}

impl Candidate<'_> {
    fn eligible(&self) -> bool {
        self.breakdown.combined > 0.0 && self.breakdown.combined >= self.intent.threshold()
    }

    /// Tie-break between candidates with (nearly) equal scores
    fn outranks(&self, other: &Candidate<'_>) -> bool {
        let (a, b) = (&self.breakdown, &other.breakdown);
        if a.exact_accents != b.exact_accents {
            return a.exact_accents;
        }
        a.pattern_signal > b.pattern_signal
    }

    fn scored(&self) -> ScoredIntent {
        ScoredIntent {
            intent: self.intent.name().to_string(),
            confidence: self.breakdown.combined,
        }
    }
}

/// Vietnamese intent detection engine
///
/// # Example
///
/// ```
/// use viet_intent_core::IntentDefinition;
/// use viet_intent_text_processing::IntentEngine;
///
/// let engine = IntentEngine::new();
/// engine
///     .add_intent(
///         IntentDefinition::new("greeting", ["xin chào", "chào bạn"])
///             .with_response("Xin chào! Tôi có thể giúp gì cho bạn?"),
///     )
///     .unwrap();
///
/// let result = engine.detect("Xin chao!");
/// assert_eq!(result.intent, "greeting");
/// assert_eq!(result.confidence, 1.0);
/// ```
#[derive(Debug)]
pub struct IntentEngine {
    registry: RwLock<IntentRegistry>,
    extractor: EntityExtractor,
    scorer: Scorer,
    settings: EngineSettings,
    load_warnings: RwLock<Vec<LoadWarning>>,
}

impl Default for IntentEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentEngine {
    /// Empty engine with default settings
    pub fn new() -> Self {
        Self::build(EngineSettings::default())
    }

    /// Empty engine with validated settings
    pub fn with_settings(settings: EngineSettings) -> std::result::Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self::build(settings))
    }

    /// Engine preloaded with the built-in Vietnamese chit-chat intents
    pub fn with_default_intents() -> Self {
        let engine = Self::new();
        engine.register_defaults();
        engine
    }

    /// Engine configured from loaded settings
    ///
    /// Loads `model.path` if set, then the built-in intents if
    /// `model.load_defaults` is on. Model intents keep precedence over
    /// built-ins with the same name. An unreadable model file is logged and
    /// leaves the engine without model intents.
    pub fn from_settings(settings: &Settings) -> std::result::Result<Self, ConfigError> {
        let engine = Self::with_settings(settings.engine.clone())?;

        if let Some(path) = &settings.model.path {
            engine.initialize_from_path(path);
        }
        if settings.model.load_defaults {
            engine.register_defaults();
        }

        Ok(engine)
    }

    fn build(settings: EngineSettings) -> Self {
        Self {
            registry: RwLock::new(IntentRegistry::new()),
            extractor: EntityExtractor::new(),
            scorer: Scorer::from_settings(&settings),
            settings,
            load_warnings: RwLock::new(Vec::new()),
        }
    }

    /// Use a different entity extractor
    pub fn with_extractor(mut self, extractor: EntityExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    fn register_defaults(&self) {
        let mut registry = self.registry.write();
        for definition in defaults::default_intents() {
            if registry.contains(&definition.name) {
                tracing::debug!(intent = %definition.name, "Keeping loaded intent over built-in");
                continue;
            }
            let name = definition.name.clone();
            match IndexedIntent::build(definition, self.settings.default_threshold)
                .and_then(|intent| registry.insert(intent))
            {
                Ok(()) => {},
                Err(e) => tracing::warn!(intent = %name, error = %e, "Failed to register built-in intent"),
            }
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Replace the registry with the intents of a model description
    ///
    /// Malformed entries are skipped and reported through
    /// [`load_warnings`](Self::load_warnings). `None` leaves the registry as
    /// it is. Always returns true; loading from text or a file can fail, see
    /// [`initialize_from_path`](Self::initialize_from_path).
    pub fn initialize(&self, description: Option<&ModelDescription>) -> bool {
        let Some(description) = description else {
            tracing::debug!("No model description supplied, keeping current intents");
            return true;
        };

        let (definitions, mut warnings) = description.definitions();

        let mut indexed = Vec::with_capacity(definitions.len());
        for definition in definitions {
            let name = definition.name.clone();
            match IndexedIntent::build(definition, self.settings.default_threshold) {
                Ok(intent) => indexed.push(intent),
                Err(e) => {
                    tracing::warn!(intent = %name, error = %e, "Skipping invalid intent");
                    warnings.push(LoadWarning::new(name, e.to_string()));
                },
            }
        }

        let mut registry = self.registry.write();
        registry.clear();
        for intent in indexed {
            let name = intent.name().to_string();
            if let Err(e) = registry.insert(intent) {
                tracing::warn!(intent = %name, error = %e, "Skipping duplicate intent");
                warnings.push(LoadWarning::new(name, e.to_string()));
            }
        }

        tracing::info!(
            loaded = registry.len(),
            skipped = warnings.len(),
            "Initialized intent model"
        );
        *self.load_warnings.write() = warnings;
        true
    }

    /// Load a JSON or YAML model file; returns false if the file cannot be
    /// read or parsed, in which case the engine is left with no intents
    pub fn initialize_from_path<P: AsRef<Path>>(&self, path: P) -> bool {
        let path = path.as_ref();
        match ModelDescription::from_path(path) {
            Ok(description) => self.initialize(Some(&description)),
            Err(e) => {
                self.fail_load(e);
                false
            },
        }
    }

    /// Same as [`initialize_from_path`](Self::initialize_from_path) for
    /// in-memory text
    pub fn initialize_from_str(&self, content: &str, format: ModelFormat) -> bool {
        match ModelDescription::parse(content, format) {
            Ok(description) => self.initialize(Some(&description)),
            Err(e) => {
                self.fail_load(e);
                false
            },
        }
    }

    fn fail_load(&self, err: ConfigError) {
        let err = Error::from(err);
        tracing::error!(error = %err, "Failed to load intent model");
        self.registry.write().clear();
        *self.load_warnings.write() = Vec::new();
    }

    /// Entries skipped by the last `initialize*` call
    pub fn load_warnings(&self) -> Vec<LoadWarning> {
        self.load_warnings.read().clone()
    }

    /// Register a new intent; fails on a taken name or an invalid
    /// definition, leaving the registry unchanged
    pub fn add_intent(&self, definition: IntentDefinition) -> Result<()> {
        let intent = IndexedIntent::build(definition, self.settings.default_threshold)?;
        let name = intent.name().to_string();
        self.registry.write().insert(intent)?;
        tracing::debug!(intent = %name, "Registered intent");
        Ok(())
    }

    /// Register or overwrite an intent, keeping its position if it already
    /// existed; returns the previous definition
    pub fn replace_intent(&self, definition: IntentDefinition) -> Result<Option<IntentDefinition>> {
        let intent = IndexedIntent::build(definition, self.settings.default_threshold)?;
        let previous = self.registry.write().replace(intent);
        Ok(previous.map(|p| p.definition().clone()))
    }

    pub fn remove_intent(&self, name: &str) -> Result<IntentDefinition> {
        self.registry
            .write()
            .remove(name)
            .map(|removed| removed.definition().clone())
            .ok_or_else(|| Error::IntentNotFound(name.to_string()))
    }

    pub fn get_intent(&self, name: &str) -> Option<IntentDefinition> {
        self.registry.read().get(name).map(|i| i.definition().clone())
    }

    /// Names in registration order
    pub fn intent_names(&self) -> Vec<String> {
        self.registry.read().names()
    }

    pub fn len(&self) -> usize {
        self.registry.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.read().is_empty()
    }

    pub fn clear(&self) {
        self.registry.write().clear();
    }

    /// Score every registered intent, in registration order
    pub fn score_all(&self, text: &str) -> Vec<(String, ScoreBreakdown)> {
        let query = normalize(text);
        let tokens = QueryTokens::new(&query);
        let registry = self.registry.read();
        registry
            .iter()
            .map(|intent| (intent.name().to_string(), self.scorer.score(&tokens, intent)))
            .collect()
    }

    /// Detect the intent of `text` and extract its entities
    ///
    /// Never fails. Empty input, an empty registry, or no intent clearing
    /// its own threshold all give an "unknown" result with confidence 0.0;
    /// entities are extracted in every case.
    ///
    /// An intent must score above zero to win, even when registered with a
    /// threshold of 0.0: a query sharing nothing with any intent stays
    /// unknown.
    pub fn detect(&self, text: &str) -> DetectionResult {
        let query = normalize(text);
        let registry = self.registry.read();
        let entities = self.extractor.extract_with(&query, registry.gazetteers());

        if query.is_empty() || registry.is_empty() {
            tracing::debug!(empty_input = query.is_empty(), "No intents to match");
            return DetectionResult::unknown(entities);
        }

        let tokens = QueryTokens::new(&query);
        let candidates: Vec<Candidate<'_>> = registry
            .iter()
            .map(|intent| Candidate {
                intent,
                breakdown: self.scorer.score(&tokens, intent),
            })
            .collect();

        for candidate in &candidates {
            tracing::debug!(
                intent = candidate.intent.name(),
                pattern = candidate.breakdown.pattern_signal,
                keyword = candidate.breakdown.keyword_signal,
                combined = candidate.breakdown.combined,
                "Scored intent"
            );
        }

        let winner = self.select(&candidates);

        let mut ranked: Vec<&Candidate<'_>> = candidates
            .iter()
            .filter(|c| c.breakdown.combined > 0.0)
            .filter(|c| winner.map_or(true, |w| !std::ptr::eq(*c, w)))
            .collect();
        ranked.sort_by(|a, b| b.breakdown.combined.total_cmp(&a.breakdown.combined));

        let result = match winner {
            Some(winner) => DetectionResult {
                intent: winner.intent.name().to_string(),
                confidence: winner.breakdown.combined,
                entities,
                response_template: winner.intent.response().to_string(),
                alternatives: ranked
                    .iter()
                    .take(self.settings.max_alternatives)
                    .map(|c| c.scored())
                    .collect(),
                best_guess: None,
            },
            None => {
                let mut result = DetectionResult::unknown(entities);
                let mut ranked = ranked.into_iter();
                result.best_guess = ranked.next().map(Candidate::scored);
                result.alternatives = ranked
                    .take(self.settings.max_alternatives)
                    .map(Candidate::scored)
                    .collect();
                result
            },
        };

        tracing::debug!(
            query = query.accented(),
            intent = %result.intent,
            confidence = result.confidence,
            entities = result.entities.len(),
            "Detected intent"
        );

        result
    }

    /// Highest combined score among intents clearing their own threshold;
    /// scores within `tie_epsilon` of the best are tied, and ties go to an
    /// exact match that agrees on diacritics, then to the stronger pattern
    /// signal, then to the earlier registration
    fn select<'c, 'a>(&self, candidates: &'c [Candidate<'a>]) -> Option<&'c Candidate<'a>> {
        let top = candidates
            .iter()
            .filter(|c| c.eligible())
            .map(|c| c.breakdown.combined)
            .fold(None, |best: Option<f32>, score| Some(best.map_or(score, |b| b.max(score))))?;

        candidates
            .iter()
            .filter(|c| c.eligible() && top - c.breakdown.combined <= self.settings.tie_epsilon)
            .fold(None, |best: Option<&Candidate<'a>>, c| match best {
                Some(b) if !c.outranks(b) => Some(b),
                _ => Some(c),
            })
    }
}
