//! Default values shared by settings and the engine
//!
//! Single source of truth for scoring defaults. The engine reads these only
//! through [`crate::EngineSettings`], so overriding settings is enough to
//! retune detection.

/// Scoring defaults
pub mod scoring {
    /// Threshold applied to intents registered without one
    pub const DEFAULT_THRESHOLD: f32 = 0.4;

    /// Weight of the best pattern similarity in the combined score
    pub const PATTERN_WEIGHT: f32 = 0.7;

    /// Weight of the keyword hit ratio in the combined score
    pub const KEYWORD_WEIGHT: f32 = 0.3;

    /// Scores closer than this are considered tied
    pub const TIE_EPSILON: f32 = 1e-3;

    /// Upper bound accepted for `tie_epsilon`
    pub const MAX_TIE_EPSILON: f32 = 0.1;

    /// Tolerance when checking that the weights sum to one
    pub const WEIGHT_SUM_TOLERANCE: f32 = 1e-4;

    /// Runner-up intents reported alongside a result
    pub const MAX_ALTERNATIVES: usize = 3;
}

/// Environment variable layout
pub mod env {
    /// Prefix for settings overrides, e.g. `VIET_INTENT__ENGINE__DEFAULT_THRESHOLD`
    pub const PREFIX: &str = "VIET_INTENT";

    /// Separator between nested keys
    pub const SEPARATOR: &str = "__";
}
