//! The triage decision returned to callers.

use crate::level::TriageLevel;

/// The outcome of one triage evaluation.
///
/// Produced exactly once per evaluation and owned by the caller afterwards;
/// the engine keeps no reference to it. Presentation fields are copied from
/// the level's static [`LevelProfile`](crate::LevelProfile) so that two
/// evaluations of the same record compare equal field-for-field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriageResult {
    /// Assigned acuity level, 1 (most severe) to 5.
    pub level: TriageLevel,
    /// Display color as a CSS hex string.
    pub color_code: String,
    /// English label.
    pub label_en: String,
    /// Arabic label.
    pub label_ar: String,
    /// Short clinical description.
    pub description: String,
    /// Recommended disposition.
    pub recommended_action: String,
    /// Target time to physician contact.
    pub time_to_physician: String,
    /// Findings that influenced the decision, surfaced to the clinician.
    /// Ordered; duplicates allowed.
    #[cfg_attr(feature = "serde", serde(default))]
    pub red_flags: Vec<String>,
    /// Ordered explanation of why this level was assigned.
    #[cfg_attr(feature = "serde", serde(default))]
    pub reasoning: Vec<String>,
    /// Free-form confidence marker.
    #[cfg_attr(feature = "serde", serde(default = "default_confidence"))]
    pub confidence: String,
}

fn default_confidence() -> String {
    "High".to_string()
}

impl TriageResult {
    /// Builds a result for `level`, filling presentation fields from the
    /// level's static profile.
    pub fn for_level(level: TriageLevel, red_flags: Vec<String>, reasoning: Vec<String>) -> Self {
        let profile = level.profile();
        Self {
            level,
            color_code: profile.color_code.to_string(),
            label_en: profile.label_en.to_string(),
            label_ar: profile.label_ar.to_string(),
            description: profile.description.to_string(),
            recommended_action: profile.recommended_action.to_string(),
            time_to_physician: profile.time_to_physician.to_string(),
            red_flags,
            reasoning,
            confidence: default_confidence(),
        }
    }
}
