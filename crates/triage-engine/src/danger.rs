//! Danger-keyword detection: unambiguous life-threat phrases.
//!
//! A separate, hand-curated vocabulary from the symptom lexicon. Any hit is
//! an unconditional level-1 trigger, independent of vitals, so every phrase
//! here must be something no triage nurse would argue with: arrest, apnea,
//! penetrating trauma, active seizure, massive bleeding, and their Egyptian
//! dialect equivalents.

use crate::matcher::{normalize, Pattern};
use crate::types::{ProtocolError, ProtocolResult};

/// Builtin life-threat vocabulary, in report order.
///
/// Grouped by mechanism; Arabic forms follow their English counterparts.
/// Substring matching makes the Arabic entries cover cliticized forms
/// ("اتطعن" hits "طعن", "بيتشنج" hits "تشنج").
const BUILTIN: &[&str] = &[
    // consciousness / arrest
    "unconscious",
    "unresponsive",
    "not waking up",
    "not breathing",
    "stopped breathing",
    "no pulse",
    "cardiac arrest",
    "heart stopped",
    "blue lips",
    "turning blue",
    "فاقد الوعي",
    "مغمى عليه",
    "غير مستجيب",
    "مش بيرد",
    "مش بيتنفس",
    "نفسه واقف",
    "قاطع نفس",
    "توقف القلب",
    "قلبه وقف",
    "مفيش نبض",
    // penetrating trauma
    "gunshot",
    "stab",
    "stabbed",
    "رصاص",
    "طلق ناري",
    "طعن",
    "سكينة",
    // airway / seizure
    "choking",
    "seizure",
    "convulsing",
    "convulsions",
    "شرقان",
    "تشنج",
    // hemorrhage
    "severe bleeding",
    "massive bleeding",
    "bleeding heavily",
    "bleeding out",
    "نزيف شديد",
    "نزيف غزير",
    "تنزف جامد",
    "الدم مش واقف",
    // toxic / environmental
    "overdose",
    "جرعة زيادة",
    "heat stroke",
    "heatstroke",
    "ضربة شمس",
    "ضربته الشمس",
    "drowning",
    "drowned",
    "غرقان",
    "بيغرق",
    // anaphylaxis
    "anaphylaxis",
    "حساسية شديدة",
];

/// The compiled danger-keyword vocabulary.
#[derive(Debug, Clone)]
pub struct DangerVocabulary {
    phrases: Vec<Pattern>,
}

impl DangerVocabulary {
    /// Builds the builtin vocabulary.
    pub fn builtin() -> Self {
        Self {
            phrases: BUILTIN.iter().map(|raw| Pattern::compile(raw)).collect(),
        }
    }

    /// Builds a vocabulary from explicit phrases.
    ///
    /// # Errors
    /// Fails if the list is empty or contains a blank phrase.
    pub fn from_phrases(raw: Vec<String>) -> ProtocolResult<Self> {
        if raw.is_empty() {
            return Err(ProtocolError::EmptyVocabulary);
        }
        if raw.iter().any(|p| p.trim().is_empty()) {
            return Err(ProtocolError::EmptyPattern {
                entry: "danger_keywords".to_string(),
            });
        }
        Ok(Self {
            phrases: raw.iter().map(|p| Pattern::compile(p)).collect(),
        })
    }

    /// Scans complaint text and returns matched phrases.
    ///
    /// The result is ordered by vocabulary position and contains each
    /// phrase at most once. Any non-empty result forces level 1.
    pub fn detect(&self, complaint: &str) -> Vec<String> {
        let text = normalize(complaint);
        self.phrases
            .iter()
            .filter(|p| p.matches(&text))
            .map(|p| p.as_str().to_string())
            .collect()
    }

    /// Number of phrases in the vocabulary.
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Returns true if the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_english_arrest_phrases() {
        let vocab = DangerVocabulary::builtin();
        let hits = vocab.detect("cardiac arrest, no pulse");
        assert_eq!(hits, vec!["no pulse", "cardiac arrest"]);
    }

    #[test]
    fn test_detects_dialect_forms_through_clitics() {
        let vocab = DangerVocabulary::builtin();
        assert!(!vocab.detect("بيتشنج على الأرض").is_empty());
        assert!(!vocab.detect("اتطعن بسكينة في بطنه").is_empty());
        assert!(!vocab.detect("ضربته الشمس وهو شغال").is_empty());
        assert!(!vocab.detect("بتنزف جامد الدم مش واقف").is_empty());
    }

    #[test]
    fn test_stab_requires_word_boundary() {
        let vocab = DangerVocabulary::builtin();
        assert!(vocab.detect("stab wound to chest").contains(&"stab".to_string()));
        assert!(vocab.detect("patient is stable, mild cough").is_empty());
    }

    #[test]
    fn test_each_phrase_reported_once() {
        let vocab = DangerVocabulary::builtin();
        let hits = vocab.detect("unconscious... still unconscious");
        assert_eq!(
            hits.iter().filter(|h| h.as_str() == "unconscious").count(),
            1
        );
    }

    #[test]
    fn test_order_follows_vocabulary() {
        let vocab = DangerVocabulary::builtin();
        let hits = vocab.detect("found unresponsive and not breathing");
        assert_eq!(hits, vec!["unresponsive", "not breathing"]);
    }

    #[test]
    fn test_clean_text_matches_nothing() {
        let vocab = DangerVocabulary::builtin();
        assert!(vocab.detect("mild headache since yesterday").is_empty());
        assert!(vocab.detect("").is_empty());
    }

    #[test]
    fn test_from_phrases_rejects_empty_vocabulary() {
        assert!(matches!(
            DangerVocabulary::from_phrases(vec![]),
            Err(ProtocolError::EmptyVocabulary)
        ));
    }
}
