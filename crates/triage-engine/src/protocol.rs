//! The triage protocol: every rule table bundled into one immutable value.
//!
//! A `Protocol` is constructed exactly once, at process start, and injected
//! into the engine by value. The builtin protocol is always available;
//! deployments can patch it from a JSON file, and every patch is validated
//! before the first evaluation — a corrupt table fails the process at
//! startup, never mid-shift.
//!
//! Override file shape (all sections optional):
//!
//! ```json
//! {
//!   "lexicon": { "fever": ["fever", "سخونية"] },
//!   "danger_keywords": ["cardiac arrest", "توقف القلب"],
//!   "resource_weights": [ { "concepts": ["abdominal"], "weight": 2 } ],
//!   "thresholds": { "danger": { "adult": { "hr": { "high": 110 } } } }
//! }
//! ```
//!
//! A named lexicon concept replaces that concept's pattern list; the danger
//! vocabulary and weight table replace wholesale; threshold patches apply
//! per band and per vital.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use triage_types::ConceptId;

use crate::danger::DangerVocabulary;
use crate::lexicon::Lexicon;
use crate::resources::{ResourceGroup, ResourceWeights};
use crate::types::{ProtocolError, ProtocolResult};
use crate::vitals::{AgeBand, BandRow, Limits, SpO2Rule, ThresholdTable};

/// An immutable bundle of all rule tables used by the engine.
#[derive(Debug, Clone)]
pub struct Protocol {
    /// Concept lexicon for symptom extraction.
    pub lexicon: Lexicon,
    /// Life-threat phrase vocabulary.
    pub danger: DangerVocabulary,
    /// Age-banded vital-sign thresholds.
    pub thresholds: ThresholdTable,
    /// Resource weight table.
    pub resources: ResourceWeights,
}

impl Default for Protocol {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Protocol {
    /// Returns the builtin protocol.
    pub fn builtin() -> Self {
        Self {
            lexicon: Lexicon::builtin(),
            danger: DangerVocabulary::builtin(),
            thresholds: ThresholdTable::builtin(),
            resources: ResourceWeights::builtin(),
        }
    }

    /// Loads the builtin protocol patched by a JSON override file.
    ///
    /// # Errors
    /// Fails fast on I/O problems, malformed JSON, unknown concept
    /// identifiers, blank patterns, empty vocabularies, and inverted
    /// threshold pairs.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ProtocolResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parses and applies a JSON override document.
    pub fn from_json_str(text: &str) -> ProtocolResult<Self> {
        let overrides: ProtocolOverrides = serde_json::from_str(text)?;
        Self::from_overrides(overrides)
    }

    fn from_overrides(overrides: ProtocolOverrides) -> ProtocolResult<Self> {
        let lexicon = match overrides.lexicon {
            Some(patched_concepts) => {
                let mut entries = Lexicon::builtin_entries();
                for (name, patterns) in patched_concepts {
                    let concept = ConceptId::from_str(&name)
                        .ok_or(ProtocolError::UnknownConcept { name })?;
                    match entries.iter_mut().find(|(c, _)| *c == concept) {
                        Some((_, existing)) => *existing = patterns,
                        None => entries.push((concept, patterns)),
                    }
                }
                Lexicon::from_entries(entries)?
            }
            None => Lexicon::builtin(),
        };

        let danger = match overrides.danger_keywords {
            Some(phrases) => DangerVocabulary::from_phrases(phrases)?,
            None => DangerVocabulary::builtin(),
        };

        let mut thresholds = ThresholdTable::builtin();
        if let Some(patches) = overrides.thresholds {
            patches.critical.apply(&mut thresholds, TableKind::Critical);
            patches.danger.apply(&mut thresholds, TableKind::Danger);
        }
        thresholds.validate()?;

        let resources = match overrides.resource_weights {
            Some(groups) => {
                let mut parsed = Vec::with_capacity(groups.len());
                for group in groups {
                    let mut concepts = Vec::with_capacity(group.concepts.len());
                    for name in group.concepts {
                        concepts.push(
                            ConceptId::from_str(&name)
                                .ok_or(ProtocolError::UnknownConcept { name })?,
                        );
                    }
                    parsed.push(ResourceGroup {
                        concepts,
                        weight: group.weight,
                    });
                }
                ResourceWeights::from_groups(parsed)?
            }
            None => ResourceWeights::builtin(),
        };

        Ok(Self {
            lexicon,
            danger,
            thresholds,
            resources,
        })
    }
}

#[derive(Clone, Copy)]
enum TableKind {
    Critical,
    Danger,
}

/// Top-level override document.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProtocolOverrides {
    #[serde(default)]
    lexicon: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default)]
    danger_keywords: Option<Vec<String>>,
    #[serde(default)]
    resource_weights: Option<Vec<GroupOverride>>,
    #[serde(default)]
    thresholds: Option<ThresholdOverrides>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GroupOverride {
    concepts: Vec<String>,
    weight: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ThresholdOverrides {
    #[serde(default)]
    critical: BandPatches,
    #[serde(default)]
    danger: BandPatches,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct BandPatches {
    #[serde(default)]
    infant: Option<RowOverride>,
    #[serde(default)]
    young_child: Option<RowOverride>,
    #[serde(default)]
    older_child: Option<RowOverride>,
    #[serde(default)]
    adult: Option<RowOverride>,
}

impl BandPatches {
    fn apply(&self, table: &mut ThresholdTable, kind: TableKind) {
        let bands = [
            (AgeBand::Infant, &self.infant),
            (AgeBand::YoungChild, &self.young_child),
            (AgeBand::OlderChild, &self.older_child),
            (AgeBand::Adult, &self.adult),
        ];
        for (band, patch) in bands {
            if let Some(patch) = patch {
                let row = match kind {
                    TableKind::Critical => table.critical_row_mut(band),
                    TableKind::Danger => table.danger_row_mut(band),
                };
                patch.apply(row);
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RowOverride {
    #[serde(default)]
    hr: Option<LimitsOverride>,
    #[serde(default)]
    rr: Option<LimitsOverride>,
    #[serde(default)]
    sbp: Option<LimitsOverride>,
    #[serde(default)]
    temp: Option<LimitsOverride>,
    #[serde(default)]
    spo2: Option<SpO2Override>,
}

impl RowOverride {
    fn apply(&self, row: &mut BandRow) {
        if let Some(limits) = &self.hr {
            row.hr = limits.as_limits();
        }
        if let Some(limits) = &self.rr {
            row.rr = limits.as_limits();
        }
        if let Some(limits) = &self.sbp {
            row.sbp = limits.as_limits();
        }
        if let Some(limits) = &self.temp {
            row.temp = limits.as_limits();
        }
        if let Some(rule) = &self.spo2 {
            row.spo2 = Some(SpO2Rule {
                below: rule.below,
                at_least: rule.at_least,
            });
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LimitsOverride {
    #[serde(default)]
    low: Option<f64>,
    #[serde(default)]
    high: Option<f64>,
}

impl LimitsOverride {
    fn as_limits(&self) -> Limits {
        Limits {
            low: self.low,
            high: self.high,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SpO2Override {
    below: f64,
    #[serde(default)]
    at_least: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_types::Vitals;

    #[test]
    fn test_builtin_protocol_is_complete() {
        let protocol = Protocol::builtin();
        assert_eq!(protocol.lexicon.concept_count(), ConceptId::ALL.len());
        assert!(!protocol.danger.is_empty());
        assert!(protocol.thresholds.validate().is_ok());
        assert!(protocol.resources.group_count() > 0);
    }

    #[test]
    fn test_empty_document_yields_builtin() {
        let protocol = Protocol::from_json_str("{}").unwrap();
        assert_eq!(protocol.lexicon.concept_count(), ConceptId::ALL.len());
        assert_eq!(protocol.danger.len(), DangerVocabulary::builtin().len());
    }

    #[test]
    fn test_lexicon_override_replaces_one_concept() {
        let protocol = Protocol::from_json_str(
            r#"{ "lexicon": { "fever": ["pyrexia"] } }"#,
        )
        .unwrap();
        let tags = protocol.lexicon.extract("pyrexia since yesterday");
        assert!(tags.contains(&ConceptId::Fever));
        // Replaced, not appended.
        assert!(protocol.lexicon.extract("fever since yesterday").is_empty());
        // Other concepts untouched.
        assert!(!protocol.lexicon.extract("chest pain").is_empty());
    }

    #[test]
    fn test_unknown_concept_fails_fast() {
        let result = Protocol::from_json_str(r#"{ "lexicon": { "back_pain": ["backache"] } }"#);
        assert!(matches!(result, Err(ProtocolError::UnknownConcept { name }) if name == "back_pain"));
    }

    #[test]
    fn test_threshold_patch_applies() {
        let protocol = Protocol::from_json_str(
            r#"{ "thresholds": { "danger": { "adult": { "hr": { "low": 45, "high": 110 } } } } }"#,
        )
        .unwrap();
        let quick = Vitals {
            hr: Some(105),
            ..Vitals::default()
        };
        assert!(!protocol.thresholds.danger_zone_check(40.0, &quick).triggered);
        let quicker = Vitals {
            hr: Some(115),
            ..Vitals::default()
        };
        assert!(protocol.thresholds.danger_zone_check(40.0, &quicker).triggered);
    }

    #[test]
    fn test_inverted_threshold_patch_is_rejected() {
        let result = Protocol::from_json_str(
            r#"{ "thresholds": { "critical": { "adult": { "hr": { "low": 150, "high": 40 } } } } }"#,
        );
        assert!(matches!(result, Err(ProtocolError::InvalidThreshold { .. })));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(matches!(
            Protocol::from_json_str("{ not json"),
            Err(ProtocolError::Json(_))
        ));
        assert!(matches!(
            Protocol::from_json_str(r#"{ "unknown_section": 1 }"#),
            Err(ProtocolError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = Protocol::from_json_file("/nonexistent/protocol.json");
        assert!(matches!(result, Err(ProtocolError::Io(_))));
    }

    #[test]
    fn test_resource_weight_override() {
        let protocol = Protocol::from_json_str(
            r#"{ "resource_weights": [ { "concepts": ["laceration"], "weight": 3 } ] }"#,
        )
        .unwrap();
        let tags = [ConceptId::Laceration].into_iter().collect();
        assert_eq!(protocol.resources.estimate(&tags, &Vitals::default()), 3);
    }
}
