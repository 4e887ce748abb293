//! # triage-engine
//!
//! ESI v5 triage decision engine with bilingual complaint analysis.
//!
//! The engine classifies an emergency-department patient into one of five
//! acuity levels from structured vital signs plus a free-text chief
//! complaint in English, formal Arabic, or Egyptian colloquial Arabic.
//! Classification runs a strict, single-pass pipeline:
//!
//! 1. danger keywords or critical vitals → level 1 (resuscitation)
//! 2. severe pain, altered consciousness, danger-zone vitals, or a
//!    high-risk concept → level 2 (emergent)
//! 3. otherwise the anticipated resource count picks level 3, 4, or 5
//!
//! All rule tables — the concept lexicon, the danger vocabulary, the
//! age-banded vital thresholds, and the resource weights — live in one
//! immutable [`Protocol`] constructed at startup. Evaluation is pure,
//! synchronous, and safe to run concurrently from any number of threads.
//!
//! Matching is deliberately conservative keyword work, not NLP: negation is
//! ignored on purpose, and every ambiguity is resolved toward the more
//! acute level.
//!
//! ## Usage
//!
//! ```rust
//! use triage_engine::TriageEngine;
//! use triage_types::{Gender, PatientRecord, Vitals};
//!
//! let engine = TriageEngine::new();
//! let patient = PatientRecord {
//!     age: 35.0,
//!     gender: Gender::Female,
//!     chief_complaint_text: "stomach pain and fever for 2 days".to_string(),
//!     vitals: Vitals {
//!         temp: Some(38.5),
//!         pain_score: Some(5),
//!         ..Vitals::default()
//!     },
//!     history_cardiac: false,
//!     history_stroke: false,
//!     immuno_compromised: false,
//! };
//!
//! let result = engine.evaluate(&patient);
//! assert_eq!(result.level.as_u8(), 3);
//! ```

#![warn(missing_docs)]

mod danger;
mod engine;
mod lexicon;
mod matcher;
mod protocol;
mod resources;
mod types;
mod vitals;

// Re-export triage-types for convenience
pub use triage_types;

pub use danger::DangerVocabulary;
pub use engine::{TriageEngine, FALLBACK_MARKER};
pub use lexicon::{Lexicon, NEGATION_TERMS};
pub use matcher::{MatchMode, Pattern, PhraseSet};
pub use protocol::Protocol;
pub use resources::{ResourceGroup, ResourceWeights, FEVER_TEMP_CUTOFF};
pub use types::{ProtocolError, ProtocolResult};
pub use vitals::{
    AgeBand, BandRow, Limits, SpO2Rule, ThresholdTable, VitalsFindings, GCS_COMA_FLOOR,
};
