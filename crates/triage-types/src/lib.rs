//! # triage-types
//!
//! Data types for ESI v5 emergency department triage.
//!
//! This crate defines the values exchanged between the triage decision
//! engine and its collaborators: the intake payload ([`PatientRecord`],
//! [`Vitals`]), the decision ([`TriageResult`], [`TriageLevel`]), and the
//! clinical concept vocabulary ([`ConceptId`]).
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via
//!   serde. Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use triage_types::{Gender, PatientRecord, TriageLevel, Vitals};
//!
//! let patient = PatientRecord {
//!     age: 60.0,
//!     gender: Gender::Male,
//!     chief_complaint_text: "cardiac arrest, no pulse".to_string(),
//!     vitals: Vitals::default(),
//!     history_cardiac: false,
//!     history_stroke: false,
//!     immuno_compromised: false,
//! };
//!
//! assert_eq!(TriageLevel::Resuscitation.as_u8(), 1);
//! assert!(TriageLevel::Resuscitation.requires_alert());
//! # let _ = patient;
//! ```
//!
//! ## Without Serde
//!
//! To use this crate without serde (zero dependencies):
//!
//! ```toml
//! [dependencies]
//! triage-types = { version = "0.1", default-features = false }
//! ```

#![warn(missing_docs)]

mod concept;
mod level;
mod patient;
mod result;

// Re-export all public types at crate root
pub use concept::ConceptId;
pub use level::{LevelProfile, TriageLevel};
pub use patient::{Gender, PatientRecord, Vitals};
pub use result::TriageResult;
