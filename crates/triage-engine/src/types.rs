//! Protocol loading and validation types.

use thiserror::Error;

/// Errors that can occur while loading or validating a triage protocol.
///
/// All of these are startup-time failures: a protocol that constructs
/// successfully can never fail during evaluation.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// I/O error reading a protocol file.
    #[error("IO error reading protocol file: {0}")]
    Io(#[from] std::io::Error),

    /// Protocol file is not valid JSON.
    #[error("protocol file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Lexicon or weight entry names a concept outside the vocabulary.
    #[error("unknown concept identifier: {name}")]
    UnknownConcept {
        /// The identifier that was not recognized.
        name: String,
    },

    /// A pattern list contains an empty or whitespace-only phrase.
    #[error("empty pattern in entry '{entry}'")]
    EmptyPattern {
        /// The lexicon concept or vocabulary the pattern belongs to.
        entry: String,
    },

    /// A concept was left with no patterns at all.
    #[error("concept '{concept}' has no patterns")]
    EmptyConcept {
        /// The concept with an empty pattern list.
        concept: String,
    },

    /// The danger-keyword vocabulary is empty.
    #[error("danger-keyword vocabulary is empty")]
    EmptyVocabulary,

    /// A threshold pair is inverted (low bound at or above high bound).
    #[error("invalid {vital} threshold for {band} band: low {low} is not below high {high}")]
    InvalidThreshold {
        /// The vital sign the pair belongs to.
        vital: String,
        /// The age band the pair belongs to.
        band: String,
        /// Lower bound.
        low: f64,
        /// Upper bound.
        high: f64,
    },

    /// A resource group has no member concepts.
    #[error("resource group at index {index} has no concepts")]
    EmptyResourceGroup {
        /// Position of the offending group in the weight table.
        index: usize,
    },
}

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
