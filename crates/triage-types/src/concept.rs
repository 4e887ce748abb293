//! Clinical concept identifiers produced by complaint-text analysis.

/// A clinical concept recognized in free-text chief complaints.
///
/// Concept identifiers are the vocabulary shared between the symptom
/// lexicon, the resource estimator, and the classifier's high-risk rules.
/// The enum is `Ord` so extracted tag sets iterate deterministically.
///
/// # Examples
///
/// ```
/// use triage_types::ConceptId;
///
/// assert_eq!(ConceptId::ChestPain.as_str(), "chest_pain");
/// assert_eq!(ConceptId::from_str("sob"), Some(ConceptId::Sob));
/// assert_eq!(ConceptId::from_str("headache"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ConceptId {
    /// Chest pain, tightness, or pressure.
    ChestPain,
    /// Palpitations and other non-pain cardiac complaints.
    Cardiac,
    /// Shortness of breath.
    Sob,
    /// Stroke signs: facial droop, slurred speech, one-sided weakness.
    Stroke,
    /// Other neurological complaints: dizziness, syncope, severe headache.
    Neuro,
    /// Abdominal pain, vomiting, diarrhea.
    Abdominal,
    /// Blunt trauma: falls, collisions, fractures.
    Trauma,
    /// Fever and chills.
    Fever,
    /// Psychiatric emergencies including suicidal ideation.
    Psych,
    /// Allergic reactions short of anaphylaxis.
    Allergy,
    /// Diabetic complaints: deranged blood sugar.
    Diabetic,
    /// Pregnancy-related complaints.
    Pregnancy,
    /// Lacerations and wounds needing closure.
    Laceration,
    /// Urinary symptoms.
    Uti,
    /// Burns and scalds.
    Burn,
    /// Animal and insect bites or stings.
    BiteSting,
}

impl ConceptId {
    /// All concept identifiers, in canonical order.
    pub const ALL: [ConceptId; 16] = [
        ConceptId::ChestPain,
        ConceptId::Cardiac,
        ConceptId::Sob,
        ConceptId::Stroke,
        ConceptId::Neuro,
        ConceptId::Abdominal,
        ConceptId::Trauma,
        ConceptId::Fever,
        ConceptId::Psych,
        ConceptId::Allergy,
        ConceptId::Diabetic,
        ConceptId::Pregnancy,
        ConceptId::Laceration,
        ConceptId::Uti,
        ConceptId::Burn,
        ConceptId::BiteSting,
    ];

    /// Returns the snake_case identifier used in protocol files and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ChestPain => "chest_pain",
            Self::Cardiac => "cardiac",
            Self::Sob => "sob",
            Self::Stroke => "stroke",
            Self::Neuro => "neuro",
            Self::Abdominal => "abdominal",
            Self::Trauma => "trauma",
            Self::Fever => "fever",
            Self::Psych => "psych",
            Self::Allergy => "allergy",
            Self::Diabetic => "diabetic",
            Self::Pregnancy => "pregnancy",
            Self::Laceration => "laceration",
            Self::Uti => "uti",
            Self::Burn => "burn",
            Self::BiteSting => "bite_sting",
        }
    }

    /// Creates a ConceptId from its snake_case identifier.
    ///
    /// Returns `None` if the identifier is not part of the vocabulary.
    pub fn from_str(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}
