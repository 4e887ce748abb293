//! Patient intake data: demographics, chief complaint, and vital signs.

/// Patient gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Gender {
    /// Male patient.
    Male,
    /// Female patient.
    Female,
}

/// A set of vital-sign measurements taken at triage.
///
/// Every field is optional: `None` means "not measured", which every
/// threshold check must skip — it is never a stand-in for a normal value.
/// The two exceptions are GCS and pain score, which intake devices report
/// as 15 (fully alert) and 0 (no pain) when left untouched; `Default` and
/// JSON deserialization reproduce those two presets.
///
/// # Examples
///
/// ```
/// use triage_types::Vitals;
///
/// let vitals = Vitals::default();
/// assert_eq!(vitals.hr, None);
/// assert_eq!(vitals.gcs, Some(15));
/// assert_eq!(vitals.pain_score, Some(0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Vitals {
    /// Heart rate (beats per minute).
    pub hr: Option<u16>,
    /// Respiratory rate (breaths per minute).
    pub rr: Option<u16>,
    /// Peripheral oxygen saturation (%).
    pub spo2: Option<f32>,
    /// Body temperature (°C).
    pub temp: Option<f32>,
    /// Systolic blood pressure (mmHg).
    pub sbp: Option<u16>,
    /// Diastolic blood pressure (mmHg).
    pub dbp: Option<u16>,
    /// Glasgow Coma Scale, 3 (deep coma) to 15 (fully alert).
    pub gcs: Option<u8>,
    /// Self-reported pain, 0 (none) to 10 (worst imaginable).
    pub pain_score: Option<u8>,
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            hr: None,
            rr: None,
            spo2: None,
            temp: None,
            sbp: None,
            dbp: None,
            gcs: Some(15),
            pain_score: Some(0),
        }
    }
}

/// One patient presentation, immutable for the duration of an evaluation.
///
/// Records arrive pre-validated from the intake collaborator: age is
/// non-negative, GCS is within 3..=15, pain within 0..=10. The engine does
/// not re-validate.
///
/// # Examples
///
/// ```
/// use triage_types::{Gender, PatientRecord, Vitals};
///
/// let patient = PatientRecord {
///     age: 0.25, // three months old
///     gender: Gender::Female,
///     chief_complaint_text: "سخونية ومش بترضع".to_string(),
///     vitals: Vitals::default(),
///     history_cardiac: false,
///     history_stroke: false,
///     immuno_compromised: false,
/// };
/// assert!(patient.age < 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatientRecord {
    /// Age in years; fractional values encode infants (0.25 = 3 months).
    pub age: f64,
    /// Patient gender.
    pub gender: Gender,
    /// Free-text chief complaint; English, formal Arabic, or Egyptian
    /// dialect, possibly mixed-script.
    pub chief_complaint_text: String,
    /// Vital signs measured at triage.
    #[cfg_attr(feature = "serde", serde(default))]
    pub vitals: Vitals,
    /// Known cardiac history. Recorded for the chart; no triage rule
    /// currently consumes it.
    #[cfg_attr(feature = "serde", serde(default))]
    pub history_cardiac: bool,
    /// Known stroke history. Recorded for the chart; no triage rule
    /// currently consumes it.
    #[cfg_attr(feature = "serde", serde(default))]
    pub history_stroke: bool,
    /// Immunocompromised status. Recorded for the chart; no triage rule
    /// currently consumes it.
    #[cfg_attr(feature = "serde", serde(default))]
    pub immuno_compromised: bool,
}
