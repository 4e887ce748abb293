//! The triage classifier: a strict, single-pass decision pipeline.
//!
//! Terminal states are checked in severity order and never revisited — once
//! a level-1 trigger fires, nothing later in the pipeline can downgrade it,
//! and the resource estimator is only ever consulted after levels 1 and 2
//! are both ruled out.

use triage_types::{ConceptId, PatientRecord, TriageLevel, TriageResult};

use crate::protocol::Protocol;

/// Reasoning marker appended when the engine serves as the fallback for the
/// AI-assisted path. The exact string is part of the collaborator contract.
pub const FALLBACK_MARKER: &str = "Fallback to Standard Protocol";

/// Pain scores at or above this are an independent level-2 trigger.
const SEVERE_PAIN_FLOOR: u8 = 7;

/// Danger phrases shown in the level-1 summary string, at most.
const DANGER_DISPLAY_LIMIT: usize = 3;

/// Concepts that mark a presentation high-risk (level 2) on their own,
/// with the Arabic trigger names surfaced in the reasoning.
const HIGH_RISK: &[(ConceptId, &str)] = &[
    (ConceptId::ChestPain, "ألم صدر"),
    (ConceptId::Stroke, "أعراض جلطة"),
    (ConceptId::Psych, "طوارئ نفسية"),
    (ConceptId::Sob, "ضيق تنفس"),
    (ConceptId::Cardiac, "مشكلة قلبية"),
    (ConceptId::Diabetic, "مشكلة سكري"),
    (ConceptId::Pregnancy, "حالة حمل"),
];

/// The ESI v5 triage engine.
///
/// Holds one immutable [`Protocol`] and evaluates patient records against
/// it. Construction is the only fallible moment (and only for override
/// files); `evaluate` is total over well-formed records. The engine is
/// `Send + Sync` and can be shared across threads by reference with no
/// synchronization.
///
/// # Examples
///
/// ```
/// use triage_engine::TriageEngine;
/// use triage_types::{Gender, PatientRecord, TriageLevel, Vitals};
///
/// let engine = TriageEngine::new();
/// let patient = PatientRecord {
///     age: 60.0,
///     gender: Gender::Male,
///     chief_complaint_text: "cardiac arrest, no pulse".to_string(),
///     vitals: Vitals::default(),
///     history_cardiac: false,
///     history_stroke: false,
///     immuno_compromised: false,
/// };
/// let result = engine.evaluate(&patient);
/// assert_eq!(result.level, TriageLevel::Resuscitation);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TriageEngine {
    protocol: Protocol,
}

impl TriageEngine {
    /// Creates an engine with the builtin protocol.
    pub fn new() -> Self {
        Self::with_protocol(Protocol::builtin())
    }

    /// Creates an engine with an explicit protocol.
    pub fn with_protocol(protocol: Protocol) -> Self {
        Self { protocol }
    }

    /// Returns the governing protocol.
    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    /// Evaluates one patient record and assigns a triage level.
    ///
    /// Pure and infallible: no I/O, no shared mutable state, identical
    /// input yields an identical result.
    pub fn evaluate(&self, patient: &PatientRecord) -> TriageResult {
        let tags = self.protocol.lexicon.extract(&patient.chief_complaint_text);
        let danger_hits = self.protocol.danger.detect(&patient.chief_complaint_text);
        tracing::debug!(
            age = patient.age,
            tags = ?tags,
            danger_hits = danger_hits.len(),
            "complaint analysis"
        );

        let mut reasoning: Vec<String> = Vec::new();
        let mut red_flags: Vec<String> = Vec::new();

        // ---- Level 1: resuscitation ------------------------------------
        // Critical vitals and danger keywords are both absolute triggers;
        // when both fire, the clinician sees every reason from both.
        let critical = self
            .protocol
            .thresholds
            .critical_check(patient.age, &patient.vitals);
        if critical.triggered {
            reasoning.extend(critical.reasons.iter().cloned());
            red_flags.extend(critical.reasons);
        }
        if !danger_hits.is_empty() {
            let shown = danger_hits
                .iter()
                .take(DANGER_DISPLAY_LIMIT)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ");
            reasoning.push(format!("كلمات حرجة: {shown}"));
            red_flags.push(format!("حالة حرجة: {shown}"));
        }
        if !reasoning.is_empty() {
            return self.decide(TriageLevel::Resuscitation, red_flags, reasoning);
        }

        // ---- Level 2: emergent -----------------------------------------
        // Each trigger is evaluated independently so the reasoning lists
        // everything that fired, not just the first hit.
        let mut emergent = false;

        if let Some(pain) = patient.vitals.pain_score {
            if pain >= SEVERE_PAIN_FLOOR {
                emergent = true;
                reasoning.push(format!("ألم شديد: {pain}/10"));
            }
        }
        if let Some(gcs) = patient.vitals.gcs {
            // Altered but not comatose; coma was already caught above.
            if (crate::vitals::GCS_COMA_FLOOR..15).contains(&gcs) {
                emergent = true;
                reasoning.push(format!("تغير في الوعي: GCS {gcs}"));
            }
        }
        let danger_zone = self
            .protocol
            .thresholds
            .danger_zone_check(patient.age, &patient.vitals);
        if danger_zone.triggered {
            emergent = true;
            reasoning.extend(danger_zone.reasons);
            red_flags.push("علامات حيوية غير طبيعية".to_string());
        }
        let high_risk: Vec<&str> = HIGH_RISK
            .iter()
            .filter(|(concept, _)| tags.contains(concept))
            .map(|(_, name_ar)| *name_ar)
            .collect();
        if !high_risk.is_empty() {
            emergent = true;
            reasoning.push(format!("أعراض خطيرة: {}", high_risk.join(", ")));
        }
        if emergent {
            return self.decide(TriageLevel::Emergent, red_flags, reasoning);
        }

        // ---- Levels 3-5: resource based --------------------------------
        let resource_count = self.protocol.resources.estimate(&tags, &patient.vitals);
        let (level, reasoning) = match resource_count {
            n if n >= 2 => (
                TriageLevel::Urgent,
                vec![format!("يحتاج تقريباً {n} موارد")],
            ),
            1 => (
                TriageLevel::LessUrgent,
                vec!["يحتاج مورد واحد فقط".to_string()],
            ),
            _ => (
                TriageLevel::NonUrgent,
                vec!["لا يحتاج موارد حادة".to_string()],
            ),
        };
        self.decide(level, red_flags, reasoning)
    }

    /// Evaluates a record on behalf of the AI-assisted path.
    ///
    /// Identical to [`evaluate`](Self::evaluate), with the reasoning list
    /// extended by [`FALLBACK_MARKER`] so the caller can surface which
    /// protocol produced the decision.
    pub fn evaluate_fallback(&self, patient: &PatientRecord) -> TriageResult {
        let mut result = self.evaluate(patient);
        result.reasoning.push(FALLBACK_MARKER.to_string());
        result
    }

    fn decide(
        &self,
        level: TriageLevel,
        red_flags: Vec<String>,
        reasoning: Vec<String>,
    ) -> TriageResult {
        tracing::debug!(level = level.as_u8(), "triage decision");
        TriageResult::for_level(level, red_flags, reasoning)
    }
}
