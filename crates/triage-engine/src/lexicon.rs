//! The clinical concept lexicon and symptom extractor.
//!
//! Maps each [`ConceptId`] to an ordered list of surface forms in English,
//! formal Arabic, and Egyptian colloquial Arabic. The lists are compiled
//! once into [`PhraseSet`]s and scanned on every evaluation.
//!
//! Surface forms were curated against real Egyptian ED presentations.
//! Known matching hazards that shaped the lists:
//!
//! - bare "pressure" is gone from chest_pain (it fired on "blood pressure
//!   medication"); only anchored phrases like "chest pressure" remain
//! - bare "حرق" is gone from burn (it sits inside "حرقان", the burning
//!   sensation of reflux and UTI complaints); verb and plural forms remain
//! - "cut"/"جرح" live under laceration, not trauma, so a suturable wound
//!   estimates one resource instead of two

use std::collections::BTreeSet;

use triage_types::ConceptId;

use crate::matcher::{normalize, PhraseSet};
use crate::types::{ProtocolError, ProtocolResult};

/// Negation markers present in complaint text ("no", "denies", "مافيش"...).
///
/// Deliberately NOT consulted by the extractor: a matched phrase is always
/// treated as a positive finding, because a missed real symptom is worse
/// than an unnecessary escalation. Any future negation handling must be a
/// separately tested change, not a quiet tweak here.
pub const NEGATION_TERMS: &[&str] = &[
    "no ", "not ", "denies ", "without ", "لا ", "بدون ", "مافيش ",
];

/// Builtin surface forms per concept.
///
/// Order within a list is scan order; the first hit short-circuits the
/// concept, so frequent phrases come first.
const BUILTIN: &[(ConceptId, &[&str])] = &[
    (
        ConceptId::ChestPain,
        &[
            "chest pain",
            "pain in chest",
            "pain in my chest",
            "chest tightness",
            "tightness in chest",
            "chest pressure",
            "pressure in chest",
            "angina",
            "ألم صدر",
            "ألم في صدري",
            "وجع في صدري",
            "صدري بيوجعني",
            "نغزة",
            "طبقة على صدري",
            "ضغط على صدري",
            "ذبحة",
            "حرقان في الصدر",
        ],
    ),
    (
        ConceptId::Cardiac,
        &[
            "palpitations",
            "heart racing",
            "racing heart",
            "irregular heartbeat",
            "heart attack",
            "قلبي بيدق جامد",
            "خفقان",
            "قلبي بيرفرف",
            "دقات قلبي سريعة",
        ],
    ),
    (
        ConceptId::Sob,
        &[
            "short of breath",
            "shortness of breath",
            "cant breathe",
            "can't breathe",
            "difficulty breathing",
            "trouble breathing",
            "dyspnea",
            "gasping",
            "wheezing",
            "ضيق تنفس",
            "ضيق في التنفس",
            "مش عارف اخد نفسي",
            "آخد نفسي",
            "اخد نفسي",
            "كرشة نفس",
            "مخنوق",
            "نهجان",
        ],
    ),
    (
        ConceptId::Stroke,
        &[
            "stroke",
            "face drooping",
            "facial droop",
            "face droop",
            "slurred speech",
            "cant move",
            "can't move",
            "numbness on one side",
            "weakness on one side",
            "paralysis",
            "paralyzed",
            "جلطة",
            "وشه مايل",
            "مش قادر يتكلم",
            "شلل",
        ],
    ),
    (
        ConceptId::Neuro,
        &[
            "dizzy",
            "dizziness",
            "vertigo",
            "faint",
            "fainted",
            "fainting",
            "passed out",
            "numbness",
            "tingling",
            "severe headache",
            "migraine",
            "دوخة",
            "دايخ",
            "إغماء",
            "اغماء",
            "تنميل",
            "صداع شديد",
            "صداع نصفي",
        ],
    ),
    (
        ConceptId::Abdominal,
        &[
            "stomach pain",
            "abdominal pain",
            "belly ache",
            "bellyache",
            "stomach ache",
            "tummy ache",
            "vomiting",
            "throwing up",
            "diarrhea",
            "nausea",
            "وجع بطن",
            "بطني بتوجعني",
            "ألم في بطني",
            "مغص",
            "قيء",
            "ترجيع",
            "بترجع",
            "إسهال",
            "اسهال",
            "ألم في معدتي",
            "معدتي بتوجعني",
        ],
    ),
    (
        ConceptId::Trauma,
        &[
            "fall",
            "fell",
            "hit",
            "accident",
            "car crash",
            "crash",
            "fracture",
            "broken",
            "injury",
            "injured",
            "سقوط",
            "وقعت",
            "وقع من",
            "خبطت",
            "اتخبط",
            "حادث",
            "حادثة",
            "كسر",
            "تعويرة",
        ],
    ),
    (
        ConceptId::Fever,
        &[
            "fever",
            "high temperature",
            "chills",
            "shivering",
            "febrile",
            "حرارة",
            "سخونية",
            "سخونة",
            "حمى",
            "رعشة",
        ],
    ),
    (
        ConceptId::Psych,
        &[
            "suicidal",
            "suicide",
            "kill myself",
            "hurt myself",
            "hopeless",
            "hearing voices",
            "hallucination",
            "hallucinations",
            "aggressive",
            "انتحار",
            "هاقتل نفسي",
            "اقتل نفسي",
            "عايز اموت",
            "عايز أموت",
            "مش عايز اعيش",
            "هلاوس",
            "بيسمع اصوات",
            "عدواني",
        ],
    ),
    (
        ConceptId::Allergy,
        &[
            "allergy",
            "allergic",
            "rash",
            "hives",
            "itching",
            "itchy",
            "swelling",
            "peanut",
            "peanuts",
            "حساسية",
            "طفح",
            "تورم",
            "هرش",
        ],
    ),
    (
        ConceptId::Diabetic,
        &[
            "diabetic",
            "diabetes",
            "blood sugar",
            "low sugar",
            "high sugar",
            "hypoglycemia",
            "hyperglycemia",
            "insulin",
            "السكر واطي",
            "السكر عالي",
            "مريض سكر",
            "عنده سكر",
            "انسولين",
        ],
    ),
    (
        ConceptId::Pregnancy,
        &[
            "pregnant",
            "pregnancy",
            "contractions",
            "labor pains",
            "in labor",
            "water broke",
            "حامل",
            "طلق",
            "ولادة",
            "المية نزلت",
        ],
    ),
    (
        ConceptId::Laceration,
        &[
            "cut",
            "laceration",
            "stitches",
            "wound",
            "bleeding",
            "جرح",
            "غرز",
            "اتقطعت",
            "اتعور",
            "نزيف",
            "بينزف",
        ],
    ),
    (
        ConceptId::Uti,
        &[
            "burning urination",
            "burning when urinating",
            "painful urination",
            "blood in urine",
            "urinary",
            "uti",
            "حرقان في البول",
            "حرقان بول",
            "دم في البول",
            "صعوبة في التبول",
            "التهاب بولي",
        ],
    ),
    (
        ConceptId::Burn,
        &[
            "burn",
            "burned",
            "burnt",
            "scald",
            "scalded",
            "اتحرق",
            "اتحرقت",
            "حروق",
        ],
    ),
    (
        ConceptId::BiteSting,
        &[
            "bite",
            "bitten",
            "bit by",
            "sting",
            "stung",
            "scorpion",
            "snake bite",
            "dog bite",
            "bee sting",
            "عضة",
            "عضني",
            "قرصة",
            "قرصني",
            "لدغة",
            "لدغني",
            "عقرب",
            "تعبان",
        ],
    ),
];

/// The compiled concept lexicon.
///
/// Immutable after construction; share it by reference across threads.
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: Vec<(ConceptId, PhraseSet)>,
}

impl Lexicon {
    /// Raw builtin pattern lists, used as the base layer for protocol
    /// overrides.
    pub(crate) fn builtin_entries() -> Vec<(ConceptId, Vec<String>)> {
        BUILTIN
            .iter()
            .map(|(concept, raw)| (*concept, raw.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    /// Builds the builtin lexicon.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN
                .iter()
                .map(|(concept, raw)| (*concept, PhraseSet::compile(raw.iter().copied())))
                .collect(),
        }
    }

    /// Builds a lexicon from explicit per-concept pattern lists.
    ///
    /// # Errors
    /// Fails if a concept has no patterns or a pattern is blank.
    pub fn from_entries(entries: Vec<(ConceptId, Vec<String>)>) -> ProtocolResult<Self> {
        let mut compiled = Vec::with_capacity(entries.len());
        for (concept, raw) in entries {
            if raw.is_empty() {
                return Err(ProtocolError::EmptyConcept {
                    concept: concept.as_str().to_string(),
                });
            }
            if raw.iter().any(|p| p.trim().is_empty()) {
                return Err(ProtocolError::EmptyPattern {
                    entry: concept.as_str().to_string(),
                });
            }
            compiled.push((concept, PhraseSet::compile(raw)));
        }
        Ok(Self { entries: compiled })
    }

    /// Extracts the set of concepts present in complaint text.
    ///
    /// Membership only — no counts, no positions. A concept contributes at
    /// most once regardless of how many of its surface forms appear, and
    /// negation is ignored by contract (see [`NEGATION_TERMS`]).
    pub fn extract(&self, complaint: &str) -> BTreeSet<ConceptId> {
        let text = normalize(complaint);
        self.entries
            .iter()
            .filter(|(_, set)| set.any_match(&text))
            .map(|(concept, _)| *concept)
            .collect()
    }

    /// Returns the compiled phrase set for one concept, if present.
    pub fn phrase_set(&self, concept: ConceptId) -> Option<&PhraseSet> {
        self.entries
            .iter()
            .find(|(c, _)| *c == concept)
            .map(|(_, set)| set)
    }

    /// Number of concepts carried by this lexicon.
    pub fn concept_count(&self) -> usize {
        self.entries.len()
    }
}
