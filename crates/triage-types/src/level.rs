//! Triage acuity levels and their static presentation metadata.
//!
//! This module provides the `TriageLevel` enum for the five ESI v5 acuity
//! levels and the `LevelProfile` lookup table that maps each level to its
//! display color, bilingual labels, and disposition guidance.

/// An ESI v5 triage acuity level.
///
/// Lower numbers are more severe: level 1 demands immediate resuscitation,
/// level 5 can safely wait or be referred to a clinic.
///
/// # Examples
///
/// ```
/// use triage_types::TriageLevel;
///
/// let level = TriageLevel::from_u8(2);
/// assert_eq!(level, Some(TriageLevel::Emergent));
/// assert_eq!(TriageLevel::Emergent.as_u8(), 2);
/// assert!(TriageLevel::Emergent.requires_alert());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "u8", try_from = "u8")
)]
pub enum TriageLevel {
    /// Level 1: immediate life-saving intervention required.
    Resuscitation,
    /// Level 2: high risk of deterioration, see within minutes.
    Emergent,
    /// Level 3: stable but expected to need multiple resources.
    Urgent,
    /// Level 4: stable, expected to need one resource.
    LessUrgent,
    /// Level 5: stable, expected to need no acute resources.
    NonUrgent,
}

impl TriageLevel {
    /// All levels in severity order, most severe first.
    pub const ALL: [TriageLevel; 5] = [
        TriageLevel::Resuscitation,
        TriageLevel::Emergent,
        TriageLevel::Urgent,
        TriageLevel::LessUrgent,
        TriageLevel::NonUrgent,
    ];

    /// Creates a TriageLevel from its numeric value.
    ///
    /// Returns `None` if the value is outside 1..=5.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Resuscitation),
            2 => Some(Self::Emergent),
            3 => Some(Self::Urgent),
            4 => Some(Self::LessUrgent),
            5 => Some(Self::NonUrgent),
            _ => None,
        }
    }

    /// Returns the numeric value of this level (1 = most severe).
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Resuscitation => 1,
            Self::Emergent => 2,
            Self::Urgent => 3,
            Self::LessUrgent => 4,
            Self::NonUrgent => 5,
        }
    }

    /// Returns true for levels that should page the care team (1 and 2).
    ///
    /// The alerting collaborator gates notification delivery on this.
    pub fn requires_alert(self) -> bool {
        self.as_u8() <= 2
    }

    /// Returns the static presentation metadata for this level.
    pub fn profile(self) -> &'static LevelProfile {
        &PROFILES[(self.as_u8() - 1) as usize]
    }
}

impl From<TriageLevel> for u8 {
    fn from(level: TriageLevel) -> u8 {
        level.as_u8()
    }
}

impl TryFrom<u8> for TriageLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        TriageLevel::from_u8(value).ok_or_else(|| format!("invalid triage level: {value}"))
    }
}

/// Static presentation metadata for one triage level.
///
/// This table is data, not logic: the classifier decides the level and then
/// copies these fields into the result, so localization and audit reviews
/// never have to read branching code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProfile {
    /// Display color as a CSS hex string.
    pub color_code: &'static str,
    /// English label, e.g. "Emergent (Level 2)".
    pub label_en: &'static str,
    /// Arabic label, e.g. "طوارئ (مستوى ٢)".
    pub label_ar: &'static str,
    /// Short clinical description (Arabic).
    pub description: &'static str,
    /// Recommended disposition (Arabic).
    pub recommended_action: &'static str,
    /// Target time to physician contact (Arabic).
    pub time_to_physician: &'static str,
}

const PROFILES: [LevelProfile; 5] = [
    LevelProfile {
        color_code: "#ef4444",
        label_en: "Resuscitation (Level 1)",
        label_ar: "إنعاش (مستوى ١)",
        description: "يتطلب تدخل فوري لإنقاذ الحياة",
        recommended_action: "تفعيل فريق الإنعاش فوراً",
        time_to_physician: "فوري",
    },
    LevelProfile {
        color_code: "#f97316",
        label_en: "Emergent (Level 2)",
        label_ar: "طوارئ (مستوى ٢)",
        description: "خطورة عالية، احتمال تدهور سريع",
        recommended_action: "غرفة العناية المركزة، مراقبة مستمرة",
        time_to_physician: "< 15 دقيقة",
    },
    LevelProfile {
        color_code: "#eab308",
        label_en: "Urgent (Level 3)",
        label_ar: "عاجل (مستوى ٣)",
        description: "مستقر، يحتاج موارد متعددة",
        recommended_action: "غرفة فحص، طلب تحاليل/أشعة",
        time_to_physician: "< 60 دقيقة",
    },
    LevelProfile {
        color_code: "#22c55e",
        label_en: "Less Urgent (Level 4)",
        label_ar: "أقل إلحاحاً (مستوى ٤)",
        description: "مستقر، يحتاج مورد واحد",
        recommended_action: "العيادة السريعة",
        time_to_physician: "يمكن الانتظار",
    },
    LevelProfile {
        color_code: "#3b82f6",
        label_en: "Non-Urgent (Level 5)",
        label_ar: "غير عاجل (مستوى ٥)",
        description: "لا يحتاج موارد",
        recommended_action: "إعادة الروشتة أو الطمأنينة",
        time_to_physician: "يمكن الانتظار / تحويل للعيادة",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_conversion() {
        assert_eq!(TriageLevel::from_u8(1), Some(TriageLevel::Resuscitation));
        assert_eq!(TriageLevel::from_u8(5), Some(TriageLevel::NonUrgent));
        assert_eq!(TriageLevel::from_u8(0), None);
        assert_eq!(TriageLevel::from_u8(6), None);
        assert_eq!(TriageLevel::Urgent.as_u8(), 3);
    }

    #[test]
    fn test_roundtrip_all_levels() {
        for level in TriageLevel::ALL {
            assert_eq!(TriageLevel::from_u8(level.as_u8()), Some(level));
        }
    }

    #[test]
    fn test_severity_ordering() {
        // Ord follows declaration order: most severe sorts first.
        assert!(TriageLevel::Resuscitation < TriageLevel::Emergent);
        assert!(TriageLevel::Emergent < TriageLevel::NonUrgent);
    }

    #[test]
    fn test_requires_alert() {
        assert!(TriageLevel::Resuscitation.requires_alert());
        assert!(TriageLevel::Emergent.requires_alert());
        assert!(!TriageLevel::Urgent.requires_alert());
        assert!(!TriageLevel::LessUrgent.requires_alert());
        assert!(!TriageLevel::NonUrgent.requires_alert());
    }

    #[test]
    fn test_profiles_are_distinct() {
        let colors: Vec<&str> = TriageLevel::ALL
            .iter()
            .map(|l| l.profile().color_code)
            .collect();
        for (i, color) in colors.iter().enumerate() {
            assert!(color.starts_with('#'));
            assert!(!colors[i + 1..].contains(color));
        }
    }

    #[test]
    fn test_profile_lookup() {
        let profile = TriageLevel::Resuscitation.profile();
        assert_eq!(profile.color_code, "#ef4444");
        assert_eq!(profile.label_en, "Resuscitation (Level 1)");
        assert_eq!(profile.time_to_physician, "فوري");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_as_integer() {
        let json = serde_json::to_string(&TriageLevel::Urgent).unwrap();
        assert_eq!(json, "3");
        let parsed: TriageLevel = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, TriageLevel::Resuscitation);
        assert!(serde_json::from_str::<TriageLevel>("9").is_err());
    }
}
