//! Age-stratified vital-sign threshold evaluation.
//!
//! Two pure checks over one canonical ESI v5-aligned table:
//!
//! - [`ThresholdTable::critical_check`] — immediately life-threatening
//!   values, mapping to level 1
//! - [`ThresholdTable::danger_zone_check`] — abnormal but not immediately
//!   life-threatening values, contributing to level 2 only
//!
//! Both checks are exhaustive: every measured vital is evaluated and every
//! breach accumulates its own reason string, so the clinician sees the full
//! picture rather than the first hit. Absent vitals are skipped — "not
//! measured" is never "normal".
//!
//! The table is data, not branching logic. Canonical values:
//!
//! | band        | critical HR | critical RR | critical SBP | danger HR | danger RR |
//! |-------------|-------------|-------------|--------------|-----------|-----------|
//! | infant <1y  | <60 / >200  | <10 / >60   | <60          | >180      | >50       |
//! | child 1–5y  | <60 / >180  | <10 / >50   | <70          | >140      | >40       |
//! | child 5–14y | <50 / >160  | <10 / >40   | <80          | >120      | >30       |
//! | adult ≥14y  | <40 / >150  | <8 / >36    | <80 / >220   | <50 / >100| <10 / >24 |
//!
//! SpO2 is critical below 90% in every band; the danger zone is 90–94% for
//! adults and anything below 94% for children. Temperature is critical
//! outside 35–41 °C in every band, with the adult danger zone outside
//! 36–39 °C and a pediatric danger threshold above 39 °C. GCS below 9 is
//! critical regardless of age.

use triage_types::Vitals;

use crate::types::{ProtocolError, ProtocolResult};

/// GCS values below this indicate coma (critical).
pub const GCS_COMA_FLOOR: u8 = 9;

/// Age bands used by the threshold table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeBand {
    /// Under 1 year.
    Infant,
    /// 1 to under 5 years.
    YoungChild,
    /// 5 to under 14 years.
    OlderChild,
    /// 14 years and over.
    Adult,
}

impl AgeBand {
    /// All bands, youngest first; index order matches the table rows.
    pub const ALL: [AgeBand; 4] = [
        AgeBand::Infant,
        AgeBand::YoungChild,
        AgeBand::OlderChild,
        AgeBand::Adult,
    ];

    /// Selects the band for an age in years (fractional for infants).
    pub fn from_age(age: f64) -> Self {
        if age < 1.0 {
            Self::Infant
        } else if age < 5.0 {
            Self::YoungChild
        } else if age < 14.0 {
            Self::OlderChild
        } else {
            Self::Adult
        }
    }

    /// Row index into the threshold table.
    pub fn index(self) -> usize {
        match self {
            Self::Infant => 0,
            Self::YoungChild => 1,
            Self::OlderChild => 2,
            Self::Adult => 3,
        }
    }

    /// Identifier used in protocol files and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Infant => "infant",
            Self::YoungChild => "young_child",
            Self::OlderChild => "older_child",
            Self::Adult => "adult",
        }
    }

    /// Arabic qualifier appended to reason strings for pediatric bands.
    fn suffix_ar(self) -> &'static str {
        match self {
            Self::Infant => " للرضيع",
            Self::YoungChild | Self::OlderChild => " للطفل",
            Self::Adult => "",
        }
    }
}

/// Optional low/high bounds for one vital in one band.
///
/// A value breaches when it is strictly below `low` or strictly above
/// `high`; a `None` bound means no threshold is defined on that side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    /// Breach when the measurement is below this.
    pub low: Option<f64>,
    /// Breach when the measurement is above this.
    pub high: Option<f64>,
}

impl Limits {
    /// No thresholds on either side.
    pub const NONE: Limits = Limits {
        low: None,
        high: None,
    };

    fn breach(&self, value: f64) -> Option<Breach> {
        if let Some(low) = self.low {
            if value < low {
                return Some(Breach::Low(low));
            }
        }
        if let Some(high) = self.high {
            if value > high {
                return Some(Breach::High(high));
            }
        }
        None
    }
}

enum Breach {
    Low(f64),
    High(f64),
}

/// SpO2 rule: breach below `below`, optionally guarded so values already
/// below `at_least` are left to the critical check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpO2Rule {
    /// Breach when saturation is below this.
    pub below: f64,
    /// Only breach when saturation is at least this (adult danger zone is
    /// the 90–94% window; below 90% is critical territory).
    pub at_least: Option<f64>,
}

impl SpO2Rule {
    fn breach(&self, value: f64) -> bool {
        if value >= self.below {
            return false;
        }
        match self.at_least {
            Some(floor) => value >= floor,
            None => true,
        }
    }
}

/// Threshold row for one age band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandRow {
    /// Heart rate bounds (bpm).
    pub hr: Limits,
    /// Respiratory rate bounds (breaths/min).
    pub rr: Limits,
    /// Systolic blood pressure bounds (mmHg).
    pub sbp: Limits,
    /// Temperature bounds (°C).
    pub temp: Limits,
    /// Oxygen saturation rule (%).
    pub spo2: Option<SpO2Rule>,
}

/// The full age-banded threshold table: one critical row and one
/// danger-zone row per band.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdTable {
    critical: [BandRow; 4],
    danger: [BandRow; 4],
}

const fn lo_hi(low: f64, high: f64) -> Limits {
    Limits {
        low: Some(low),
        high: Some(high),
    }
}

const fn lo(low: f64) -> Limits {
    Limits {
        low: Some(low),
        high: None,
    }
}

const fn hi(high: f64) -> Limits {
    Limits {
        low: None,
        high: Some(high),
    }
}

const SPO2_CRITICAL: Option<SpO2Rule> = Some(SpO2Rule {
    below: 90.0,
    at_least: None,
});

const SPO2_DANGER_PEDIATRIC: Option<SpO2Rule> = Some(SpO2Rule {
    below: 94.0,
    at_least: None,
});

const BUILTIN: ThresholdTable = ThresholdTable {
    critical: [
        // Infant <1y
        BandRow {
            hr: lo_hi(60.0, 200.0),
            rr: lo_hi(10.0, 60.0),
            sbp: lo(60.0),
            temp: lo_hi(35.0, 41.0),
            spo2: SPO2_CRITICAL,
        },
        // Young child 1-5y
        BandRow {
            hr: lo_hi(60.0, 180.0),
            rr: lo_hi(10.0, 50.0),
            sbp: lo(70.0),
            temp: lo_hi(35.0, 41.0),
            spo2: SPO2_CRITICAL,
        },
        // Older child 5-14y
        BandRow {
            hr: lo_hi(50.0, 160.0),
            rr: lo_hi(10.0, 40.0),
            sbp: lo(80.0),
            temp: lo_hi(35.0, 41.0),
            spo2: SPO2_CRITICAL,
        },
        // Adult >=14y
        BandRow {
            hr: lo_hi(40.0, 150.0),
            rr: lo_hi(8.0, 36.0),
            sbp: lo_hi(80.0, 220.0),
            temp: lo_hi(35.0, 41.0),
            spo2: SPO2_CRITICAL,
        },
    ],
    danger: [
        // Infant <1y
        BandRow {
            hr: hi(180.0),
            rr: hi(50.0),
            sbp: Limits::NONE,
            temp: hi(39.0),
            spo2: SPO2_DANGER_PEDIATRIC,
        },
        // Young child 1-5y
        BandRow {
            hr: hi(140.0),
            rr: hi(40.0),
            sbp: Limits::NONE,
            temp: hi(39.0),
            spo2: SPO2_DANGER_PEDIATRIC,
        },
        // Older child 5-14y
        BandRow {
            hr: hi(120.0),
            rr: hi(30.0),
            sbp: Limits::NONE,
            temp: hi(39.0),
            spo2: SPO2_DANGER_PEDIATRIC,
        },
        // Adult >=14y
        BandRow {
            hr: lo_hi(50.0, 100.0),
            rr: lo_hi(10.0, 24.0),
            sbp: lo_hi(90.0, 180.0),
            temp: lo_hi(36.0, 39.0),
            spo2: Some(SpO2Rule {
                below: 94.0,
                at_least: Some(90.0),
            }),
        },
    ],
};

/// Outcome of one threshold check.
#[derive(Debug, Clone, PartialEq)]
pub struct VitalsFindings {
    /// True if any breach was found.
    pub triggered: bool,
    /// One reason string per breach, in check order.
    pub reasons: Vec<String>,
}

impl VitalsFindings {
    fn from_reasons(reasons: Vec<String>) -> Self {
        Self {
            triggered: !reasons.is_empty(),
            reasons,
        }
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ThresholdTable {
    /// Returns the builtin canonical table.
    pub fn builtin() -> Self {
        BUILTIN
    }

    /// Returns the critical row for a band.
    pub fn critical_row(&self, band: AgeBand) -> &BandRow {
        &self.critical[band.index()]
    }

    /// Returns the danger-zone row for a band.
    pub fn danger_row(&self, band: AgeBand) -> &BandRow {
        &self.danger[band.index()]
    }

    /// Mutable critical row access, used when applying protocol overrides.
    pub(crate) fn critical_row_mut(&mut self, band: AgeBand) -> &mut BandRow {
        &mut self.critical[band.index()]
    }

    /// Mutable danger-zone row access, used when applying protocol overrides.
    pub(crate) fn danger_row_mut(&mut self, band: AgeBand) -> &mut BandRow {
        &mut self.danger[band.index()]
    }

    /// Checks for immediately life-threatening vitals (level 1).
    ///
    /// Exhaustive: accumulates every breach found, never stops at the
    /// first. Absent vitals are skipped.
    pub fn critical_check(&self, age: f64, vitals: &Vitals) -> VitalsFindings {
        let band = AgeBand::from_age(age);
        let row = self.critical_row(band);
        let suffix = band.suffix_ar();
        let mut reasons = Vec::new();

        if let Some(rr) = vitals.rr {
            if let Some(breach) = row.rr.breach(rr.into()) {
                reasons.push(critical_reason("معدل التنفس خطير", suffix, rr, "/دقيقة", breach));
            }
        }
        if let Some(hr) = vitals.hr {
            if let Some(breach) = row.hr.breach(hr.into()) {
                reasons.push(critical_reason("النبض خطير", suffix, hr, "/دقيقة", breach));
            }
        }
        if let Some(spo2) = vitals.spo2 {
            if let Some(rule) = row.spo2 {
                if rule.breach(spo2.into()) {
                    reasons.push(format!(
                        "نسبة الأكسجين خطيرة{suffix}: {spo2}% (< {})",
                        rule.below
                    ));
                }
            }
        }
        if let Some(gcs) = vitals.gcs {
            if gcs < GCS_COMA_FLOOR {
                reasons.push(format!("مستوى الوعي خطير: GCS {gcs} (< {GCS_COMA_FLOOR})"));
            }
        }
        if let Some(sbp) = vitals.sbp {
            if let Some(breach) = row.sbp.breach(sbp.into()) {
                reasons.push(critical_reason("ضغط الدم خطير", suffix, sbp, "", breach));
            }
        }
        if let Some(temp) = vitals.temp {
            if let Some(breach) = row.temp.breach(temp.into()) {
                reasons.push(critical_reason("درجة الحرارة خطيرة", suffix, temp, "°C", breach));
            }
        }

        VitalsFindings::from_reasons(reasons)
    }

    /// Checks for danger-zone vitals (level 2 contribution only).
    ///
    /// Same exhaustive-accumulation discipline as the critical check, with
    /// milder thresholds.
    pub fn danger_zone_check(&self, age: f64, vitals: &Vitals) -> VitalsFindings {
        let band = AgeBand::from_age(age);
        let row = self.danger_row(band);
        let suffix = band.suffix_ar();
        let mut reasons = Vec::new();

        if let Some(hr) = vitals.hr {
            match row.hr.breach(hr.into()) {
                Some(Breach::High(_)) => reasons.push(format!("تسارع النبض{suffix}: {hr}/دقيقة")),
                Some(Breach::Low(_)) => reasons.push(format!("بطء النبض{suffix}: {hr}/دقيقة")),
                None => {}
            }
        }
        if let Some(rr) = vitals.rr {
            match row.rr.breach(rr.into()) {
                Some(Breach::High(_)) => reasons.push(format!("سرعة التنفس{suffix}: {rr}/دقيقة")),
                Some(Breach::Low(_)) => reasons.push(format!("بطء التنفس{suffix}: {rr}/دقيقة")),
                None => {}
            }
        }
        if let Some(spo2) = vitals.spo2 {
            if let Some(rule) = row.spo2 {
                if rule.breach(spo2.into()) {
                    reasons.push(format!("نقص الأكسجين{suffix}: {spo2}%"));
                }
            }
        }
        if let Some(sbp) = vitals.sbp {
            match row.sbp.breach(sbp.into()) {
                Some(Breach::High(_)) => reasons.push(format!("ارتفاع الضغط{suffix}: {sbp}")),
                Some(Breach::Low(_)) => reasons.push(format!("انخفاض الضغط{suffix}: {sbp}")),
                None => {}
            }
        }
        if let Some(temp) = vitals.temp {
            match row.temp.breach(temp.into()) {
                Some(Breach::High(_)) => reasons.push(format!("حمى عالية{suffix}: {temp}°C")),
                Some(Breach::Low(_)) => reasons.push(format!("انخفاض حرارة{suffix}: {temp}°C")),
                None => {}
            }
        }

        VitalsFindings::from_reasons(reasons)
    }

    /// Validates every bound pair in the table.
    ///
    /// # Errors
    /// Fails if any row has a low bound at or above its high bound, or an
    /// SpO2 guard at or above its breach threshold.
    pub fn validate(&self) -> ProtocolResult<()> {
        for (kind, rows) in [("critical", &self.critical), ("danger", &self.danger)] {
            for (band, row) in AgeBand::ALL.iter().zip(rows.iter()) {
                for (vital, limits) in [
                    ("hr", row.hr),
                    ("rr", row.rr),
                    ("sbp", row.sbp),
                    ("temp", row.temp),
                ] {
                    if let (Some(low), Some(high)) = (limits.low, limits.high) {
                        if low >= high {
                            return Err(ProtocolError::InvalidThreshold {
                                vital: format!("{kind} {vital}"),
                                band: band.as_str().to_string(),
                                low,
                                high,
                            });
                        }
                    }
                }
                if let Some(rule) = row.spo2 {
                    if let Some(floor) = rule.at_least {
                        if floor >= rule.below {
                            return Err(ProtocolError::InvalidThreshold {
                                vital: format!("{kind} spo2"),
                                band: band.as_str().to_string(),
                                low: floor,
                                high: rule.below,
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

// `value` keeps its original type: an f32 widened to f64 prints with
// conversion noise (38.2 becomes 38.20000076293945).
fn critical_reason(
    label: &str,
    suffix: &str,
    value: impl std::fmt::Display,
    unit: &str,
    breach: Breach,
) -> String {
    match breach {
        Breach::Low(bound) => format!("{label}{suffix}: {value}{unit} (< {bound})"),
        Breach::High(bound) => format!("{label}{suffix}: {value}{unit} (> {bound})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vitals() -> Vitals {
        Vitals::default()
    }

    #[test]
    fn test_band_selection() {
        assert_eq!(AgeBand::from_age(0.2), AgeBand::Infant);
        assert_eq!(AgeBand::from_age(0.99), AgeBand::Infant);
        assert_eq!(AgeBand::from_age(1.0), AgeBand::YoungChild);
        assert_eq!(AgeBand::from_age(4.5), AgeBand::YoungChild);
        assert_eq!(AgeBand::from_age(5.0), AgeBand::OlderChild);
        assert_eq!(AgeBand::from_age(13.9), AgeBand::OlderChild);
        assert_eq!(AgeBand::from_age(14.0), AgeBand::Adult);
        assert_eq!(AgeBand::from_age(70.0), AgeBand::Adult);
    }

    #[test]
    fn test_empty_vitals_trigger_nothing() {
        let table = ThresholdTable::builtin();
        let v = vitals();
        assert!(!table.critical_check(40.0, &v).triggered);
        assert!(!table.danger_zone_check(40.0, &v).triggered);
    }

    #[test]
    fn test_adult_critical_bradycardia() {
        let table = ThresholdTable::builtin();
        let v = Vitals {
            hr: Some(35),
            ..vitals()
        };
        let findings = table.critical_check(70.0, &v);
        assert!(findings.triggered);
        assert_eq!(findings.reasons.len(), 1);
        assert!(findings.reasons[0].contains("35"));
    }

    #[test]
    fn test_critical_check_accumulates_every_breach() {
        let table = ThresholdTable::builtin();
        let v = Vitals {
            hr: Some(60),
            rr: Some(4),
            spo2: Some(88.0),
            ..vitals()
        };
        let findings = table.critical_check(50.0, &v);
        assert!(findings.triggered);
        // RR < 8 and SpO2 < 90 both reported; HR 60 is fine.
        assert_eq!(findings.reasons.len(), 2);
    }

    #[test]
    fn test_adult_critical_boundaries_are_strict() {
        let table = ThresholdTable::builtin();
        let at_bound = Vitals {
            hr: Some(150),
            rr: Some(36),
            spo2: Some(90.0),
            sbp: Some(220),
            temp: Some(41.0),
            ..vitals()
        };
        assert!(!table.critical_check(30.0, &at_bound).triggered);

        let past_bound = Vitals {
            hr: Some(151),
            ..vitals()
        };
        assert!(table.critical_check(30.0, &past_bound).triggered);
    }

    #[test]
    fn test_gcs_coma_is_critical_at_any_age() {
        let table = ThresholdTable::builtin();
        let v = Vitals {
            gcs: Some(7),
            ..vitals()
        };
        assert!(table.critical_check(30.0, &v).triggered);
        assert!(table.critical_check(3.0, &v).triggered);

        let alert = Vitals {
            gcs: Some(15),
            ..vitals()
        };
        assert!(!table.critical_check(30.0, &alert).triggered);
    }

    #[test]
    fn test_infant_tachycardia_is_danger_not_critical() {
        let table = ThresholdTable::builtin();
        let v = Vitals {
            hr: Some(190),
            ..vitals()
        };
        assert!(!table.critical_check(0.2, &v).triggered);
        let findings = table.danger_zone_check(0.2, &v);
        assert!(findings.triggered);
        assert!(findings.reasons[0].contains("للرضيع"));
    }

    #[test]
    fn test_infant_extreme_tachycardia_is_critical() {
        let table = ThresholdTable::builtin();
        let v = Vitals {
            hr: Some(210),
            ..vitals()
        };
        assert!(table.critical_check(0.5, &v).triggered);
    }

    #[test]
    fn test_same_rate_classifies_differently_by_band() {
        let table = ThresholdTable::builtin();
        let v = Vitals {
            hr: Some(130),
            ..vitals()
        };
        // Quiet for an infant, danger for an older child, danger for adult.
        assert!(!table.danger_zone_check(0.5, &v).triggered);
        assert!(table.danger_zone_check(9.0, &v).triggered);
        assert!(table.danger_zone_check(40.0, &v).triggered);
        assert!(!table.critical_check(40.0, &v).triggered);
    }

    #[test]
    fn test_young_child_critical_tachypnea() {
        let table = ThresholdTable::builtin();
        let v = Vitals {
            rr: Some(55),
            ..vitals()
        };
        assert!(table.critical_check(3.0, &v).triggered);

        // RR 30 is danger-zone for an adult but unremarkable for a toddler.
        let moderate = Vitals {
            rr: Some(30),
            ..vitals()
        };
        assert!(!table.critical_check(30.0, &moderate).triggered);
        assert!(table.danger_zone_check(30.0, &moderate).triggered);
        assert!(!table.danger_zone_check(3.0, &moderate).triggered);
    }

    #[test]
    fn test_adult_spo2_danger_window() {
        let table = ThresholdTable::builtin();
        let in_window = Vitals {
            spo2: Some(92.0),
            ..vitals()
        };
        assert!(table.danger_zone_check(50.0, &in_window).triggered);

        // Below the window belongs to the critical check, not this one.
        let below_window = Vitals {
            spo2: Some(88.0),
            ..vitals()
        };
        assert!(!table.danger_zone_check(50.0, &below_window).triggered);
        assert!(table.critical_check(50.0, &below_window).triggered);

        let normal = Vitals {
            spo2: Some(96.0),
            ..vitals()
        };
        assert!(!table.danger_zone_check(50.0, &normal).triggered);
    }

    #[test]
    fn test_pediatric_spo2_danger_has_no_floor() {
        let table = ThresholdTable::builtin();
        let v = Vitals {
            spo2: Some(88.0),
            ..vitals()
        };
        assert!(table.danger_zone_check(4.0, &v).triggered);
    }

    #[test]
    fn test_danger_reasons_name_the_direction() {
        let table = ThresholdTable::builtin();
        let v = Vitals {
            hr: Some(110),
            sbp: Some(85),
            ..vitals()
        };
        let findings = table.danger_zone_check(60.0, &v);
        assert_eq!(findings.reasons.len(), 2);
        assert!(findings.reasons[0].starts_with("تسارع النبض"));
        assert!(findings.reasons[1].starts_with("انخفاض الضغط"));
    }

    #[test]
    fn test_builtin_table_validates() {
        assert!(ThresholdTable::builtin().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_pair() {
        let mut table = ThresholdTable::builtin();
        table.critical_row_mut(AgeBand::Adult).hr = Limits {
            low: Some(150.0),
            high: Some(40.0),
        };
        assert!(matches!(
            table.validate(),
            Err(ProtocolError::InvalidThreshold { .. })
        ));
    }
}
