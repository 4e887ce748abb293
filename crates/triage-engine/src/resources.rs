//! Anticipated-resource estimation for levels 3–5.
//!
//! ESI differentiates the lower acuity levels by how many diagnostic or
//! therapeutic resources (labs, ECG, imaging, IV medication, suturing...)
//! the presentation is expected to consume. The estimate is an additive
//! score over resource groups: each group fires at most once, no matter how
//! many of its member concepts matched, and there is no upper cap.

use std::collections::BTreeSet;

use triage_types::{ConceptId, Vitals};

use crate::types::{ProtocolError, ProtocolResult};

/// Measured temperature at or above this counts as fever for resource
/// estimation even when no fever phrase appeared in the complaint.
pub const FEVER_TEMP_CUTOFF: f32 = 38.0;

/// One resource group: a set of concepts sharing one anticipated workup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceGroup {
    /// Concepts that imply this workup. A group with several members
    /// (chest pain / cardiac share the ECG-and-troponin workup) still
    /// contributes its weight only once.
    pub concepts: Vec<ConceptId>,
    /// Resources this workup is expected to consume.
    pub weight: u32,
}

/// Builtin resource groups.
const BUILTIN: &[(&[ConceptId], u32)] = &[
    (&[ConceptId::Abdominal], 2),                    // labs + possible imaging
    (&[ConceptId::ChestPain, ConceptId::Cardiac], 2), // ECG + troponin
    (&[ConceptId::Sob], 2),                          // CXR + blood gas
    (&[ConceptId::Trauma], 2),                       // x-ray + possible labs
    (&[ConceptId::Stroke], 2),                       // CT + labs
    (&[ConceptId::Fever], 1),                        // labs
    (&[ConceptId::Laceration], 1),                   // suture tray
    (&[ConceptId::Allergy], 1),                      // IV/IM medication
    (&[ConceptId::Uti], 1),                          // urinalysis
    (&[ConceptId::Burn], 1),                         // wound care
    (&[ConceptId::BiteSting], 1),                    // antivenom/antibiotics
];

/// The resource weight table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceWeights {
    groups: Vec<ResourceGroup>,
}

impl Default for ResourceWeights {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ResourceWeights {
    /// Returns the builtin weight table.
    pub fn builtin() -> Self {
        Self {
            groups: BUILTIN
                .iter()
                .map(|(concepts, weight)| ResourceGroup {
                    concepts: concepts.to_vec(),
                    weight: *weight,
                })
                .collect(),
        }
    }

    /// Builds a weight table from explicit groups.
    ///
    /// # Errors
    /// Fails if any group has no member concepts.
    pub fn from_groups(groups: Vec<ResourceGroup>) -> ProtocolResult<Self> {
        for (index, group) in groups.iter().enumerate() {
            if group.concepts.is_empty() {
                return Err(ProtocolError::EmptyResourceGroup { index });
            }
        }
        Ok(Self { groups })
    }

    /// Estimates the resource count for a tag set and selected vitals.
    ///
    /// Consulted by the classifier only after levels 1 and 2 are ruled out.
    pub fn estimate(&self, tags: &BTreeSet<ConceptId>, vitals: &Vitals) -> u32 {
        let mut total = 0;
        for group in &self.groups {
            if group.concepts.iter().any(|c| tags.contains(c)) {
                total += group.weight;
            }
        }
        // Unreported fever caught by the thermometer still needs labs.
        if !tags.contains(&ConceptId::Fever) {
            if let Some(temp) = vitals.temp {
                if temp >= FEVER_TEMP_CUTOFF {
                    total += self.fever_weight();
                }
            }
        }
        total
    }

    /// Weight of the group containing the fever concept (0 if absent).
    fn fever_weight(&self) -> u32 {
        self.groups
            .iter()
            .find(|g| g.concepts.contains(&ConceptId::Fever))
            .map_or(0, |g| g.weight)
    }

    /// Number of resource groups in the table.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(concepts: &[ConceptId]) -> BTreeSet<ConceptId> {
        concepts.iter().copied().collect()
    }

    #[test]
    fn test_no_tags_no_resources() {
        let weights = ResourceWeights::builtin();
        assert_eq!(weights.estimate(&tags(&[]), &Vitals::default()), 0);
    }

    #[test]
    fn test_single_group_weights() {
        let weights = ResourceWeights::builtin();
        let v = Vitals::default();
        assert_eq!(weights.estimate(&tags(&[ConceptId::Laceration]), &v), 1);
        assert_eq!(weights.estimate(&tags(&[ConceptId::Abdominal]), &v), 2);
        assert_eq!(weights.estimate(&tags(&[ConceptId::Neuro]), &v), 0);
    }

    #[test]
    fn test_groups_are_additive() {
        let weights = ResourceWeights::builtin();
        let v = Vitals::default();
        assert_eq!(
            weights.estimate(&tags(&[ConceptId::Abdominal, ConceptId::Fever]), &v),
            3
        );
        assert_eq!(
            weights.estimate(
                &tags(&[ConceptId::Trauma, ConceptId::Laceration, ConceptId::Burn]),
                &v
            ),
            4
        );
    }

    #[test]
    fn test_chest_and_cardiac_share_one_group() {
        let weights = ResourceWeights::builtin();
        let v = Vitals::default();
        let both = tags(&[ConceptId::ChestPain, ConceptId::Cardiac]);
        assert_eq!(weights.estimate(&both, &v), 2);
        assert_eq!(weights.estimate(&tags(&[ConceptId::Cardiac]), &v), 2);
    }

    #[test]
    fn test_measured_fever_without_fever_phrase() {
        let weights = ResourceWeights::builtin();
        let febrile = Vitals {
            temp: Some(38.6),
            ..Vitals::default()
        };
        assert_eq!(weights.estimate(&tags(&[]), &febrile), 1);

        let afebrile = Vitals {
            temp: Some(37.2),
            ..Vitals::default()
        };
        assert_eq!(weights.estimate(&tags(&[]), &afebrile), 0);
    }

    #[test]
    fn test_fever_phrase_and_thermometer_count_once() {
        let weights = ResourceWeights::builtin();
        let febrile = Vitals {
            temp: Some(39.0),
            ..Vitals::default()
        };
        assert_eq!(weights.estimate(&tags(&[ConceptId::Fever]), &febrile), 1);
    }

    #[test]
    fn test_adding_a_concept_never_decreases_count() {
        let weights = ResourceWeights::builtin();
        let v = Vitals::default();
        let mut current = tags(&[]);
        let mut previous = 0;
        for concept in ConceptId::ALL {
            current.insert(concept);
            let estimate = weights.estimate(&current, &v);
            assert!(estimate >= previous);
            previous = estimate;
        }
    }

    #[test]
    fn test_from_groups_rejects_empty_group() {
        let result = ResourceWeights::from_groups(vec![ResourceGroup {
            concepts: vec![],
            weight: 1,
        }]);
        assert!(matches!(
            result,
            Err(ProtocolError::EmptyResourceGroup { index: 0 })
        ));
    }
}
