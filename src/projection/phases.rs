//! Contribution phases and the account profile they belong to

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// A flat monthly contribution applied to ages in `[from_age, to_age)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContributionPhase {
    pub from_age: u32,
    pub to_age: u32,
    pub monthly_amount: f64,
}

impl ContributionPhase {
    pub fn new(from_age: u32, to_age: u32, monthly_amount: f64) -> Self {
        Self {
            from_age,
            to_age,
            monthly_amount,
        }
    }

    pub fn covers(&self, age: u32) -> bool {
        age >= self.from_age && age < self.to_age
    }

    pub fn annual_amount(&self) -> f64 {
        self.monthly_amount * 12.0
    }
}

/// Ordered list of contribution phases.
///
/// Lookup is first match wins: when phases overlap, the earliest phase in the
/// list that covers an age decides that year's contribution. Ages no phase
/// covers contribute nothing. Use [`ContributionSchedule::validated`] to reject
/// overlapping or unsorted phases up front instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContributionSchedule {
    phases: Vec<ContributionPhase>,
}

impl ContributionSchedule {
    /// Accept phases as given, with first-match lookup
    pub fn new(phases: Vec<ContributionPhase>) -> Self {
        Self { phases }
    }

    /// Accept phases only if each range is non-empty, amounts are non-negative
    /// and phases are sorted without overlap
    pub fn validated(phases: Vec<ContributionPhase>) -> Result<Self> {
        for (i, phase) in phases.iter().enumerate() {
            if phase.from_age >= phase.to_age {
                return Err(EngineError::InvalidSchedule(format!(
                    "phase {} has empty age range [{}, {})",
                    i, phase.from_age, phase.to_age
                )));
            }
            if phase.monthly_amount < 0.0 || !phase.monthly_amount.is_finite() {
                return Err(EngineError::InvalidSchedule(format!(
                    "phase {} has invalid monthly amount {}",
                    i, phase.monthly_amount
                )));
            }
        }

        for (i, pair) in phases.windows(2).enumerate() {
            if pair[1].from_age < pair[0].to_age {
                return Err(EngineError::InvalidSchedule(format!(
                    "phase {} [{}, {}) overlaps or precedes phase {} [{}, {})",
                    i + 1,
                    pair[1].from_age,
                    pair[1].to_age,
                    i,
                    pair[0].from_age,
                    pair[0].to_age
                )));
            }
        }

        Ok(Self { phases })
    }

    /// Single phase covering `[from_age, to_age)`
    pub fn flat(from_age: u32, to_age: u32, monthly_amount: f64) -> Self {
        Self::new(vec![ContributionPhase::new(from_age, to_age, monthly_amount)])
    }

    /// Requested (uncapped) annual contribution for an age
    pub fn annual_amount_for_age(&self, age: u32) -> f64 {
        self.phases
            .iter()
            .find(|phase| phase.covers(age))
            .map(ContributionPhase::annual_amount)
            .unwrap_or(0.0)
    }

    pub fn phases(&self) -> &[ContributionPhase] {
        &self.phases
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }
}

/// Who the account belongs to and what goes into it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountProfile {
    /// Calendar year the child was born
    pub birth_year: i32,

    /// One-time seed deposit credited at the start of the projection
    pub pilot_deposit: f64,

    /// Personal contribution phases
    pub schedule: ContributionSchedule,
}

impl AccountProfile {
    pub fn new(birth_year: i32, pilot_deposit: f64, schedule: ContributionSchedule) -> Self {
        Self {
            birth_year,
            pilot_deposit,
            schedule,
        }
    }

    /// Profile with one flat monthly contribution over `[start_age, end_age)`
    pub fn flat(
        birth_year: i32,
        pilot_deposit: f64,
        monthly_contribution: f64,
        start_age: u32,
        end_age: u32,
    ) -> Self {
        Self::new(
            birth_year,
            pilot_deposit,
            ContributionSchedule::flat(start_age, end_age, monthly_contribution),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_matching_phase_wins() {
        let schedule = ContributionSchedule::new(vec![
            ContributionPhase::new(0, 10, 100.0),
            ContributionPhase::new(5, 18, 300.0),
        ]);

        assert_eq!(schedule.annual_amount_for_age(4), 1_200.0);
        // Overlap: earlier phase decides
        assert_eq!(schedule.annual_amount_for_age(7), 1_200.0);
        assert_eq!(schedule.annual_amount_for_age(12), 3_600.0);
        assert_eq!(schedule.annual_amount_for_age(18), 0.0);
    }

    #[test]
    fn test_uncovered_age_contributes_nothing() {
        let schedule = ContributionSchedule::new(vec![
            ContributionPhase::new(0, 5, 50.0),
            ContributionPhase::new(10, 18, 50.0),
        ]);
        assert_eq!(schedule.annual_amount_for_age(7), 0.0);
        assert_eq!(ContributionSchedule::default().annual_amount_for_age(0), 0.0);
    }

    #[test]
    fn test_validated_accepts_disjoint_sorted_phases() {
        let schedule = ContributionSchedule::validated(vec![
            ContributionPhase::new(0, 5, 50.0),
            ContributionPhase::new(5, 13, 100.0),
            ContributionPhase::new(13, 18, 250.0),
        ])
        .unwrap();
        assert_eq!(schedule.phases().len(), 3);
    }

    #[test]
    fn test_validated_rejects_overlap_and_empty_ranges() {
        let overlap = ContributionSchedule::validated(vec![
            ContributionPhase::new(0, 10, 100.0),
            ContributionPhase::new(5, 18, 300.0),
        ]);
        assert!(matches!(overlap, Err(EngineError::InvalidSchedule(_))));

        let empty = ContributionSchedule::validated(vec![ContributionPhase::new(10, 10, 100.0)]);
        assert!(matches!(empty, Err(EngineError::InvalidSchedule(_))));

        let negative = ContributionSchedule::validated(vec![ContributionPhase::new(0, 18, -5.0)]);
        assert!(negative.is_err());
    }
}
