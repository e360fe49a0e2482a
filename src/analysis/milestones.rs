//! First age at which a projected balance reaches fixed dollar targets

use serde::{Deserialize, Serialize};

use crate::assumptions::PolicyConstants;
use crate::projection::{AccountProfile, GrowthConfig, GrowthEngine, GrowthResult, LifetimeOptions, YearlySnapshot};

/// Default targets, smallest first
pub const DEFAULT_MILESTONES: [(f64, &str); 7] = [
    (10_000.0, "$10K"),
    (25_000.0, "$25K"),
    (50_000.0, "$50K"),
    (100_000.0, "$100K"),
    (250_000.0, "$250K"),
    (500_000.0, "$500K"),
    (1_000_000.0, "$1M"),
];

/// A dollar target and where (if anywhere) it was first reached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub target: f64,
    pub label: String,
    pub age_reached: Option<u32>,
    pub year_reached: Option<i32>,
}

impl Milestone {
    pub fn is_reached(&self) -> bool {
        self.age_reached.is_some()
    }
}

/// Annotate each target with the first snapshot whose end balance reaches it.
///
/// Balances are not assumed to be monotonic: with fees and a weak or negative
/// return they can fall, so each target gets its own linear scan.
pub fn detect_milestones(snapshots: &[YearlySnapshot], targets: &[(f64, &str)]) -> Vec<Milestone> {
    targets
        .iter()
        .map(|&(target, label)| {
            let hit = snapshots.iter().find(|s| s.end_balance >= target);
            Milestone {
                target,
                label: label.to_string(),
                age_reached: hit.map(|s| s.age),
                year_reached: hit.map(|s| s.year),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneInput {
    pub monthly_contribution: f64,
    pub annual_return: f64,
    pub pilot_deposit: f64,
    pub birth_year: i32,
    /// Continue past conversion to the retirement age
    pub lifetime: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneReport {
    pub growth: GrowthResult,
    pub milestones: Vec<Milestone>,
}

/// Project from birth and annotate the default milestones
pub fn calculate_milestones(constants: &PolicyConstants, input: &MilestoneInput) -> MilestoneReport {
    let profile = AccountProfile::flat(
        input.birth_year,
        input.pilot_deposit,
        input.monthly_contribution,
        0,
        constants.conversion_age,
    );
    let config = GrowthConfig {
        annual_return: input.annual_return,
        start_age: 0,
        end_age: constants.conversion_age,
        enhancements: None,
    };
    let engine = GrowthEngine::new(constants.clone(), config);

    let growth = if input.lifetime {
        engine.project_lifetime(&profile, &LifetimeOptions::default())
    } else {
        engine.project_account(&profile)
    };
    let milestones = detect_milestones(&growth.snapshots, &DEFAULT_MILESTONES);

    MilestoneReport { growth, milestones }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(age: u32, end_balance: f64) -> YearlySnapshot {
        YearlySnapshot {
            end_balance,
            ..YearlySnapshot::new(age, 2025 + age as i32)
        }
    }

    #[test]
    fn test_first_crossing_not_peak() {
        let snapshots = vec![
            snapshot(1, 8_000.0),
            snapshot(2, 10_500.0),
            snapshot(3, 9_000.0),
            snapshot(4, 12_000.0),
        ];
        let milestones = detect_milestones(&snapshots, &[(10_000.0, "$10K"), (20_000.0, "$20K")]);

        assert_eq!(milestones[0].age_reached, Some(2));
        assert_eq!(milestones[0].year_reached, Some(2027));
        assert!(!milestones[1].is_reached());
        assert_eq!(milestones[1].year_reached, None);
    }

    #[test]
    fn test_exact_target_counts_as_reached() {
        let snapshots = vec![snapshot(1, 9_999.99), snapshot(2, 10_000.0)];
        let milestones = detect_milestones(&snapshots, &[(10_000.0, "$10K")]);
        assert_eq!(milestones[0].age_reached, Some(2));
    }

    #[test]
    fn test_lifetime_milestones_are_ordered() {
        let constants = PolicyConstants::default();
        let report = calculate_milestones(
            &constants,
            &MilestoneInput {
                monthly_contribution: 250.0,
                annual_return: 0.08,
                pilot_deposit: 1_000.0,
                birth_year: 2025,
                lifetime: true,
            },
        );

        assert_eq!(report.milestones.len(), DEFAULT_MILESTONES.len());
        assert_eq!(report.growth.snapshots.len(), 65);

        let reached: Vec<u32> = report.milestones.iter().filter_map(|m| m.age_reached).collect();
        assert!(reached.len() >= 5);
        for pair in reached.windows(2) {
            assert!(pair[0] <= pair[1]);
        }

        let hundred_k = report.milestones.iter().find(|m| m.label == "$100K").unwrap();
        let quarter_m = report.milestones.iter().find(|m| m.label == "$250K").unwrap();
        if let (Some(a), Some(b)) = (hundred_k.age_reached, quarter_m.age_reached) {
            assert!(a <= b);
        }
    }

    #[test]
    fn test_to_eighteen_leaves_large_targets_unreached() {
        let constants = PolicyConstants::default();
        let report = calculate_milestones(
            &constants,
            &MilestoneInput {
                monthly_contribution: 100.0,
                annual_return: 0.08,
                pilot_deposit: 1_000.0,
                birth_year: 2025,
                lifetime: false,
            },
        );

        assert_eq!(report.growth.snapshots.len(), 18);
        let one_million = report.milestones.last().unwrap();
        assert_eq!(one_million.label, "$1M");
        assert!(!one_million.is_reached());
    }
}
