//! Yearly output rows and aggregate results for growth projections

use serde::{Deserialize, Serialize};

use crate::money::round_cents;

/// One simulated year, recorded at the age reached at year end.
/// All money values are rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlySnapshot {
    // Timing
    pub age: u32,
    pub year: i32,

    // Balances and flows
    pub start_balance: f64,
    pub contributions: f64,
    pub personal_contribution: f64,
    pub employer_contribution: f64,
    pub earnings: f64,
    pub expenses: f64,
    pub end_balance: f64,

    // Limits and basis
    /// Contribution limit for the year, only when the limit is inflation indexed
    pub effective_cap: Option<f64>,
    /// Running total of personal (after-tax) contributions
    pub tax_free_basis: f64,
}

impl YearlySnapshot {
    /// Create an empty snapshot for the given age and calendar year
    pub fn new(age: u32, year: i32) -> Self {
        Self {
            age,
            year,
            start_balance: 0.0,
            contributions: 0.0,
            personal_contribution: 0.0,
            employer_contribution: 0.0,
            earnings: 0.0,
            expenses: 0.0,
            end_balance: 0.0,
            effective_cap: None,
            tax_free_basis: 0.0,
        }
    }

    /// Earnings after fund expenses
    pub fn net_earnings(&self) -> f64 {
        round_cents(self.earnings - self.expenses)
    }
}

/// Personal/employer split and conversion-time tax character.
/// Only produced by runs with enhanced options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionBreakdown {
    pub total_personal: f64,
    pub total_employer: f64,
    /// Personal contributions, not taxed again on withdrawal
    pub tax_free_basis_at_conversion: f64,
    /// Everything else in the account at conversion: seed, employer money, earnings
    pub taxable_at_conversion: f64,
}

/// Complete growth projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthResult {
    /// Pilot deposit plus any supplemental seed
    pub seed: f64,

    /// Contributions over the run, excluding the seed
    pub total_contributions: f64,

    /// Gross earnings before fund expenses
    pub total_earnings: f64,

    pub total_expenses: f64,

    pub final_balance: f64,

    /// One row per simulated year, ascending by age
    pub snapshots: Vec<YearlySnapshot>,

    pub breakdown: Option<ContributionBreakdown>,
}

impl GrowthResult {
    pub fn new(seed: f64) -> Self {
        Self {
            seed: round_cents(seed),
            total_contributions: 0.0,
            total_earnings: 0.0,
            total_expenses: 0.0,
            final_balance: round_cents(seed),
            snapshots: Vec::new(),
            breakdown: None,
        }
    }

    /// Add a snapshot, folding its rounded values into the running totals
    pub fn add_snapshot(&mut self, snapshot: YearlySnapshot) {
        self.total_contributions = round_cents(self.total_contributions + snapshot.contributions);
        self.total_earnings = round_cents(self.total_earnings + snapshot.earnings);
        self.total_expenses = round_cents(self.total_expenses + snapshot.expenses);
        self.snapshots.push(snapshot);
    }

    /// Snapshot recorded when `age` was reached, if simulated
    pub fn snapshot_at_age(&self, age: u32) -> Option<&YearlySnapshot> {
        self.snapshots.iter().find(|s| s.age == age)
    }

    /// End balance at `age`; the seed for ages before the first simulated year
    pub fn balance_at_age(&self, age: u32) -> Option<f64> {
        match self.snapshots.first() {
            Some(first) if age + 1 == first.age => Some(first.start_balance),
            _ => self.snapshot_at_age(age).map(|s| s.end_balance),
        }
    }

    /// Difference between the reported final balance and the sum of its parts
    pub fn reconciliation_gap(&self) -> f64 {
        self.final_balance
            - (self.seed + self.total_contributions + self.total_earnings - self.total_expenses)
    }

    /// Get summary statistics
    pub fn summary(&self, conversion_age: u32) -> GrowthSummary {
        GrowthSummary {
            years_simulated: self.snapshots.len() as u32,
            seed: self.seed,
            total_contributions: self.total_contributions,
            total_earnings: self.total_earnings,
            total_expenses: self.total_expenses,
            final_balance: self.final_balance,
            final_age: self.snapshots.last().map(|s| s.age),
            balance_at_conversion: self.snapshot_at_age(conversion_age).map(|s| s.end_balance),
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthSummary {
    pub years_simulated: u32,
    pub seed: f64,
    pub total_contributions: f64,
    pub total_earnings: f64,
    pub total_expenses: f64,
    pub final_balance: f64,
    pub final_age: Option<u32>,
    pub balance_at_conversion: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(age: u32, start: f64, contribution: f64, earnings: f64) -> YearlySnapshot {
        YearlySnapshot {
            start_balance: start,
            contributions: contribution,
            personal_contribution: contribution,
            earnings,
            end_balance: start + contribution + earnings,
            ..YearlySnapshot::new(age, 2025 + age as i32)
        }
    }

    #[test]
    fn test_totals_accumulate_rounded_values() {
        let mut result = GrowthResult::new(1_000.0);
        result.add_snapshot(snapshot(1, 1_000.0, 1_200.0, 176.0));
        result.add_snapshot(snapshot(2, 2_376.0, 1_200.0, 286.08));
        result.final_balance = 3_862.08;

        assert_eq!(result.total_contributions, 2_400.0);
        assert!((result.total_earnings - 462.08).abs() < 1e-9);
        assert!(result.reconciliation_gap().abs() < 0.01);
    }

    #[test]
    fn test_balance_lookup() {
        let mut result = GrowthResult::new(1_000.0);
        result.add_snapshot(snapshot(1, 1_000.0, 0.0, 80.0));
        result.add_snapshot(snapshot(2, 1_080.0, 0.0, 86.4));

        assert_eq!(result.balance_at_age(0), Some(1_000.0));
        assert!((result.balance_at_age(2).unwrap() - 1_166.4).abs() < 1e-9);
        assert_eq!(result.balance_at_age(30), None);

        let summary = result.summary(18);
        assert_eq!(summary.years_simulated, 2);
        assert_eq!(summary.final_age, Some(2));
        assert_eq!(summary.balance_at_conversion, None);
    }
}
