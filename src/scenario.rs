//! Scenario runner for batch projections
//!
//! Pre-loads assumptions once, then runs many projections with different
//! profiles or configurations without re-reading reference files.

use std::path::Path;

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::error::Result;
use crate::projection::{
    AccountProfile, EnhancedOptions, GrowthConfig, GrowthEngine, GrowthResult, GrowthSummary,
    LifetimeOptions,
};

/// One row of a scenarios CSV
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub scenario_id: u32,
    pub birth_year: i32,
    pub pilot_deposit: f64,
    pub monthly_contribution: f64,
    pub annual_return: f64,
    pub start_age: u32,
    pub retirement_age: u32,
    #[serde(default)]
    pub employer_annual: f64,
    #[serde(default)]
    pub expense_ratio: f64,
}

impl Scenario {
    /// Flat contribution from `start_age` up to the conversion age
    pub fn profile(&self, conversion_age: u32) -> AccountProfile {
        AccountProfile::flat(
            self.birth_year,
            self.pilot_deposit,
            self.monthly_contribution,
            self.start_age,
            conversion_age,
        )
    }

    pub fn config(&self, conversion_age: u32) -> GrowthConfig {
        let enhanced = self.employer_annual > 0.0 || self.expense_ratio > 0.0;
        GrowthConfig {
            annual_return: self.annual_return,
            start_age: self.start_age,
            end_age: conversion_age,
            enhancements: enhanced.then(|| EnhancedOptions {
                employer_annual_contribution: self.employer_annual,
                expense_ratio: self.expense_ratio,
                ..EnhancedOptions::default()
            }),
        }
    }

    pub fn lifetime_options(&self) -> LifetimeOptions {
        LifetimeOptions {
            retirement_age: Some(self.retirement_age),
            ..LifetimeOptions::default()
        }
    }
}

/// Load scenario rows from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut scenarios = Vec::new();

    for result in reader.deserialize() {
        let scenario: Scenario = result?;
        scenarios.push(scenario);
    }

    info!("Loaded {} scenarios", scenarios.len());
    Ok(scenarios)
}

/// Summary of a lifetime projection for one scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub scenario_id: u32,
    pub summary: GrowthSummary,
}

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
///
/// for rate in [0.06, 0.07, 0.08] {
///     let config = GrowthConfig { annual_return: rate, ..GrowthConfig::default() };
///     let result = runner.run(&profile, config);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_assumptions: Assumptions,
}

impl ScenarioRunner {
    /// Create runner with built-in assumptions
    pub fn new() -> Self {
        Self {
            base_assumptions: Assumptions::builtin(),
        }
    }

    /// Create runner by loading assumptions from data/reference/
    pub fn from_csv() -> Result<Self> {
        Ok(Self {
            base_assumptions: Assumptions::from_csv()?,
        })
    }

    /// Create runner from a specific reference directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        Ok(Self {
            base_assumptions: Assumptions::from_csv_path(path)?,
        })
    }

    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            base_assumptions: assumptions,
        }
    }

    fn engine(&self, config: GrowthConfig) -> GrowthEngine {
        GrowthEngine::new(self.base_assumptions.constants.clone(), config)
    }

    /// Contribution-phase projection for a single profile
    pub fn run(&self, profile: &AccountProfile, config: GrowthConfig) -> GrowthResult {
        self.engine(config).project_account(profile)
    }

    /// Lifetime projection for a single profile
    pub fn run_lifetime(
        &self,
        profile: &AccountProfile,
        config: GrowthConfig,
        options: &LifetimeOptions,
    ) -> GrowthResult {
        self.engine(config).project_lifetime(profile, options)
    }

    /// Project many profiles with the same config in parallel
    pub fn run_batch(&self, profiles: &[AccountProfile], config: GrowthConfig) -> Vec<GrowthResult> {
        let engine = self.engine(config);
        profiles.par_iter().map(|p| engine.project_account(p)).collect()
    }

    /// Run several configs for a single profile
    pub fn run_scenarios(&self, profile: &AccountProfile, configs: &[GrowthConfig]) -> Vec<GrowthResult> {
        configs
            .iter()
            .map(|config| self.engine(config.clone()).project_account(profile))
            .collect()
    }

    /// Lifetime projections for scenario rows, in parallel, keeping input order
    pub fn run_rows(&self, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
        let constants = &self.base_assumptions.constants;
        let conversion_age = constants.conversion_age;

        scenarios
            .par_iter()
            .map(|scenario| {
                let result = self.run_lifetime(
                    &scenario.profile(conversion_age),
                    scenario.config(conversion_age),
                    &scenario.lifetime_options(),
                );
                ScenarioOutcome {
                    scenario_id: scenario.scenario_id,
                    summary: result.summary(conversion_age),
                }
            })
            .collect()
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.base_assumptions
    }

    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.base_assumptions
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> AccountProfile {
        AccountProfile::flat(2025, 1_000.0, 100.0, 0, 18)
    }

    #[test]
    fn test_run_scenarios_higher_return_grows_more() {
        let runner = ScenarioRunner::new();

        let configs: Vec<_> = [0.04, 0.06, 0.08]
            .iter()
            .map(|&rate| GrowthConfig {
                annual_return: rate,
                ..GrowthConfig::default()
            })
            .collect();

        let results = runner.run_scenarios(&profile(), &configs);
        assert_eq!(results.len(), 3);
        assert!(results[2].final_balance > results[0].final_balance);
    }

    #[test]
    fn test_batch_matches_single_runs() {
        let runner = ScenarioRunner::new();
        let profiles = vec![profile(), AccountProfile::flat(2026, 1_000.0, 250.0, 0, 18)];

        let batch = runner.run_batch(&profiles, GrowthConfig::default());
        for (p, r) in profiles.iter().zip(&batch) {
            assert_eq!(&runner.run(p, GrowthConfig::default()), r);
        }
    }

    #[test]
    fn test_assumption_overrides_flow_into_runs() {
        let mut runner = ScenarioRunner::new();
        runner.assumptions_mut().constants.annual_contribution_cap = 1_000.0;

        let result = runner.run(&AccountProfile::flat(2025, 0.0, 500.0, 0, 18), GrowthConfig::default());
        assert!(result.snapshots.iter().all(|s| s.contributions <= 1_000.0));
    }

    #[test]
    fn test_shipped_scenarios_run_to_retirement() {
        let scenarios = load_scenarios("data/scenarios.csv").expect("scenarios.csv");
        assert!(!scenarios.is_empty());

        let runner = ScenarioRunner::new();
        let outcomes = runner.run_rows(&scenarios);

        assert_eq!(outcomes.len(), scenarios.len());
        for (scenario, outcome) in scenarios.iter().zip(&outcomes) {
            assert_eq!(outcome.scenario_id, scenario.scenario_id);
            assert_eq!(outcome.summary.final_age, Some(scenario.retirement_age));
            assert!(outcome.summary.balance_at_conversion.is_some());
        }
    }
}
