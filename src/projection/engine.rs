//! Core growth engine for yearly account projections

use log::debug;

use crate::assumptions::PolicyConstants;
use crate::money::round_cents;
use super::phases::AccountProfile;
use super::snapshots::{ContributionBreakdown, GrowthResult, YearlySnapshot};
use super::state::{AccountState, ContributionSplit, YearFlows};

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthConfig {
    /// Nominal annual return (decimal fraction, may be zero or negative)
    pub annual_return: f64,

    /// First age simulated
    pub start_age: u32,

    /// Age the run stops at (exclusive)
    pub end_age: u32,

    /// Employer money, indexed cap, extra seed and fund fees
    pub enhancements: Option<EnhancedOptions>,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            annual_return: 0.08,
            start_age: 0,
            end_age: 18,
            enhancements: None,
        }
    }
}

/// Optional features layered on the basic phased projection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnhancedOptions {
    /// Grow the contribution limit with inflation
    pub inflation_indexed_cap: bool,

    /// Employer contribution requested per year, before caps
    pub employer_annual_contribution: f64,

    /// Extra one-time seed on top of the pilot deposit
    pub supplemental_seed: f64,

    /// Annual fund expense ratio deducted from returns
    pub expense_ratio: f64,
}

/// Settings for the post-majority leg of a lifetime projection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LifetimeOptions {
    /// Flat annual contribution after conversion (not subject to the account cap)
    pub post_majority_contribution: f64,

    /// Last age simulated (exclusive); defaults to the policy retirement age
    pub retirement_age: Option<u32>,

    /// Return after conversion; defaults to the configured annual return
    pub post_majority_return: Option<f64>,
}

/// Main growth engine
pub struct GrowthEngine {
    constants: PolicyConstants,
    config: GrowthConfig,
}

impl GrowthEngine {
    /// Create a new growth engine with given constants and config
    pub fn new(constants: PolicyConstants, config: GrowthConfig) -> Self {
        Self { constants, config }
    }

    pub fn constants(&self) -> &PolicyConstants {
        &self.constants
    }

    pub fn config(&self) -> &GrowthConfig {
        &self.config
    }

    /// Run the contribution phase from `start_age` to `end_age`
    pub fn project_account(&self, profile: &AccountProfile) -> GrowthResult {
        let seed = self.seed(profile);
        let mut result = GrowthResult::new(seed);
        let mut state = AccountState::new(self.config.start_age, seed);

        debug!(
            "Projecting account born {} from age {} to {} at {:.4} return",
            profile.birth_year, self.config.start_age, self.config.end_age, self.config.annual_return
        );

        self.run_contribution_phase(profile, &mut state, &mut result, self.config.end_age);
        state.convert();
        self.finish(&state, &mut result);

        result
    }

    /// Run the contribution phase up to the conversion age, then keep compounding
    /// under post-majority rules until the retirement age
    pub fn project_lifetime(&self, profile: &AccountProfile, options: &LifetimeOptions) -> GrowthResult {
        let seed = self.seed(profile);
        let mut result = GrowthResult::new(seed);
        let mut state = AccountState::new(self.config.start_age, seed);

        let conversion_age = self.constants.conversion_age;
        let retirement_age = options.retirement_age.unwrap_or(self.constants.retirement_age);
        let post_return = options.post_majority_return.unwrap_or(self.config.annual_return);
        let expense_ratio = self.expense_ratio();

        debug!(
            "Projecting lifetime for account born {} from age {} to {} (conversion at {})",
            profile.birth_year, self.config.start_age, retirement_age, conversion_age
        );

        // Phase 1: contribution rules up to conversion
        self.run_contribution_phase(profile, &mut state, &mut result, conversion_age);
        state.convert();

        // Phase 2: flat contribution, same per-year step
        while state.age < retirement_age {
            let year = state.calendar_year(profile);
            let split = ContributionSplit::personal_only(options.post_majority_contribution);
            let flows = state.advance_year(split, post_return, expense_ratio);
            result.add_snapshot(record_snapshot(&flows, &state, year, None));
        }

        self.finish(&state, &mut result);
        result
    }

    /// Phase-one loop shared by both entry points
    fn run_contribution_phase(
        &self,
        profile: &AccountProfile,
        state: &mut AccountState,
        result: &mut GrowthResult,
        end_age: u32,
    ) {
        let expense_ratio = self.expense_ratio();
        let indexed = self.indexed_cap();

        while state.age < end_age {
            let year = state.calendar_year(profile);
            let cap = self.constants.contribution_cap_for_year(year, indexed);
            let split = self.contribution_split(profile, state.age, cap);

            let flows = state.advance_year(split, self.config.annual_return, expense_ratio);
            let reported_cap = if indexed { Some(cap) } else { None };
            result.add_snapshot(record_snapshot(&flows, state, year, reported_cap));
        }
    }

    /// Split a year's contribution between employer and personal money.
    ///
    /// Employer money goes in first, limited by the employer cap and the annual
    /// cap; personal money fills what remains of the annual cap.
    fn contribution_split(&self, profile: &AccountProfile, age: u32, cap: f64) -> ContributionSplit {
        let requested = profile.schedule.annual_amount_for_age(age);

        let employer_requested = self
            .config
            .enhancements
            .as_ref()
            .map(|e| e.employer_annual_contribution)
            .unwrap_or(0.0);

        if employer_requested <= 0.0 {
            return ContributionSplit::personal_only(requested.min(cap));
        }

        let employer = employer_requested
            .min(self.constants.employer_contribution_cap)
            .min(cap);
        let personal = requested.min(cap - employer);

        ContributionSplit { personal, employer }
    }

    /// Fill in the final balance and, for enhanced runs, the contribution breakdown
    fn finish(&self, state: &AccountState, result: &mut GrowthResult) {
        result.final_balance = round_cents(state.balance);

        if self.config.enhancements.is_some() {
            let total_personal: f64 = result.snapshots.iter().map(|s| s.personal_contribution).sum();
            let total_employer: f64 = result.snapshots.iter().map(|s| s.employer_contribution).sum();
            let at_conversion = state.balance_at_conversion.unwrap_or(state.balance);

            result.breakdown = Some(ContributionBreakdown {
                total_personal: round_cents(total_personal),
                total_employer: round_cents(total_employer),
                tax_free_basis_at_conversion: round_cents(state.tax_free_basis),
                taxable_at_conversion: round_cents(at_conversion - state.tax_free_basis),
            });
        }
    }

    fn seed(&self, profile: &AccountProfile) -> f64 {
        let supplemental = self
            .config
            .enhancements
            .as_ref()
            .map(|e| e.supplemental_seed)
            .unwrap_or(0.0);
        profile.pilot_deposit + supplemental
    }

    fn expense_ratio(&self) -> f64 {
        self.config
            .enhancements
            .as_ref()
            .map(|e| e.expense_ratio)
            .unwrap_or(0.0)
    }

    fn indexed_cap(&self) -> bool {
        self.config
            .enhancements
            .as_ref()
            .map(|e| e.inflation_indexed_cap)
            .unwrap_or(false)
    }
}

/// Round one year's flows into a snapshot. `state` has already advanced, so
/// its age is the age reached at year end.
fn record_snapshot(
    flows: &YearFlows,
    state: &AccountState,
    contribution_year: i32,
    effective_cap: Option<f64>,
) -> YearlySnapshot {
    YearlySnapshot {
        start_balance: round_cents(flows.start_balance),
        contributions: round_cents(flows.contribution.total()),
        personal_contribution: round_cents(flows.contribution.personal),
        employer_contribution: round_cents(flows.contribution.employer),
        earnings: round_cents(flows.earnings),
        expenses: round_cents(flows.expenses),
        end_balance: round_cents(flows.end_balance),
        effective_cap,
        tax_free_basis: round_cents(state.tax_free_basis),
        ..YearlySnapshot::new(state.age, contribution_year + 1)
    }
}
