//! Value of employer contributions on top of a family's own savings

use serde::{Deserialize, Serialize};

use crate::assumptions::PolicyConstants;
use crate::money::{round_cents, round_places, safe_ratio};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployerMatchInput {
    pub salary: f64,
    pub employer_annual_contribution: f64,
    pub personal_monthly_contribution: f64,
    pub annual_return: f64,
    pub years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployerMatchPoint {
    pub year: u32,
    pub balance_with_employer: f64,
    pub balance_without_employer: f64,
    pub cumulative_employer_contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployerMatchResult {
    pub yearly: Vec<EmployerMatchPoint>,
    pub final_with_employer: f64,
    pub final_without_employer: f64,
    pub difference: f64,
    /// Employer money actually credited per year after caps
    pub capped_employer_contribution: f64,
    /// Employer money excluded from the employee's taxable pay over the run
    pub total_excluded_compensation: f64,
    /// Capped employer contribution as a percentage of salary
    pub compensation_lift_percent: f64,
}

/// Compare the pilot-seeded account with and without employer money.
///
/// Personal money is capped at the annual limit on its own; employer money at
/// the employer cap; the combined amount at the annual limit.
pub fn compare_employer_contribution(
    constants: &PolicyConstants,
    input: &EmployerMatchInput,
) -> EmployerMatchResult {
    let cap = constants.annual_contribution_cap;
    let personal = (input.personal_monthly_contribution * 12.0).min(cap);
    let employer = input
        .employer_annual_contribution
        .min(constants.employer_contribution_cap)
        .max(0.0);
    let combined = (personal + employer).min(cap);
    let growth = 1.0 + input.annual_return;

    let mut with_employer = constants.pilot_deposit;
    let mut without_employer = constants.pilot_deposit;
    let mut yearly = Vec::with_capacity(input.years as usize);

    for year in 1..=input.years {
        with_employer = (with_employer + combined) * growth;
        without_employer = (without_employer + personal) * growth;

        yearly.push(EmployerMatchPoint {
            year,
            balance_with_employer: round_cents(with_employer),
            balance_without_employer: round_cents(without_employer),
            cumulative_employer_contribution: round_cents(employer * year as f64),
        });
    }

    EmployerMatchResult {
        yearly,
        final_with_employer: round_cents(with_employer),
        final_without_employer: round_cents(without_employer),
        difference: round_cents(with_employer - without_employer),
        capped_employer_contribution: round_cents(employer),
        total_excluded_compensation: round_cents(employer * input.years as f64),
        compensation_lift_percent: round_places(safe_ratio(employer, input.salary) * 100.0, 2),
    }
}
