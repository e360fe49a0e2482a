//! What a later start costs compared with starting earlier

use serde::{Deserialize, Serialize};

use crate::assumptions::PolicyConstants;
use crate::money::{round_cents, safe_ratio};
use crate::projection::{AccountProfile, GrowthConfig, GrowthEngine, GrowthResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostOfWaitingInput {
    /// Start age of the first (usually earlier) scenario
    pub start_age_early: u32,
    /// Start age of the second (usually later) scenario
    pub start_age_late: u32,
    pub monthly_contribution: f64,
    pub annual_return: f64,
    pub pilot_deposit: f64,
    pub birth_year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostOfWaitingResult {
    pub early: GrowthResult,
    pub late: GrowthResult,
    /// `early.final_balance - late.final_balance`
    pub difference: f64,
    /// Difference as a percentage of the early final balance
    pub percent_lost: f64,
}

/// Run two basic projections to the conversion age that differ only in start age
pub fn calculate_cost_of_waiting(
    constants: &PolicyConstants,
    input: &CostOfWaitingInput,
) -> CostOfWaitingResult {
    let run = |start_age: u32| {
        let profile = AccountProfile::flat(
            input.birth_year,
            input.pilot_deposit,
            input.monthly_contribution,
            start_age,
            constants.conversion_age,
        );
        let config = GrowthConfig {
            annual_return: input.annual_return,
            start_age,
            end_age: constants.conversion_age,
            enhancements: None,
        };
        GrowthEngine::new(constants.clone(), config).project_account(&profile)
    };

    let early = run(input.start_age_early);
    let late = run(input.start_age_late);

    let difference = round_cents(early.final_balance - late.final_balance);
    let percent_lost = safe_ratio(difference, early.final_balance) * 100.0;

    CostOfWaitingResult {
        early,
        late,
        difference,
        percent_lost,
    }
}
