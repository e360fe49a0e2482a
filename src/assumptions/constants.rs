//! Program policy constants: contribution limits, seed money, fee caps and
//! withdrawal rules

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::money::round_to_nearest;

/// Indexed limits are published in whole $50 steps
pub const CAP_ROUNDING_STEP: f64 = 50.0;

/// Policy values that change with legislation, passed explicitly to every
/// calculation rather than read from global state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConstants {
    /// Maximum combined annual contribution before age 18
    pub annual_contribution_cap: f64,

    /// Maximum annual employer contribution
    pub employer_contribution_cap: f64,

    /// Expense ratio assumed when the caller does not pick a fund
    pub default_expense_ratio: f64,

    /// Highest expense ratio an eligible fund may charge
    pub max_fund_expense_ratio: f64,

    /// Inflation rate used to index the contribution cap
    pub cap_inflation_rate: f64,

    /// First calendar year the cap is indexed from
    pub inflation_index_start_year: i32,

    /// One-time federal pilot deposit
    pub pilot_deposit: f64,

    /// First birth year that receives the pilot deposit
    pub pilot_first_birth_year: i32,

    /// Last birth year that receives the pilot deposit
    pub pilot_last_birth_year: i32,

    /// Supplemental philanthropic grant for eligible children
    pub supplemental_grant: f64,

    /// Age at which the account converts to IRA rules
    pub conversion_age: u32,

    /// Default horizon for lifetime projections
    pub retirement_age: u32,

    /// Penalty applied to withdrawals before `penalty_free_age`
    pub early_withdrawal_penalty_rate: f64,

    /// Age from which withdrawals are penalty free
    pub penalty_free_age: f64,
}

impl Default for PolicyConstants {
    fn default() -> Self {
        Self {
            annual_contribution_cap: 5_000.0,
            employer_contribution_cap: 2_500.0,
            default_expense_ratio: 0.0003,
            max_fund_expense_ratio: 0.001,
            cap_inflation_rate: 0.025,
            inflation_index_start_year: 2027,
            pilot_deposit: 1_000.0,
            pilot_first_birth_year: 2025,
            pilot_last_birth_year: 2028,
            supplemental_grant: 250.0,
            conversion_age: 18,
            retirement_age: 65,
            early_withdrawal_penalty_rate: 0.10,
            penalty_free_age: 59.5,
        }
    }
}

impl PolicyConstants {
    /// Contribution limit in force for a calendar year.
    ///
    /// Indexed limits compound the nominal cap at `cap_inflation_rate` for each
    /// year past `inflation_index_start_year`, then round to the nearest $50.
    pub fn contribution_cap_for_year(&self, calendar_year: i32, indexed: bool) -> f64 {
        if !indexed {
            return self.annual_contribution_cap;
        }
        let elapsed = (calendar_year - self.inflation_index_start_year).max(0);
        let grown = self.annual_contribution_cap * (1.0 + self.cap_inflation_rate).powi(elapsed);
        round_to_nearest(grown, CAP_ROUNDING_STEP)
    }

    /// Pilot deposit a child born in `birth_year` receives; zero outside the
    /// eligible birth years
    pub fn pilot_deposit_for(&self, birth_year: i32) -> f64 {
        if (self.pilot_first_birth_year..=self.pilot_last_birth_year).contains(&birth_year) {
            self.pilot_deposit
        } else {
            0.0
        }
    }

    /// Whether a withdrawal at `age` incurs the early-withdrawal penalty
    pub fn is_early_withdrawal(&self, age: f64) -> bool {
        age < self.penalty_free_age
    }

    /// Override a single value by its CSV key
    pub fn set(&mut self, key: &str, raw: &str) -> Result<()> {
        let raw = raw.trim();
        let float = || {
            raw.parse::<f64>()
                .map_err(|e| EngineError::Parse(format!("{key}={raw}: {e}")))
        };
        let year = || {
            raw.parse::<i32>()
                .map_err(|e| EngineError::Parse(format!("{key}={raw}: {e}")))
        };
        let age = || {
            raw.parse::<u32>()
                .map_err(|e| EngineError::Parse(format!("{key}={raw}: {e}")))
        };

        match key.trim() {
            "annual_contribution_cap" => self.annual_contribution_cap = float()?,
            "employer_contribution_cap" => self.employer_contribution_cap = float()?,
            "default_expense_ratio" => self.default_expense_ratio = float()?,
            "max_fund_expense_ratio" => self.max_fund_expense_ratio = float()?,
            "cap_inflation_rate" => self.cap_inflation_rate = float()?,
            "inflation_index_start_year" => self.inflation_index_start_year = year()?,
            "pilot_deposit" => self.pilot_deposit = float()?,
            "pilot_first_birth_year" => self.pilot_first_birth_year = year()?,
            "pilot_last_birth_year" => self.pilot_last_birth_year = year()?,
            "supplemental_grant" => self.supplemental_grant = float()?,
            "conversion_age" => self.conversion_age = age()?,
            "retirement_age" => self.retirement_age = age()?,
            "early_withdrawal_penalty_rate" => self.early_withdrawal_penalty_rate = float()?,
            "penalty_free_age" => self.penalty_free_age = float()?,
            other => return Err(EngineError::UnknownConstant(other.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominal_cap_ignores_year() {
        let constants = PolicyConstants::default();
        assert_eq!(constants.contribution_cap_for_year(2040, false), 5_000.0);
    }

    #[test]
    fn test_indexed_cap_before_start_year_is_nominal() {
        let constants = PolicyConstants::default();
        assert_eq!(constants.contribution_cap_for_year(2025, true), 5_000.0);
        assert_eq!(constants.contribution_cap_for_year(2027, true), 5_000.0);
    }

    #[test]
    fn test_indexed_cap_rounds_to_fifty() {
        let constants = PolicyConstants::default();
        // 5000 * 1.025 = 5125 -> 5150
        assert_eq!(constants.contribution_cap_for_year(2028, true), 5_150.0);
        // 5000 * 1.025^2 = 5253.125 -> 5250
        assert_eq!(constants.contribution_cap_for_year(2029, true), 5_250.0);

        for year in 2028..2060 {
            let cap = constants.contribution_cap_for_year(year, true);
            assert_eq!(cap % CAP_ROUNDING_STEP, 0.0);
            assert!(cap >= constants.contribution_cap_for_year(year - 1, true));
        }
    }

    #[test]
    fn test_penalty_boundary() {
        let constants = PolicyConstants::default();
        assert!(constants.is_early_withdrawal(59.4));
        assert!(!constants.is_early_withdrawal(59.5));
    }

    #[test]
    fn test_set_overrides_and_rejects_unknown() {
        let mut constants = PolicyConstants::default();
        constants.set("pilot_deposit", " 1500 ").unwrap();
        constants.set("inflation_index_start_year", "2030").unwrap();
        assert_eq!(constants.pilot_deposit, 1_500.0);
        assert_eq!(constants.inflation_index_start_year, 2030);

        assert!(matches!(
            constants.set("mystery", "1"),
            Err(EngineError::UnknownConstant(_))
        ));
        assert!(matches!(
            constants.set("pilot_deposit", "lots"),
            Err(EngineError::Parse(_))
        ));
    }

    #[test]
    fn test_pilot_deposit_by_birth_year() {
        let constants = PolicyConstants::default();
        assert_eq!(constants.pilot_deposit_for(2024), 0.0);
        assert_eq!(constants.pilot_deposit_for(2025), 1_000.0);
        assert_eq!(constants.pilot_deposit_for(2028), 1_000.0);
        assert_eq!(constants.pilot_deposit_for(2029), 0.0);
    }

    #[test]
    fn test_out_of_range_integers_are_rejected() {
        let mut constants = PolicyConstants::default();

        assert!(matches!(
            constants.set("conversion_age", "-1"),
            Err(EngineError::Parse(_))
        ));
        assert!(matches!(
            constants.set("retirement_age", "4294967296"),
            Err(EngineError::Parse(_))
        ));
        assert!(matches!(
            constants.set("inflation_index_start_year", "3000000000"),
            Err(EngineError::Parse(_))
        ));
        assert_eq!(constants.conversion_age, 18);
        assert_eq!(constants.retirement_age, 65);
        assert_eq!(constants.inflation_index_start_year, 2027);
    }
}
