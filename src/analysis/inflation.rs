//! Purchasing power of a low-yield savings balance versus an invested one

use serde::{Deserialize, Serialize};

use crate::money::round_cents;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InflationComparisonInput {
    pub initial_amount: f64,
    pub years: u32,
    pub inflation_rate: f64,
    /// Yield on the savings track
    pub savings_apy: f64,
    /// Return on the invested track
    pub investment_return: f64,
}

/// Both tracks at the end of one year, in nominal and today's dollars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchasingPowerPoint {
    pub year: u32,
    pub savings_nominal: f64,
    pub investment_nominal: f64,
    pub savings_real: f64,
    pub investment_real: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InflationComparison {
    pub yearly: Vec<PurchasingPowerPoint>,
    pub savings_final_nominal: f64,
    pub savings_final_real: f64,
    pub investment_final_nominal: f64,
    pub investment_final_real: f64,
    /// Initial amount minus the savings track's final real value
    pub savings_purchasing_power_lost: f64,
    /// Investment real value minus savings real value
    pub real_advantage: f64,
}

pub fn compare_purchasing_power(input: &InflationComparisonInput) -> InflationComparison {
    let mut savings = input.initial_amount;
    let mut investment = input.initial_amount;
    let mut deflator = 1.0;
    let mut yearly = Vec::with_capacity(input.years as usize);

    for year in 1..=input.years {
        savings *= 1.0 + input.savings_apy;
        investment *= 1.0 + input.investment_return;
        deflator *= 1.0 + input.inflation_rate;

        yearly.push(PurchasingPowerPoint {
            year,
            savings_nominal: round_cents(savings),
            investment_nominal: round_cents(investment),
            savings_real: round_cents(savings / deflator),
            investment_real: round_cents(investment / deflator),
        });
    }

    let savings_real = savings / deflator;
    let investment_real = investment / deflator;

    InflationComparison {
        yearly,
        savings_final_nominal: round_cents(savings),
        savings_final_real: round_cents(savings_real),
        investment_final_nominal: round_cents(investment),
        investment_final_real: round_cents(investment_real),
        savings_purchasing_power_lost: round_cents(input.initial_amount - savings_real),
        real_advantage: round_cents(investment_real - savings_real),
    }
}
