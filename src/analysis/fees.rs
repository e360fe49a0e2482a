//! Expense-ratio leakage: the same savings plan with and without fund fees

use serde::{Deserialize, Serialize};

use crate::money::round_cents;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseLeakageInput {
    pub initial_balance: f64,
    pub annual_contribution: f64,
    pub annual_return: f64,
    pub expense_ratio: f64,
    pub years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeakagePoint {
    pub year: u32,
    pub balance_with_fees: f64,
    pub balance_without_fees: f64,
    pub cumulative_leakage: f64,
}

/// Compound both tracks once a year, contribution first, for `years` years
pub fn calculate_expense_leakage(input: &ExpenseLeakageInput) -> Vec<LeakagePoint> {
    let with_fees_factor = 1.0 + input.annual_return - input.expense_ratio;
    let without_fees_factor = 1.0 + input.annual_return;

    let mut with_fees = input.initial_balance;
    let mut without_fees = input.initial_balance;

    (1..=input.years)
        .map(|year| {
            with_fees = (with_fees + input.annual_contribution) * with_fees_factor;
            without_fees = (without_fees + input.annual_contribution) * without_fees_factor;

            LeakagePoint {
                year,
                balance_with_fees: round_cents(with_fees),
                balance_without_fees: round_cents(without_fees),
                cumulative_leakage: round_cents(without_fees - with_fees),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(expense_ratio: f64) -> ExpenseLeakageInput {
        ExpenseLeakageInput {
            initial_balance: 1_000.0,
            annual_contribution: 5_000.0,
            annual_return: 0.08,
            expense_ratio,
            years: 18,
        }
    }

    #[test]
    fn test_fees_never_help() {
        let points = calculate_expense_leakage(&input(0.005));

        assert_eq!(points.len(), 18);
        for point in &points {
            assert!(point.balance_with_fees <= point.balance_without_fees);
        }
        for pair in points.windows(2) {
            assert!(pair[1].cumulative_leakage >= pair[0].cumulative_leakage);
        }
        assert!(points.last().unwrap().cumulative_leakage > 0.0);
    }

    #[test]
    fn test_zero_expense_ratio_has_no_leakage() {
        let points = calculate_expense_leakage(&input(0.0));
        assert!(points.iter().all(|p| p.cumulative_leakage == 0.0));
    }

    #[test]
    fn test_first_year_values() {
        let points = calculate_expense_leakage(&input(0.01));
        // (1000 + 5000) * 1.07 and (1000 + 5000) * 1.08
        assert_eq!(points[0].balance_with_fees, 6_420.0);
        assert_eq!(points[0].balance_without_fees, 6_480.0);
        assert_eq!(points[0].cumulative_leakage, 60.0);
    }

    #[test]
    fn test_higher_fee_leaks_more() {
        let cheap = calculate_expense_leakage(&input(0.0003));
        let pricey = calculate_expense_leakage(&input(0.005));
        assert!(pricey.last().unwrap().cumulative_leakage > cheap.last().unwrap().cumulative_leakage);
    }
}
