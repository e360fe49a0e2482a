//! Net proceeds of a withdrawal after incremental income tax and the
//! early-withdrawal penalty

use serde::{Deserialize, Serialize};

use super::tax::calculate_federal_tax;
use crate::assumptions::{FilingStatus, PolicyConstants, TaxTables};
use crate::money::{round_cents, round_places, safe_ratio};

/// Ages shown in the withdrawal timeline
pub const TIMELINE_AGES: [f64; 9] = [18.0, 21.0, 25.0, 30.0, 35.0, 40.0, 50.0, 59.5, 65.0];

/// Outcome of withdrawing at one age
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalScenario {
    pub age: f64,
    pub balance: f64,
    pub withdrawal_amount: f64,
    pub taxable_amount: f64,
    pub federal_tax: f64,
    pub early_withdrawal_penalty: f64,
    pub net_amount: f64,
    /// (tax + penalty) / withdrawal, rounded to 4 decimals
    pub effective_tax_rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WithdrawalRequest<'a> {
    pub age: f64,
    pub balance: f64,
    pub withdrawal_amount: f64,
    /// Ordinary income the holder has before the withdrawal
    pub other_income: f64,
    /// Picks the bracket schedule from `tax_tables`
    pub filing_status: FilingStatus,
    pub tax_tables: &'a TaxTables,
}

/// Tax a single withdrawal on top of the holder's other income.
///
/// The withdrawal is limited to the balance and is fully taxable, since the
/// account follows traditional IRA rules after conversion.
pub fn calculate_withdrawal(request: &WithdrawalRequest<'_>, constants: &PolicyConstants) -> WithdrawalScenario {
    let withdrawal = request.withdrawal_amount.min(request.balance).max(0.0);
    let taxable = withdrawal;

    let brackets = request.tax_tables.brackets_for(request.filing_status);
    let tax_with = calculate_federal_tax(request.other_income + taxable, brackets);
    let tax_without = calculate_federal_tax(request.other_income, brackets);
    let incremental_tax = tax_with - tax_without;

    let penalty = if constants.is_early_withdrawal(request.age) {
        withdrawal * constants.early_withdrawal_penalty_rate
    } else {
        0.0
    };

    let net = withdrawal - incremental_tax - penalty;
    let effective_rate = safe_ratio(incremental_tax + penalty, withdrawal);

    WithdrawalScenario {
        age: request.age,
        balance: round_cents(request.balance),
        withdrawal_amount: round_cents(withdrawal),
        taxable_amount: round_cents(taxable),
        federal_tax: round_cents(incremental_tax),
        early_withdrawal_penalty: round_cents(penalty),
        net_amount: round_cents(net),
        effective_tax_rate: round_places(effective_rate, 4),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineRequest<'a> {
    /// Balance at the conversion age
    pub balance_at_conversion: f64,
    pub annual_return: f64,
    pub other_income: f64,
    pub filing_status: FilingStatus,
    pub tax_tables: &'a TaxTables,
    /// Share of the projected balance withdrawn at each age
    pub withdrawal_percentage: f64,
}

/// Evaluate the same withdrawal share at each of [`TIMELINE_AGES`], growing the
/// balance from the conversion age at the given return
pub fn generate_withdrawal_timeline(
    request: &TimelineRequest<'_>,
    constants: &PolicyConstants,
) -> Vec<WithdrawalScenario> {
    let conversion_age = constants.conversion_age as f64;

    TIMELINE_AGES
        .iter()
        .map(|&age| {
            let years_of_growth = age - conversion_age;
            let balance = request.balance_at_conversion * (1.0 + request.annual_return).powf(years_of_growth);

            calculate_withdrawal(
                &WithdrawalRequest {
                    age,
                    balance,
                    withdrawal_amount: balance * request.withdrawal_percentage,
                    other_income: request.other_income,
                    filing_status: request.filing_status,
                    tax_tables: request.tax_tables,
                },
                constants,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(age: f64, tax_tables: &TaxTables) -> WithdrawalRequest<'_> {
        WithdrawalRequest {
            age,
            balance: 100_000.0,
            withdrawal_amount: 10_000.0,
            other_income: 0.0,
            filing_status: FilingStatus::Single,
            tax_tables,
        }
    }

    #[test]
    fn test_penalty_boundary() {
        let tables = TaxTables::federal_2025();
        let constants = PolicyConstants::default();

        let early = calculate_withdrawal(&request(59.4, &tables), &constants);
        assert_eq!(early.early_withdrawal_penalty, 1_000.0);

        let on_time = calculate_withdrawal(&request(59.5, &tables), &constants);
        assert_eq!(on_time.early_withdrawal_penalty, 0.0);
        assert_eq!(on_time.federal_tax, early.federal_tax);
    }

    #[test]
    fn test_incremental_tax_on_top_of_other_income() {
        let tables = TaxTables::federal_2025();
        let constants = PolicyConstants::default();

        let alone = calculate_withdrawal(&request(65.0, &tables), &constants);
        assert_eq!(alone.federal_tax, 1_000.0);

        let stacked = calculate_withdrawal(
            &WithdrawalRequest {
                other_income: 60_000.0,
                ..request(65.0, &tables)
            },
            &constants,
        );
        // Entirely inside the 22% bracket
        assert_eq!(stacked.federal_tax, 2_200.0);
        assert_eq!(stacked.net_amount, 7_800.0);
        assert_eq!(stacked.effective_tax_rate, 0.22);
    }

    #[test]
    fn test_net_and_effective_rate_with_penalty() {
        let tables = TaxTables::federal_2025();
        let constants = PolicyConstants::default();
        let result = calculate_withdrawal(&request(30.0, &tables), &constants);

        assert_eq!(result.net_amount, 10_000.0 - 1_000.0 - 1_000.0);
        assert_eq!(result.effective_tax_rate, 0.2);
    }

    #[test]
    fn test_filing_status_selects_brackets() {
        let tables = TaxTables::federal_2025();
        let constants = PolicyConstants::default();

        // $20,000 of other income: 12% bracket when single, 10% when joint
        let single = calculate_withdrawal(
            &WithdrawalRequest {
                other_income: 20_000.0,
                ..request(65.0, &tables)
            },
            &constants,
        );
        let joint = calculate_withdrawal(
            &WithdrawalRequest {
                other_income: 20_000.0,
                filing_status: FilingStatus::MarriedFilingJointly,
                ..request(65.0, &tables)
            },
            &constants,
        );

        assert_eq!(single.federal_tax, 1_200.0);
        assert!(joint.federal_tax < single.federal_tax);
    }

    #[test]
    fn test_withdrawal_limited_to_balance_and_zero_safe() {
        let tables = TaxTables::federal_2025();
        let constants = PolicyConstants::default();

        let over = calculate_withdrawal(
            &WithdrawalRequest {
                balance: 4_000.0,
                ..request(65.0, &tables)
            },
            &constants,
        );
        assert_eq!(over.withdrawal_amount, 4_000.0);

        let nothing = calculate_withdrawal(
            &WithdrawalRequest {
                withdrawal_amount: 0.0,
                ..request(30.0, &tables)
            },
            &constants,
        );
        assert_eq!(nothing.effective_tax_rate, 0.0);
        assert_eq!(nothing.net_amount, 0.0);
    }

    #[test]
    fn test_timeline_ages_and_growth() {
        let tables = TaxTables::federal_2025();
        let constants = PolicyConstants::default();
        let timeline = generate_withdrawal_timeline(
            &TimelineRequest {
                balance_at_conversion: 50_000.0,
                annual_return: 0.07,
                other_income: 40_000.0,
                filing_status: FilingStatus::MarriedFilingJointly,
                tax_tables: &tables,
                withdrawal_percentage: 0.1,
            },
            &constants,
        );

        let ages: Vec<f64> = timeline.iter().map(|s| s.age).collect();
        assert_eq!(ages, TIMELINE_AGES.to_vec());

        assert_eq!(timeline[0].balance, 50_000.0);
        assert_eq!(timeline[0].withdrawal_amount, 5_000.0);
        for pair in timeline.windows(2) {
            assert!(pair[1].balance > pair[0].balance);
        }

        let before = timeline.iter().find(|s| s.age == 50.0).unwrap();
        let after = timeline.iter().find(|s| s.age == 59.5).unwrap();
        assert!(before.early_withdrawal_penalty > 0.0);
        assert_eq!(after.early_withdrawal_penalty, 0.0);
    }
}
