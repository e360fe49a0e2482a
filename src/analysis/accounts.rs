//! Side-by-side growth of the account against other ways to save for a child

use serde::{Deserialize, Serialize};

use crate::assumptions::PolicyConstants;
use crate::money::round_cents;

/// Savings vehicles offered in the comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    ChildInvestmentAccount,
    Plan529,
    CustodialRothIra,
    CustodialUtma,
}

/// How contributions, growth and withdrawals are taxed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthTaxTreatment {
    TaxDeferred,
    TaxFree,
    Taxable,
}

impl AccountType {
    pub const ALL: [AccountType; 4] = [
        AccountType::ChildInvestmentAccount,
        AccountType::Plan529,
        AccountType::CustodialRothIra,
        AccountType::CustodialUtma,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AccountType::ChildInvestmentAccount => "Child Investment Account (§530A)",
            AccountType::Plan529 => "529 Education Savings",
            AccountType::CustodialRothIra => "Roth IRA (Custodial)",
            AccountType::CustodialUtma => "UTMA/UGMA Custodial",
        }
    }

    /// Annual contribution limit. The account's own limit comes from policy;
    /// 529 and UTMA use the gift-tax exclusion.
    pub fn annual_limit(&self, constants: &PolicyConstants) -> f64 {
        match self {
            AccountType::ChildInvestmentAccount => constants.annual_contribution_cap,
            AccountType::Plan529 => 18_000.0,
            AccountType::CustodialRothIra => 7_000.0,
            AccountType::CustodialUtma => 18_000.0,
        }
    }

    pub fn growth_tax(&self) -> GrowthTaxTreatment {
        match self {
            AccountType::ChildInvestmentAccount => GrowthTaxTreatment::TaxDeferred,
            AccountType::Plan529 | AccountType::CustodialRothIra => GrowthTaxTreatment::TaxFree,
            AccountType::CustodialUtma => GrowthTaxTreatment::Taxable,
        }
    }

    /// Federal seed for a child born in `birth_year`
    pub fn federal_seed_money(&self, constants: &PolicyConstants, birth_year: i32) -> f64 {
        match self {
            AccountType::ChildInvestmentAccount => constants.pilot_deposit_for(birth_year),
            _ => 0.0,
        }
    }

    pub fn accepts_employer_contributions(&self) -> bool {
        matches!(self, AccountType::ChildInvestmentAccount)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountComparisonInput {
    pub annual_contribution: f64,
    pub annual_return: f64,
    pub years: u32,
    pub birth_year: i32,
    pub include_pilot_deposit: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonProjection {
    pub account_type: AccountType,
    pub year: i32,
    pub age: u32,
    pub balance: f64,
}

/// Grow the same annual contribution in every account type, each capped at its
/// own limit. Rows are grouped by account type, then ordered by year.
pub fn compare_account_growth(
    constants: &PolicyConstants,
    input: &AccountComparisonInput,
) -> Vec<ComparisonProjection> {
    let mut results = Vec::with_capacity(AccountType::ALL.len() * input.years as usize);

    for account_type in AccountType::ALL {
        let contribution = input.annual_contribution.min(account_type.annual_limit(constants));
        let mut balance = if input.include_pilot_deposit {
            account_type.federal_seed_money(constants, input.birth_year)
        } else {
            0.0
        };

        for year in 0..input.years {
            balance = (balance + contribution) * (1.0 + input.annual_return);
            results.push(ComparisonProjection {
                account_type,
                year: input.birth_year + year as i32 + 1,
                age: year + 1,
                balance: round_cents(balance),
            });
        }
    }

    results
}

/// Final balance per account type
pub fn final_balances(projections: &[ComparisonProjection]) -> Vec<(AccountType, f64)> {
    AccountType::ALL
        .iter()
        .filter_map(|&account_type| {
            projections
                .iter()
                .filter(|p| p.account_type == account_type)
                .last()
                .map(|p| (account_type, p.balance))
        })
        .collect()
}
