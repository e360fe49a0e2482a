//! Running account state during a growth projection

use super::phases::AccountProfile;

/// Unrounded account state carried from one simulated year to the next
#[derive(Debug, Clone)]
pub struct AccountState {
    /// Age at the start of the current year
    pub age: u32,

    /// Balance at the start of the current year, full precision
    pub balance: f64,

    /// Running total of personal contributions, full precision
    pub tax_free_basis: f64,

    /// Balance when the account converted, once phase one has ended
    pub balance_at_conversion: Option<f64>,

    /// Personal contributions add to basis only until conversion
    basis_open: bool,
}

impl AccountState {
    /// Initialize state at `start_age` with the seed already deposited
    pub fn new(start_age: u32, seed: f64) -> Self {
        Self {
            age: start_age,
            balance: seed,
            tax_free_basis: 0.0,
            balance_at_conversion: None,
            basis_open: true,
        }
    }

    /// Calendar year in which the current age year is lived
    pub fn calendar_year(&self, profile: &AccountProfile) -> i32 {
        profile.birth_year + self.age as i32
    }

    /// Apply one year of contributions and growth, returning the unrounded flows
    pub fn advance_year(
        &mut self,
        contribution: ContributionSplit,
        annual_return: f64,
        expense_ratio: f64,
    ) -> YearFlows {
        let start_balance = self.balance;
        let invested = start_balance + contribution.total();
        let earnings = invested * annual_return;
        let expenses = invested * expense_ratio;

        self.balance = invested + earnings - expenses;
        if self.basis_open {
            self.tax_free_basis += contribution.personal;
        }
        self.age += 1;

        YearFlows {
            start_balance,
            contribution,
            earnings,
            expenses,
            end_balance: self.balance,
        }
    }

    /// Record the balance at conversion and stop accruing tax-free basis
    pub fn convert(&mut self) {
        self.balance_at_conversion = Some(self.balance);
        self.basis_open = false;
    }

    pub fn is_converted(&self) -> bool {
        !self.basis_open
    }
}

/// Personal and employer share of one year's contribution
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContributionSplit {
    pub personal: f64,
    pub employer: f64,
}

impl ContributionSplit {
    pub fn personal_only(personal: f64) -> Self {
        Self {
            personal,
            employer: 0.0,
        }
    }

    pub fn total(self) -> f64 {
        self.personal + self.employer
    }
}

/// Full-precision flows for one simulated year
#[derive(Debug, Clone, Copy)]
pub struct YearFlows {
    pub start_balance: f64,
    pub contribution: ContributionSplit,
    pub earnings: f64,
    pub expenses: f64,
    pub end_balance: f64,
}
