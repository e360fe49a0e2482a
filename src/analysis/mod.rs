//! Analyses derived from the growth engine and simple compounding

mod accounts;
mod cost_of_waiting;
mod employer;
mod fees;
mod inflation;
mod milestones;

pub use accounts::{
    compare_account_growth, final_balances, AccountComparisonInput, AccountType,
    ComparisonProjection, GrowthTaxTreatment,
};
pub use cost_of_waiting::{calculate_cost_of_waiting, CostOfWaitingInput, CostOfWaitingResult};
pub use employer::{
    compare_employer_contribution, EmployerMatchInput, EmployerMatchPoint, EmployerMatchResult,
};
pub use fees::{calculate_expense_leakage, ExpenseLeakageInput, LeakagePoint};
pub use inflation::{
    compare_purchasing_power, InflationComparison, InflationComparisonInput, PurchasingPowerPoint,
};
pub use milestones::{
    calculate_milestones, detect_milestones, Milestone, MilestoneInput, MilestoneReport,
    DEFAULT_MILESTONES,
};
