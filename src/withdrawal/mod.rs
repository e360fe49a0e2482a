//! Withdrawal and tax simulation after conversion

mod simulator;
mod tax;

pub use simulator::{
    calculate_withdrawal, generate_withdrawal_timeline, TimelineRequest, WithdrawalRequest,
    WithdrawalScenario, TIMELINE_AGES,
};
pub use tax::{calculate_federal_tax, marginal_rate};
