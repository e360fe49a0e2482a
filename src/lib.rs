//! Account Projection - deterministic growth engine for child investment accounts
//!
//! This library provides:
//! - Phased contribution growth to the conversion age, with nominal or
//!   inflation-indexed caps, employer money and fund expenses
//! - Lifetime projections continuing to a retirement age
//! - Cost of waiting, milestone, inflation, account-type and employer analyses
//! - Withdrawal simulation with progressive federal tax and early penalties
//! - Expense-ratio leakage comparison
//! - Grant eligibility by ZIP code and batch scenario runs

pub mod analysis;
pub mod assumptions;
pub mod error;
pub mod grants;
pub mod money;
pub mod projection;
pub mod scenario;
pub mod withdrawal;

// Re-export commonly used types
pub use assumptions::{Assumptions, FilingStatus, PolicyConstants, TaxBracket, TaxTables};
pub use error::{EngineError, Result};
pub use projection::{AccountProfile, GrowthConfig, GrowthEngine, GrowthResult, YearlySnapshot};
pub use scenario::ScenarioRunner;
