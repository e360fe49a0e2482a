//! Growth projection engine for contribution-phase and lifetime runs

mod engine;
mod phases;
mod snapshots;
mod state;

pub use engine::{EnhancedOptions, GrowthConfig, GrowthEngine, LifetimeOptions};
pub use phases::{AccountProfile, ContributionPhase, ContributionSchedule};
pub use snapshots::{ContributionBreakdown, GrowthResult, GrowthSummary, YearlySnapshot};
pub use state::{AccountState, ContributionSplit, YearFlows};
