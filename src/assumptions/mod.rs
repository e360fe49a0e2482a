//! Policy assumptions: program constants, tax brackets and the fund list

mod brackets;
mod constants;
mod funds;
pub mod loader;

pub use brackets::{FilingStatus, TaxBracket, TaxTables};
pub use constants::{PolicyConstants, CAP_ROUNDING_STEP};
pub use funds::{default_funds, find_fund, EligibleFund};
pub use loader::LoadedReferenceData;

use std::path::Path;

use crate::error::Result;

/// Container for all reference assumptions a calculation may need
#[derive(Debug, Clone)]
pub struct Assumptions {
    pub constants: PolicyConstants,
    pub tax_tables: TaxTables,
    pub funds: Vec<EligibleFund>,
}

impl Assumptions {
    /// Built-in values for the current program year
    pub fn builtin() -> Self {
        Self {
            constants: PolicyConstants::default(),
            tax_tables: TaxTables::federal_2025(),
            funds: default_funds(),
        }
    }

    /// Load assumptions from CSV files in the default location (data/reference/)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_REFERENCE_PATH))
    }

    /// Load assumptions from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let loaded = LoadedReferenceData::load_from(path)?;

        Ok(Self {
            constants: loaded.constants,
            tax_tables: loaded.tax_tables,
            funds: loaded.funds,
        })
    }
}

impl Default for Assumptions {
    fn default() -> Self {
        Self::builtin()
    }
}
