//! CSV-based reference data loader
//!
//! Loads policy constants, tax brackets and the fund list from data/reference/

use std::fs::File;
use std::path::Path;

use log::{info, warn};

use super::{EligibleFund, FilingStatus, PolicyConstants, TaxBracket, TaxTables};
use crate::error::{EngineError, Result};

/// Default path to the reference data directory
pub const DEFAULT_REFERENCE_PATH: &str = "data/reference";

/// Load policy constants from `policy_constants.csv` (`key,value`).
/// Keys not present keep their built-in default.
pub fn load_policy_constants(path: &Path) -> Result<PolicyConstants> {
    let file = File::open(path.join("policy_constants.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut constants = PolicyConstants::default();
    let mut overridden = 0;

    for result in reader.records() {
        let record = result?;
        if record.len() < 2 {
            warn!("Skipping short policy constant row: {:?}", record);
            continue;
        }
        constants.set(&record[0], &record[1])?;
        overridden += 1;
    }

    info!("Loaded {} policy constants from {}", overridden, path.display());
    Ok(constants)
}

/// Raw CSV row matching tax_brackets.csv columns
#[derive(Debug, serde::Deserialize)]
struct BracketRow {
    filing_status: String,
    min: f64,
    max: Option<f64>,
    rate: f64,
}

/// Load bracket schedules from `tax_brackets.csv`
/// (`filing_status,min,max,rate`, empty `max` for the top bracket)
pub fn load_tax_tables(path: &Path) -> Result<TaxTables> {
    let file = File::open(path.join("tax_brackets.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut single = Vec::new();
    let mut married = Vec::new();

    for result in reader.deserialize() {
        let row: BracketRow = result?;
        let bracket = TaxBracket::new(row.min, row.max, row.rate);
        match row.filing_status.parse::<FilingStatus>()? {
            FilingStatus::Single => single.push(bracket),
            FilingStatus::MarriedFilingJointly => married.push(bracket),
        }
    }

    TaxTables::from_brackets(single, married)
}

/// Load the eligible fund list from `eligible_funds.csv`
pub fn load_eligible_funds(path: &Path) -> Result<Vec<EligibleFund>> {
    let file = File::open(path.join("eligible_funds.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut funds = Vec::new();
    for result in reader.deserialize() {
        let fund: EligibleFund = result?;
        if fund.expense_ratio < 0.0 {
            return Err(EngineError::Parse(format!(
                "negative expense ratio for {}",
                fund.ticker
            )));
        }
        funds.push(fund);
    }

    Ok(funds)
}

/// All reference data loaded from one directory
pub struct LoadedReferenceData {
    pub constants: PolicyConstants,
    pub tax_tables: TaxTables,
    pub funds: Vec<EligibleFund>,
}

impl LoadedReferenceData {
    /// Load all reference data from the default path
    pub fn load_default() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_REFERENCE_PATH))
    }

    /// Load all reference data from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        Ok(Self {
            constants: load_policy_constants(path)?,
            tax_tables: load_tax_tables(path)?,
            funds: load_eligible_funds(path)?,
        })
    }
}
