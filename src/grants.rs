//! Grant eligibility by ZIP code median household income
//!
//! A dictionary lookup plus threshold check, kept apart from the projection
//! engine. Callers can add `total_eligible_amount` to the seed deposit.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantEligibility {
    pub max_median_income: f64,
    pub max_age: u32,
    pub max_age_label: String,
    pub requires_citizenship: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grant {
    pub id: String,
    pub name: String,
    pub organization: String,
    pub amount: f64,
    pub amount_label: String,
    pub description: String,
    pub eligibility: GrantEligibility,
    pub source: String,
    pub announced_date: String,
    #[serde(default)]
    pub notes: String,
}

/// Grant list plus attribution for the income data it is checked against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantCatalog {
    pub data_source: String,
    pub grants: Vec<Grant>,
}

impl GrantCatalog {
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let catalog: GrantCatalog = serde_json::from_reader(file)?;
        info!("Loaded {} grants", catalog.grants.len());
        Ok(catalog)
    }
}

/// Median household income keyed by five-digit ZIP
#[derive(Debug, Clone, Default)]
pub struct IncomeByZip {
    incomes: HashMap<String, f64>,
}

/// Raw CSV row matching zip_median_income.csv columns
#[derive(Debug, Deserialize)]
struct ZipRow {
    zip: String,
    median_income: f64,
}

impl IncomeByZip {
    pub fn new(incomes: HashMap<String, f64>) -> Self {
        Self { incomes }
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut incomes = HashMap::new();

        for result in reader.deserialize() {
            let row: ZipRow = result?;
            incomes.insert(normalize_zip(&row.zip), row.median_income);
        }

        info!("Loaded median income for {} ZIP codes", incomes.len());
        Ok(Self { incomes })
    }

    pub fn median_income(&self, zip: &str) -> Option<f64> {
        self.incomes.get(&normalize_zip(zip)).copied()
    }

    pub fn len(&self) -> usize {
        self.incomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incomes.is_empty()
    }
}

/// Trim and left-pad with zeros to five digits
pub fn normalize_zip(zip: &str) -> String {
    format!("{:0>5}", zip.trim())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrantResult {
    pub grant: Grant,
    pub eligible: bool,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZipLookupResult {
    pub zip: String,
    pub found: bool,
    pub median_income: Option<f64>,
    pub grants: Vec<GrantResult>,
    pub total_eligible_amount: f64,
}

/// Check every grant in the catalog against a ZIP's median income
pub fn check_grant_eligibility(zip: &str, incomes: &IncomeByZip, catalog: &GrantCatalog) -> ZipLookupResult {
    let normalized = normalize_zip(zip);
    let income = incomes.median_income(&normalized);

    let grants: Vec<GrantResult> = catalog
        .grants
        .iter()
        .map(|grant| {
            let threshold = grant.eligibility.max_median_income;
            let (eligible, reason) = match income {
                None => (
                    false,
                    format!(
                        "ZIP code {} was not found in Census data. It may be a PO Box, military, or very new ZIP code.",
                        normalized
                    ),
                ),
                Some(income) if income > threshold => (
                    false,
                    format!(
                        "Median household income (${:.0}) exceeds the ${:.0} threshold.",
                        income, threshold
                    ),
                ),
                Some(income) => (
                    true,
                    format!(
                        "Median household income (${:.0}) is below the ${:.0} threshold.",
                        income, threshold
                    ),
                ),
            };
            GrantResult {
                grant: grant.clone(),
                eligible,
                reason,
            }
        })
        .collect();

    let total_eligible_amount = grants
        .iter()
        .filter(|g| g.eligible)
        .map(|g| g.grant.amount)
        .sum();

    ZipLookupResult {
        zip: normalized,
        found: income.is_some(),
        median_income: income,
        grants,
        total_eligible_amount,
    }
}
