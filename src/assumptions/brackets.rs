//! Federal income tax brackets by filing status

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Filing status used to pick a bracket schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilingStatus {
    Single,
    MarriedFilingJointly,
}

impl FilingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilingStatus::Single => "single",
            FilingStatus::MarriedFilingJointly => "marriedFilingJointly",
        }
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilingStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "single" | "Single" => Ok(FilingStatus::Single),
            "marriedFilingJointly" | "MarriedFilingJointly" | "mfj" | "married" => {
                Ok(FilingStatus::MarriedFilingJointly)
            }
            other => Err(EngineError::UnknownFilingStatus(other.to_string())),
        }
    }
}

/// One band of a progressive schedule: income in `[min, max)` taxed at `rate`.
/// The top band has no `max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min: f64,
    pub max: Option<f64>,
    pub rate: f64,
}

impl TaxBracket {
    pub const fn new(min: f64, max: Option<f64>, rate: f64) -> Self {
        Self { min, max, rate }
    }

    /// Portion of `income` that falls inside this bracket
    pub fn taxable_portion(&self, income: f64) -> f64 {
        let upper = self.max.unwrap_or(f64::INFINITY);
        (income.min(upper) - self.min).max(0.0)
    }
}

/// Bracket schedules for every supported filing status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxTables {
    pub single: Vec<TaxBracket>,
    pub married_filing_jointly: Vec<TaxBracket>,
}

impl TaxTables {
    /// 2025 federal ordinary income brackets
    pub fn federal_2025() -> Self {
        Self {
            single: vec![
                TaxBracket::new(0.0, Some(11_925.0), 0.10),
                TaxBracket::new(11_925.0, Some(48_475.0), 0.12),
                TaxBracket::new(48_475.0, Some(103_350.0), 0.22),
                TaxBracket::new(103_350.0, Some(197_300.0), 0.24),
                TaxBracket::new(197_300.0, Some(250_525.0), 0.32),
                TaxBracket::new(250_525.0, Some(626_350.0), 0.35),
                TaxBracket::new(626_350.0, None, 0.37),
            ],
            married_filing_jointly: vec![
                TaxBracket::new(0.0, Some(23_850.0), 0.10),
                TaxBracket::new(23_850.0, Some(96_950.0), 0.12),
                TaxBracket::new(96_950.0, Some(206_700.0), 0.22),
                TaxBracket::new(206_700.0, Some(394_600.0), 0.24),
                TaxBracket::new(394_600.0, Some(501_050.0), 0.32),
                TaxBracket::new(501_050.0, Some(751_600.0), 0.35),
                TaxBracket::new(751_600.0, None, 0.37),
            ],
        }
    }

    /// Build tables from loose brackets, sorting each schedule and checking
    /// it is gapless and ends unbounded
    pub fn from_brackets(
        single: Vec<TaxBracket>,
        married_filing_jointly: Vec<TaxBracket>,
    ) -> Result<Self> {
        Ok(Self {
            single: validate_schedule(FilingStatus::Single, single)?,
            married_filing_jointly: validate_schedule(
                FilingStatus::MarriedFilingJointly,
                married_filing_jointly,
            )?,
        })
    }

    pub fn brackets_for(&self, status: FilingStatus) -> &[TaxBracket] {
        match status {
            FilingStatus::Single => &self.single,
            FilingStatus::MarriedFilingJointly => &self.married_filing_jointly,
        }
    }
}

impl Default for TaxTables {
    fn default() -> Self {
        Self::federal_2025()
    }
}

fn validate_schedule(status: FilingStatus, mut brackets: Vec<TaxBracket>) -> Result<Vec<TaxBracket>> {
    let invalid = |reason: String| EngineError::InvalidBrackets {
        status: status.to_string(),
        reason,
    };

    if brackets.is_empty() {
        return Err(invalid("no brackets".to_string()));
    }

    brackets.sort_by(|a, b| a.min.total_cmp(&b.min));

    if brackets[0].min != 0.0 {
        return Err(invalid(format!("first bracket starts at {}", brackets[0].min)));
    }

    for pair in brackets.windows(2) {
        match pair[0].max {
            Some(max) if max == pair[1].min => {}
            Some(max) => {
                return Err(invalid(format!(
                    "bracket ending at {} is followed by one starting at {}",
                    max, pair[1].min
                )))
            }
            None => return Err(invalid(format!("unbounded bracket at {} is not last", pair[0].min))),
        }
    }

    if let Some(last) = brackets.last() {
        if last.max.is_some() {
            return Err(invalid("top bracket must be unbounded".to_string()));
        }
    }

    Ok(brackets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_are_valid() {
        let tables = TaxTables::federal_2025();
        let rebuilt = TaxTables::from_brackets(
            tables.single.clone(),
            tables.married_filing_jointly.clone(),
        )
        .unwrap();
        assert_eq!(rebuilt, tables);
    }

    #[test]
    fn test_unsorted_brackets_are_sorted() {
        let single = vec![
            TaxBracket::new(10_000.0, None, 0.2),
            TaxBracket::new(0.0, Some(10_000.0), 0.1),
        ];
        let tables = TaxTables::from_brackets(single.clone(), single).unwrap();
        assert_eq!(tables.single[0].min, 0.0);
    }

    #[test]
    fn test_gap_is_rejected() {
        let single = vec![
            TaxBracket::new(0.0, Some(10_000.0), 0.1),
            TaxBracket::new(12_000.0, None, 0.2),
        ];
        let mfj = TaxTables::federal_2025().married_filing_jointly;
        let err = TaxTables::from_brackets(single, mfj).unwrap_err();
        assert!(matches!(err, EngineError::InvalidBrackets { .. }));
    }

    #[test]
    fn test_bounded_top_bracket_is_rejected() {
        let single = vec![TaxBracket::new(0.0, Some(10_000.0), 0.1)];
        let mfj = TaxTables::federal_2025().married_filing_jointly;
        assert!(TaxTables::from_brackets(single, mfj).is_err());
    }

    #[test]
    fn test_filing_status_parsing() {
        assert_eq!("single".parse::<FilingStatus>().unwrap(), FilingStatus::Single);
        assert_eq!(
            "marriedFilingJointly".parse::<FilingStatus>().unwrap(),
            FilingStatus::MarriedFilingJointly
        );
        assert!("head".parse::<FilingStatus>().is_err());
    }

    #[test]
    fn test_taxable_portion() {
        let bracket = TaxBracket::new(10_000.0, Some(20_000.0), 0.12);
        assert_eq!(bracket.taxable_portion(5_000.0), 0.0);
        assert_eq!(bracket.taxable_portion(15_000.0), 5_000.0);
        assert_eq!(bracket.taxable_portion(50_000.0), 10_000.0);
    }
}
