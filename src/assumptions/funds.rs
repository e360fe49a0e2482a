//! Reference data for low-fee index funds the account may hold

use serde::{Deserialize, Serialize};

use super::PolicyConstants;

/// An index fund offered to account holders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibleFund {
    pub ticker: String,
    pub name: String,
    pub expense_ratio: f64,
    pub provider: String,
    pub index: String,
}

impl EligibleFund {
    /// Whether the fund's expense ratio is within the program's fee cap
    pub fn within_fee_cap(&self, constants: &PolicyConstants) -> bool {
        self.expense_ratio <= constants.max_fund_expense_ratio
    }

    /// Expense ratio in basis points
    pub fn expense_ratio_bps(&self) -> f64 {
        self.expense_ratio * 10_000.0
    }
}

/// Built-in fund list used when no reference file is available
pub fn default_funds() -> Vec<EligibleFund> {
    let fund = |ticker: &str, name: &str, expense_ratio: f64, provider: &str, index: &str| EligibleFund {
        ticker: ticker.to_string(),
        name: name.to_string(),
        expense_ratio,
        provider: provider.to_string(),
        index: index.to_string(),
    };

    vec![
        fund("VOO", "Vanguard S&P 500 ETF", 0.0003, "Vanguard", "S&P 500"),
        fund("IVV", "iShares Core S&P 500 ETF", 0.0003, "BlackRock", "S&P 500"),
        fund("SPLG", "SPDR Portfolio S&P 500 ETF", 0.0002, "State Street", "S&P 500"),
        fund("VTI", "Vanguard Total Stock Market ETF", 0.0003, "Vanguard", "CRSP US Total Market"),
        fund("SCHB", "Schwab U.S. Broad Market ETF", 0.0003, "Schwab", "Dow Jones U.S. Broad Stock Market"),
    ]
}

/// Find a fund by ticker, ignoring case
pub fn find_fund<'a>(funds: &'a [EligibleFund], ticker: &str) -> Option<&'a EligibleFund> {
    funds.iter().find(|f| f.ticker.eq_ignore_ascii_case(ticker.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_funds_within_cap() {
        let constants = PolicyConstants::default();
        assert!(default_funds().iter().all(|f| f.within_fee_cap(&constants)));
    }

    #[test]
    fn test_find_fund_case_insensitive() {
        let funds = default_funds();
        let voo = find_fund(&funds, " voo").unwrap();
        assert_eq!(voo.provider, "Vanguard");
        assert!((voo.expense_ratio_bps() - 3.0).abs() < 1e-9);
        assert!(find_fund(&funds, "QQQ").is_none());
    }

    #[test]
    fn test_expensive_fund_exceeds_cap() {
        let constants = PolicyConstants::default();
        let fund = EligibleFund {
            ticker: "XYZ".into(),
            name: "Active Fund".into(),
            expense_ratio: 0.005,
            provider: "Someone".into(),
            index: "None".into(),
        };
        assert!(!fund.within_fee_cap(&constants));
    }
}
