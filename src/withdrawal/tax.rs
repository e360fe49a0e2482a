//! Progressive federal income tax

use crate::assumptions::TaxBracket;
use crate::money::round_cents;

/// Tax owed on `taxable_income` under a progressive schedule.
///
/// Each bracket taxes only the part of income inside `[min, max)`; brackets are
/// walked in ascending order and the walk stops once income is used up.
pub fn calculate_federal_tax(taxable_income: f64, brackets: &[TaxBracket]) -> f64 {
    if taxable_income <= 0.0 {
        return 0.0;
    }

    let mut tax = 0.0;
    for bracket in brackets {
        if taxable_income <= bracket.min {
            break;
        }
        tax += bracket.taxable_portion(taxable_income) * bracket.rate;
    }

    round_cents(tax)
}

/// Rate applied to the next dollar of income
pub fn marginal_rate(taxable_income: f64, brackets: &[TaxBracket]) -> f64 {
    brackets
        .iter()
        .rev()
        .find(|b| taxable_income >= b.min)
        .map(|b| b.rate)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::{FilingStatus, TaxTables};

    fn single() -> Vec<TaxBracket> {
        TaxTables::federal_2025().brackets_for(FilingStatus::Single).to_vec()
    }

    #[test]
    fn test_zero_and_negative_income() {
        assert_eq!(calculate_federal_tax(0.0, &single()), 0.0);
        assert_eq!(calculate_federal_tax(-500.0, &single()), 0.0);
    }

    #[test]
    fn test_first_bracket_only() {
        assert_eq!(calculate_federal_tax(10_000.0, &single()), 1_000.0);
    }

    #[test]
    fn test_spans_brackets() {
        // 11925 * 10% + (50000 - 48475 ... ) walked bracket by bracket
        let expected = 11_925.0 * 0.10 + (48_475.0 - 11_925.0) * 0.12 + (50_000.0 - 48_475.0) * 0.22;
        assert!((calculate_federal_tax(50_000.0, &single()) - round_cents(expected)).abs() < 1e-9);
    }

    #[test]
    fn test_top_bracket_unbounded() {
        let brackets = vec![
            TaxBracket::new(0.0, Some(10_000.0), 0.10),
            TaxBracket::new(10_000.0, None, 0.50),
        ];
        assert_eq!(calculate_federal_tax(1_010_000.0, &brackets), 1_000.0 + 500_000.0);
    }

    #[test]
    fn test_tax_is_non_decreasing() {
        let brackets = single();
        let mut previous = 0.0;
        let mut income = 0.0;
        while income <= 1_000_000.0 {
            let tax = calculate_federal_tax(income, &brackets);
            assert!(tax >= previous, "tax fell at income {}", income);
            previous = tax;
            income += 997.0;
        }
    }

    #[test]
    fn test_marginal_rate() {
        let brackets = single();
        assert_eq!(marginal_rate(0.0, &brackets), 0.10);
        assert_eq!(marginal_rate(50_000.0, &brackets), 0.22);
        assert_eq!(marginal_rate(1_000_000.0, &brackets), 0.37);
    }
}
