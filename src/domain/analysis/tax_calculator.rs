//! Tax Calculator - Sequential-deduction tax cascade.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::economics::TaxRate;
use crate::domain::foundation::{Money, ValidationError, Violation};

/// One tax applied during the cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxLine {
    pub name: String,
    pub rate: Decimal,
    /// Amount the rate was applied to (what remained after earlier taxes).
    pub base: Money,
    pub amount: Money,
}

/// Outcome of running a taxable base through a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxAssessment {
    pub total: Money,
    pub lines: Vec<TaxLine>,
    /// Base left after every tax was deducted.
    pub remaining: Money,
}

/// Calculator for cascading taxes.
pub struct TaxCalculator;

impl TaxCalculator {
    /// Returns every violation in the base and rates.
    pub fn validate(base: Money, rates: &[TaxRate]) -> Vec<Violation> {
        let mut violations: Vec<Violation> = rates.iter().flat_map(TaxRate::violations).collect();
        if base.is_negative() {
            violations.insert(0, Violation::negative("tax_base", base.amount()));
        }
        violations
    }

    /// Applies taxes in order, each on what remains after the previous ones.
    ///
    /// # Algorithm
    /// For each tax: `amount = remaining × rate`, `remaining -= amount`.
    /// No intermediate rounding is performed.
    ///
    /// # Edge Cases
    /// - No taxes: total is zero, remaining equals the base
    /// - Zero base: every line is zero
    pub fn compute(base: Money, rates: &[TaxRate]) -> Result<TaxAssessment, ValidationError> {
        let violations = Self::validate(base, rates);
        if !violations.is_empty() {
            return Err(ValidationError::new(violations));
        }
        Ok(Self::cascade(base, rates))
    }

    pub(crate) fn cascade(base: Money, rates: &[TaxRate]) -> TaxAssessment {
        let mut remaining = base;
        let mut lines = Vec::with_capacity(rates.len());

        for tax in rates {
            let amount = remaining.scale(tax.rate);
            lines.push(TaxLine {
                name: tax.name.clone(),
                rate: tax.rate,
                base: remaining,
                amount,
            });
            remaining -= amount;
        }

        TaxAssessment {
            total: lines.iter().map(|l| l.amount).sum(),
            lines,
            remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rates() -> Vec<TaxRate> {
        vec![
            TaxRate::new("income_tax", dec!(0.20)),
            TaxRate::new("social", dec!(0.30)),
        ]
    }

    #[test]
    fn taxes_cascade_on_remaining_base() {
        let assessment = TaxCalculator::compute(Money::from_units(4_507_000), &rates()).unwrap();

        assert_eq!(assessment.lines[0].amount, Money::from_units(901_400));
        assert_eq!(assessment.lines[1].base, Money::from_units(3_605_600));
        assert_eq!(assessment.lines[1].amount, Money::from_units(1_081_680));
        assert_eq!(assessment.total, Money::from_units(1_983_080));
        assert_eq!(assessment.remaining, Money::from_units(2_523_920));
    }

    #[test]
    fn cascade_is_lighter_than_flat_sum() {
        let base = Money::from_units(1000);
        let assessment = TaxCalculator::compute(base, &rates()).unwrap();
        // flat sum would be 500
        assert_eq!(assessment.total, Money::from_units(440));
    }

    #[test]
    fn order_changes_lines_not_total() {
        let base = Money::from_units(1000);
        let forward = TaxCalculator::compute(base, &rates()).unwrap();
        let mut reversed_rates = rates();
        reversed_rates.reverse();
        let reversed = TaxCalculator::compute(base, &reversed_rates).unwrap();

        assert_eq!(forward.total, reversed.total);
        assert_ne!(forward.lines[0].amount, reversed.lines[0].amount);
    }

    #[test]
    fn no_taxes_leaves_base_intact() {
        let assessment = TaxCalculator::compute(Money::from_units(10), &[]).unwrap();
        assert_eq!(assessment.total, Money::ZERO);
        assert_eq!(assessment.remaining, Money::from_units(10));
    }

    #[test]
    fn zero_base_owes_nothing() {
        let assessment = TaxCalculator::compute(Money::ZERO, &rates()).unwrap();
        assert_eq!(assessment.total, Money::ZERO);
    }

    #[test]
    fn invalid_rates_and_base_are_all_reported() {
        let bad = vec![TaxRate::new("a", dec!(1)), TaxRate::new("b", dec!(-0.1))];
        let err = TaxCalculator::compute(Money::from_units(-1), &bad).unwrap_err();
        assert_eq!(err.violations().len(), 3);
        assert_eq!(err.violations()[0], Violation::negative("tax_base", dec!(-1)));
    }
}
