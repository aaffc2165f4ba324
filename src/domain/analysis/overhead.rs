//! Overhead Aggregator - Sums fixed and period costs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{Money, ValidationError, Violation};

/// Overhead total plus the unmodified line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverheadCost {
    pub total: Money,
    pub breakdown: BTreeMap<String, Money>,
}

/// Aggregator for overhead line items.
pub struct OverheadAggregator;

impl OverheadAggregator {
    /// Returns one violation per negative item.
    pub fn validate(items: &BTreeMap<String, Money>) -> Vec<Violation> {
        items
            .iter()
            .filter(|(_, amount)| amount.is_negative())
            .map(|(name, amount)| Violation::negative(format!("overhead_costs.{}", name), amount.amount()))
            .collect()
    }

    /// Sums all overhead amounts.
    pub fn aggregate(items: &BTreeMap<String, Money>) -> Result<OverheadCost, ValidationError> {
        let violations = Self::validate(items);
        if !violations.is_empty() {
            return Err(ValidationError::new(violations));
        }
        Self::compute(items).map_err(ValidationError::single)
    }

    pub(crate) fn compute(items: &BTreeMap<String, Money>) -> Result<OverheadCost, Violation> {
        let total = Money::checked_sum(items.values())
            .ok_or_else(|| Violation::overflow("overhead_cost"))?;
        Ok(OverheadCost {
            total,
            breakdown: items.clone(),
        })
    }
}
