//! The outcome of one economics calculation.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::ProjectConfig;
use crate::domain::analysis::{MarketComparison, RiskAssessment, TaxLine};
use crate::domain::foundation::{Money, Percentage, RiskLevel, Violation};

/// Return on investment.
///
/// Undefined when the gross cost is zero; never an infinite number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "value")]
pub enum Roi {
    Defined(Percentage),
    Undefined,
}

impl Roi {
    pub fn value(&self) -> Option<Percentage> {
        match self {
            Roi::Defined(roi) => Some(*roi),
            Roi::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Roi::Defined(_))
    }
}

impl fmt::Display for Roi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Roi::Defined(roi) => write!(f, "{}", roi),
            Roi::Undefined => write!(f, "undefined"),
        }
    }
}

/// Coarse profitability grade derived from the net margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfitGrade {
    Unprofitable,
    Low,
    Satisfactory,
    Good,
    Excellent,
}

impl ProfitGrade {
    pub fn from_margin(margin: Percentage) -> Self {
        let m = margin.value();
        if m >= Decimal::from(20) {
            ProfitGrade::Excellent
        } else if m >= Decimal::from(15) {
            ProfitGrade::Good
        } else if m >= Decimal::from(10) {
            ProfitGrade::Satisfactory
        } else if m >= Decimal::from(5) {
            ProfitGrade::Low
        } else {
            ProfitGrade::Unprofitable
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProfitGrade::Excellent => "Excellent",
            ProfitGrade::Good => "Good",
            ProfitGrade::Satisfactory => "Satisfactory",
            ProfitGrade::Low => "Low",
            ProfitGrade::Unprofitable => "Unprofitable",
        }
    }
}

impl fmt::Display for ProfitGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable record produced by
/// [`EconomicsOrchestrator::calculate`](crate::domain::analysis::EconomicsOrchestrator::calculate).
///
/// Holds a shared reference to the configuration it was computed from.
/// Amounts are exact; round only when presenting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EconomicsResult {
    pub(crate) config: Arc<ProjectConfig>,
    pub(crate) contract_amount: Money,
    pub(crate) labor_cost: Money,
    pub(crate) labor_breakdown: BTreeMap<String, Money>,
    pub(crate) overhead_cost: Money,
    pub(crate) overhead_breakdown: BTreeMap<String, Money>,
    pub(crate) gross_cost: Money,
    pub(crate) pre_tax_profit: Money,
    pub(crate) tax_base: Money,
    pub(crate) taxes: Vec<TaxLine>,
    pub(crate) total_tax: Money,
    pub(crate) net_profit: Money,
    pub(crate) profit_margin: Percentage,
    pub(crate) roi: Roi,
    pub(crate) payback_period_months: Option<Decimal>,
    pub(crate) risk: RiskAssessment,
    pub(crate) warnings: Vec<Violation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) market_comparison: Option<MarketComparison>,
}

impl EconomicsResult {
    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Shared handle to the configuration, for callers that outlive the result.
    pub fn config_arc(&self) -> Arc<ProjectConfig> {
        Arc::clone(&self.config)
    }

    pub fn contract_amount(&self) -> Money {
        self.contract_amount
    }

    pub fn labor_cost(&self) -> Money {
        self.labor_cost
    }

    /// Labor cost per role name.
    pub fn labor_breakdown(&self) -> &BTreeMap<String, Money> {
        &self.labor_breakdown
    }

    pub fn overhead_cost(&self) -> Money {
        self.overhead_cost
    }

    pub fn overhead_breakdown(&self) -> &BTreeMap<String, Money> {
        &self.overhead_breakdown
    }

    pub fn gross_cost(&self) -> Money {
        self.gross_cost
    }

    pub fn pre_tax_profit(&self) -> Money {
        self.pre_tax_profit
    }

    /// Pre-tax profit floored at zero.
    pub fn tax_base(&self) -> Money {
        self.tax_base
    }

    /// Taxes in the order they were deducted.
    pub fn taxes(&self) -> &[TaxLine] {
        &self.taxes
    }

    pub fn total_tax(&self) -> Money {
        self.total_tax
    }

    pub fn net_profit(&self) -> Money {
        self.net_profit
    }

    pub fn profit_margin(&self) -> Percentage {
        self.profit_margin
    }

    pub fn roi(&self) -> Roi {
        self.roi
    }

    /// Months of average net profit needed to recover the gross cost.
    pub fn payback_period_months(&self) -> Option<Decimal> {
        self.payback_period_months
    }

    pub fn risk(&self) -> &RiskAssessment {
        &self.risk
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.risk.level
    }

    /// Warning-level violations found while validating the inputs.
    pub fn warnings(&self) -> &[Violation] {
        &self.warnings
    }

    pub fn market_comparison(&self) -> Option<&MarketComparison> {
        self.market_comparison.as_ref()
    }

    pub fn is_profitable(&self) -> bool {
        self.net_profit.is_positive()
    }

    pub fn profit_grade(&self) -> ProfitGrade {
        ProfitGrade::from_margin(self.profit_margin)
    }

    /// Returns a copy carrying the given market annotation.
    pub fn with_market_comparison(mut self, comparison: MarketComparison) -> Self {
        self.market_comparison = Some(comparison);
        self
    }
}
