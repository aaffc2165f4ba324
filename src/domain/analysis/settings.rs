//! Tunable parameters of the analysis pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::RiskThresholds;
use crate::domain::foundation::Violation;

/// Settings shared by every calculation an orchestrator performs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Total team allocation above which a warning is raised.
    #[serde(default = "default_allocation_ceiling")]
    pub allocation_ceiling: Decimal,

    #[serde(default)]
    pub risk: RiskThresholds,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            allocation_ceiling: default_allocation_ceiling(),
            risk: RiskThresholds::default(),
        }
    }
}

fn default_allocation_ceiling() -> Decimal {
    Decimal::from(3)
}

impl AnalysisSettings {
    /// Returns every inconsistent setting.
    pub fn violations(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        if self.allocation_ceiling <= Decimal::ZERO {
            violations.push(Violation::not_positive(
                "analysis.allocation_ceiling",
                self.allocation_ceiling,
            ));
        }
        if self.risk.high_risk_margin > self.risk.low_risk_margin {
            violations.push(Violation::out_of_range(
                "analysis.risk.high_risk_margin",
                format!("<= {}", self.risk.low_risk_margin),
                self.risk.high_risk_margin,
            ));
        }
        if self.risk.concentration_share <= Decimal::ZERO || self.risk.concentration_share > Decimal::ONE {
            violations.push(Violation::out_of_range(
                "analysis.risk.concentration_share",
                "(0, 1]",
                self.risk.concentration_share,
            ));
        }
        violations
    }
}
