//! Team Cost Calculator - Labor cost of a staffing plan.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

use crate::domain::economics::TeamRole;
use crate::domain::foundation::{Money, ValidationError, Violation, ViolationSet};

/// Labor cost of a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamCost {
    pub total: Money,
    /// Cost per role name, covering every input role.
    pub breakdown: BTreeMap<String, Money>,
    /// Warning-level violations such as over-allocation.
    pub warnings: Vec<Violation>,
}

/// Calculator for staffing plan costs.
pub struct TeamCostCalculator;

impl TeamCostCalculator {
    /// Returns every violation in the team, warnings included.
    ///
    /// A total allocation above `allocation_ceiling` is reported as a
    /// warning; per-role problems are errors.
    pub fn validate(team: &BTreeMap<String, TeamRole>, allocation_ceiling: Decimal) -> Vec<Violation> {
        let mut violations: Vec<Violation> = team.values().flat_map(TeamRole::violations).collect();

        let total: Decimal = team.values().map(TeamRole::allocation).sum();
        if total > allocation_ceiling {
            violations.push(Violation::over_allocated(total, allocation_ceiling));
        }

        violations
    }

    /// Computes total labor cost = Σ(rate × hours × allocation) plus a per-role breakdown.
    ///
    /// # Edge Cases
    /// - Empty team: total is zero, breakdown is empty
    /// - Over-allocated team: cost is still computed, a warning is attached
    pub fn calculate(
        team: &BTreeMap<String, TeamRole>,
        allocation_ceiling: Decimal,
    ) -> Result<TeamCost, ValidationError> {
        let mut violations = ViolationSet::new();
        violations.extend(Self::validate(team, allocation_ceiling));
        let warnings = violations.finish()?;

        for warning in &warnings {
            warn!(%warning, "Team allocation warning");
        }

        Self::compute(team, warnings).map_err(ValidationError::single)
    }

    /// Computes costs without validating; callers must have validated `team`.
    ///
    /// Fails only when a cost does not fit in a decimal.
    pub(crate) fn compute(
        team: &BTreeMap<String, TeamRole>,
        warnings: Vec<Violation>,
    ) -> Result<TeamCost, Violation> {
        let breakdown = team
            .iter()
            .map(|(name, role)| {
                role.cost()
                    .map(|cost| (name.clone(), cost))
                    .ok_or_else(|| Violation::overflow(format!("team.{}.cost", name)))
            })
            .collect::<Result<BTreeMap<String, Money>, Violation>>()?;
        let total = Money::checked_sum(breakdown.values())
            .ok_or_else(|| Violation::overflow("labor_cost"))?;

        Ok(TeamCost {
            total,
            breakdown,
            warnings,
        })
    }
}
