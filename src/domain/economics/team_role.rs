//! Team role value object.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Money, ValidationError, Violation};

/// A staffed role on a project.
///
/// Cost of the role is `rate × hours × allocation`. Constructed only through
/// [`TeamRole::new`] (deserialization included), so every instance satisfies
/// `0 < allocation <= 1`, `rate >= 0` and `hours >= 0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TeamRoleData")]
pub struct TeamRole {
    name: String,
    allocation: Decimal,
    rate: Money,
    hours: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl TeamRole {
    /// Creates a validated role, reporting every problem at once.
    pub fn new(
        name: impl Into<String>,
        allocation: Decimal,
        rate: Money,
        hours: Decimal,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let violations = Self::check(&name, allocation, rate, hours);
        if !violations.is_empty() {
            return Err(ValidationError::new(violations));
        }

        Ok(Self {
            name,
            allocation,
            rate,
            hours,
            description: None,
        })
    }

    /// Attaches a free-text description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns every invariant the given values break.
    pub fn check(name: &str, allocation: Decimal, rate: Money, hours: Decimal) -> Vec<Violation> {
        let mut violations = Vec::new();
        let field = |suffix: &str| format!("team.{}.{}", name, suffix);

        if name.trim().is_empty() {
            violations.push(Violation::empty_field("team.name"));
        }

        if allocation.is_sign_negative() && !allocation.is_zero() {
            violations.push(Violation::negative(field("allocation"), allocation));
        } else if allocation.is_zero() {
            violations.push(Violation::not_positive(field("allocation"), allocation));
        } else if allocation > Decimal::ONE {
            violations.push(Violation::out_of_range(field("allocation"), "(0, 1]", allocation));
        }

        if rate.is_negative() {
            violations.push(Violation::negative(field("rate"), rate.amount()));
        }

        if hours.is_sign_negative() && !hours.is_zero() {
            violations.push(Violation::negative(field("hours"), hours));
        }

        violations
    }

    /// Returns the invariants this role breaks (empty for any constructed role).
    pub fn violations(&self) -> Vec<Violation> {
        Self::check(&self.name, self.allocation, self.rate, self.hours)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Share of the role's committed hours billed to this project.
    pub fn allocation(&self) -> Decimal {
        self.allocation
    }

    pub fn rate(&self) -> Money {
        self.rate
    }

    pub fn hours(&self) -> Decimal {
        self.hours
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Labor cost of this role: `rate × hours × allocation`.
    ///
    /// `None` when the product does not fit in a decimal.
    pub fn cost(&self) -> Option<Money> {
        self.hours
            .checked_mul(self.allocation)
            .and_then(|effort| self.rate.checked_scale(effort))
    }
}

/// Unvalidated wire form of [`TeamRole`].
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TeamRoleData {
    name: String,
    allocation: Decimal,
    rate: Money,
    hours: Decimal,
    #[serde(default)]
    description: Option<String>,
}

impl TryFrom<TeamRoleData> for TeamRole {
    type Error = ValidationError;

    fn try_from(data: TeamRoleData) -> Result<Self, Self::Error> {
        let role = TeamRole::new(data.name, data.allocation, data.rate, data.hours)?;
        Ok(match data.description {
            Some(description) => role.with_description(description),
            None => role,
        })
    }
}
