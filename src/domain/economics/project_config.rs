//! Project configuration and its validating builder.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::tax_schedule::TaxScheduleData;
use super::{TaxSchedule, TeamRole, TeamTemplate};
use crate::domain::foundation::{Money, ProjectType, ValidationError, Violation};

/// Everything the engine needs to know about a project besides the tender amount.
///
/// Immutable once built. Construct with [`ProjectConfig::builder`]; the
/// builder reports every violation at once rather than the first one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProjectConfigSpec")]
pub struct ProjectConfig {
    project_name: String,
    total_amount: Money,
    duration_months: u32,
    project_type: ProjectType,
    team: BTreeMap<String, TeamRole>,
    overhead_costs: BTreeMap<String, Money>,
    taxes: TaxSchedule,
}

impl ProjectConfig {
    /// Creates a builder for constructing a project configuration.
    pub fn builder() -> ProjectConfigBuilder {
        ProjectConfigBuilder::new()
    }

    /// Returns a builder pre-filled with this configuration.
    ///
    /// Building it unchanged yields a configuration equal to `self`.
    pub fn to_builder(&self) -> ProjectConfigBuilder {
        ProjectConfigBuilder {
            project_name: Some(self.project_name.clone()),
            total_amount: Some(self.total_amount),
            duration_months: Some(self.duration_months),
            project_type: Some(self.project_type),
            template_roles: Vec::new(),
            roles: self.team.values().map(RoleDraft::from).collect(),
            overhead_costs: self
                .overhead_costs
                .iter()
                .map(|(name, amount)| (name.clone(), *amount))
                .collect(),
            taxes: self
                .taxes
                .iter()
                .map(|t| (t.name.clone(), t.rate))
                .collect(),
        }
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn duration_months(&self) -> u32 {
        self.duration_months
    }

    pub fn project_type(&self) -> ProjectType {
        self.project_type
    }

    /// Roles keyed by name, in ascending name order.
    pub fn team(&self) -> &BTreeMap<String, TeamRole> {
        &self.team
    }

    pub fn role(&self, name: &str) -> Option<&TeamRole> {
        self.team.get(name)
    }

    /// Overhead line items keyed by name.
    pub fn overhead_costs(&self) -> &BTreeMap<String, Money> {
        &self.overhead_costs
    }

    pub fn taxes(&self) -> &TaxSchedule {
        &self.taxes
    }
}

/// A role as requested, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RoleDraft {
    pub(crate) name: String,
    pub(crate) allocation: Decimal,
    pub(crate) rate: Money,
    pub(crate) hours: Decimal,
    pub(crate) description: Option<String>,
}

impl RoleDraft {
    fn build(&self) -> Result<TeamRole, ValidationError> {
        let role = TeamRole::new(self.name.clone(), self.allocation, self.rate, self.hours)?;
        Ok(match &self.description {
            Some(description) => role.with_description(description.clone()),
            None => role,
        })
    }
}

impl From<&TeamRole> for RoleDraft {
    fn from(role: &TeamRole) -> Self {
        Self {
            name: role.name().to_string(),
            allocation: role.allocation(),
            rate: role.rate(),
            hours: role.hours(),
            description: role.description().map(str::to_string),
        }
    }
}

/// Builder for [`ProjectConfig`] instances.
#[derive(Debug, Clone, Default)]
pub struct ProjectConfigBuilder {
    pub(crate) project_name: Option<String>,
    pub(crate) total_amount: Option<Money>,
    pub(crate) duration_months: Option<u32>,
    pub(crate) project_type: Option<ProjectType>,
    pub(crate) template_roles: Vec<TeamRole>,
    pub(crate) roles: Vec<RoleDraft>,
    pub(crate) overhead_costs: Vec<(String, Money)>,
    pub(crate) taxes: Vec<(String, Decimal)>,
}

impl ProjectConfigBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    pub fn total_amount(mut self, amount: Money) -> Self {
        self.total_amount = Some(amount);
        self
    }

    pub fn duration_months(mut self, months: u32) -> Self {
        self.duration_months = Some(months);
        self
    }

    pub fn project_type(mut self, project_type: ProjectType) -> Self {
        self.project_type = Some(project_type);
        self
    }

    /// Pre-populates roles from a template.
    ///
    /// Roles added with [`role`](Self::role) win over template roles of the
    /// same name, whichever was called first. Also sets the project type if
    /// none was given.
    pub fn template(mut self, template: &TeamTemplate) -> Self {
        self.template_roles = template.roles().to_vec();
        if self.project_type.is_none() {
            self.project_type = Some(template.project_type());
        }
        self
    }

    /// Adds a role.
    pub fn role(
        mut self,
        name: impl Into<String>,
        allocation: Decimal,
        rate: Money,
        hours: Decimal,
    ) -> Self {
        self.roles.push(RoleDraft {
            name: name.into(),
            allocation,
            rate,
            hours,
            description: None,
        });
        self
    }

    /// Adds an overhead line item.
    pub fn overhead(mut self, name: impl Into<String>, amount: Money) -> Self {
        self.overhead_costs.push((name.into(), amount));
        self
    }

    /// Appends a tax; taxes are deducted in the order they are added.
    pub fn tax(mut self, name: impl Into<String>, rate: Decimal) -> Self {
        self.taxes.push((name.into(), rate));
        self
    }

    /// Replaces all taxes with the given schedule.
    pub fn taxes(mut self, schedule: &TaxSchedule) -> Self {
        self.taxes = schedule.iter().map(|t| (t.name.clone(), t.rate)).collect();
        self
    }

    /// Validates everything and builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` listing every violation found.
    pub fn build(self) -> Result<ProjectConfig, ValidationError> {
        let mut violations = Vec::new();

        let project_name = match self.project_name {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                violations.push(Violation::empty_field("project_name"));
                String::new()
            }
        };

        let total_amount = match self.total_amount {
            Some(amount) if amount.is_positive() => amount,
            Some(amount) => {
                violations.push(Violation::not_positive("total_amount", amount.amount()));
                amount
            }
            None => {
                violations.push(Violation::empty_field("total_amount"));
                Money::ZERO
            }
        };

        let duration_months = match self.duration_months {
            Some(0) => {
                violations.push(Violation::not_positive("duration_months", Decimal::ZERO));
                0
            }
            Some(months) => months,
            None => {
                violations.push(Violation::empty_field("duration_months"));
                0
            }
        };

        let project_type = self.project_type;
        if project_type.is_none() {
            violations.push(Violation::empty_field("project_type"));
        }

        let mut team: BTreeMap<String, TeamRole> = self
            .template_roles
            .into_iter()
            .map(|role| (role.name().to_string(), role))
            .collect();

        let mut seen_roles = HashSet::new();
        for draft in &self.roles {
            if !seen_roles.insert(draft.name.clone()) {
                violations.push(Violation::duplicate_name("role", draft.name.clone()));
                continue;
            }
            match draft.build() {
                Ok(role) => {
                    team.insert(role.name().to_string(), role);
                }
                Err(err) => violations.extend(err.into_violations()),
            }
        }

        let mut overhead_costs = BTreeMap::new();
        for (name, amount) in self.overhead_costs {
            if name.trim().is_empty() {
                violations.push(Violation::empty_field("overhead_costs.name"));
            }
            if amount.is_negative() {
                violations.push(Violation::negative(
                    format!("overhead_costs.{}", name),
                    amount.amount(),
                ));
            }
            if overhead_costs.insert(name.clone(), amount).is_some() {
                violations.push(Violation::duplicate_name("overhead item", name));
            }
        }

        let taxes = match TaxSchedule::ordered(self.taxes) {
            Ok(schedule) => schedule,
            Err(err) => {
                violations.extend(err.into_violations());
                TaxSchedule::empty()
            }
        };

        match project_type {
            Some(project_type) if violations.is_empty() => Ok(ProjectConfig {
                project_name,
                total_amount,
                duration_months,
                project_type,
                team,
                overhead_costs,
                taxes,
            }),
            _ => Err(ValidationError::new(violations)),
        }
    }
}

/// Unvalidated wire form of [`ProjectConfig`].
///
/// Roles are keyed by name; taxes may be an ordered list or a mapping.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfigSpec {
    pub project_name: String,
    pub total_amount: Money,
    pub duration_months: u32,
    pub project_type: ProjectType,
    #[serde(default)]
    pub team: BTreeMap<String, RoleSpec>,
    #[serde(default)]
    pub overhead_costs: BTreeMap<String, Money>,
    #[serde(default)]
    taxes: Option<TaxScheduleData>,
}

/// Unvalidated wire form of a role inside [`ProjectConfigSpec`].
#[derive(Debug, Clone, Deserialize)]
pub struct RoleSpec {
    pub allocation: Decimal,
    pub rate: Money,
    pub hours: Decimal,
    #[serde(default)]
    pub description: Option<String>,
}

impl ProjectConfigSpec {
    /// Converts into a builder so callers can layer a template underneath.
    pub fn into_builder(self) -> ProjectConfigBuilder {
        let mut builder = ProjectConfig::builder()
            .project_name(self.project_name)
            .total_amount(self.total_amount)
            .duration_months(self.duration_months)
            .project_type(self.project_type);

        for (name, role) in self.team {
            builder.roles.push(RoleDraft {
                name,
                allocation: role.allocation,
                rate: role.rate,
                hours: role.hours,
                description: role.description,
            });
        }
        for (name, amount) in self.overhead_costs {
            builder = builder.overhead(name, amount);
        }
        builder.taxes = match self.taxes {
            Some(TaxScheduleData::Ordered(rates)) => {
                rates.into_iter().map(|t| (t.name, t.rate)).collect()
            }
            Some(TaxScheduleData::Mapping(map)) => map.into_iter().collect(),
            None => Vec::new(),
        };
        builder
    }
}

impl TryFrom<ProjectConfigSpec> for ProjectConfig {
    type Error = ValidationError;

    fn try_from(spec: ProjectConfigSpec) -> Result<Self, Self::Error> {
        spec.into_builder().build()
    }
}
