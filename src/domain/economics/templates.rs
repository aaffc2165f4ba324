//! Reusable team templates keyed by project type.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::TeamRole;
use crate::domain::foundation::{
    Money, NotFoundError, ProjectType, ResourceKind, ValidationError, Violation,
};

/// A named partial staffing plan used to pre-populate a [`ProjectConfig`](super::ProjectConfig).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TeamTemplateData")]
pub struct TeamTemplate {
    name: String,
    project_type: ProjectType,
    roles: Vec<TeamRole>,
}

impl TeamTemplate {
    /// Creates a template; role names must be unique.
    pub fn new(
        name: impl Into<String>,
        project_type: ProjectType,
        roles: Vec<TeamRole>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let mut violations = Vec::new();
        if name.trim().is_empty() {
            violations.push(Violation::empty_field("template.name"));
        }
        let mut seen = HashSet::new();
        for role in &roles {
            if !seen.insert(role.name()) {
                violations.push(Violation::duplicate_name("role", role.name()));
            }
        }
        if !violations.is_empty() {
            return Err(ValidationError::new(violations));
        }

        Ok(Self {
            name,
            project_type,
            roles,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn project_type(&self) -> ProjectType {
        self.project_type
    }

    pub fn roles(&self) -> &[TeamRole] {
        &self.roles
    }
}

#[derive(Debug, Clone, Deserialize)]
struct TeamTemplateData {
    name: String,
    project_type: ProjectType,
    roles: Vec<TeamRole>,
}

impl TryFrom<TeamTemplateData> for TeamTemplate {
    type Error = ValidationError;

    fn try_from(data: TeamTemplateData) -> Result<Self, Self::Error> {
        TeamTemplate::new(data.name, data.project_type, data.roles)
    }
}

/// Lookup of team templates by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateCatalog {
    templates: BTreeMap<String, TeamTemplate>,
}

static STANDARD_TEMPLATES: Lazy<TemplateCatalog> = Lazy::new(|| {
    let mut catalog = TemplateCatalog::new();
    let templates = [
        (
            "standard_architecture",
            ProjectType::Architecture,
            vec![
                ("Chief Project Engineer", 15, 3000, 80),
                ("Architect", 25, 2500, 120),
                ("Structural Engineer", 12, 2200, 100),
                ("HVAC Engineer", 8, 2000, 80),
                ("Electrical Engineer", 8, 2000, 80),
                ("Cost Estimator", 12, 1800, 60),
            ],
        ),
        (
            "complex_project",
            ProjectType::Complex,
            vec![
                ("Chief Project Engineer", 12, 3500, 100),
                ("Chief Architect", 18, 3000, 120),
                ("Architect", 15, 2500, 100),
                ("Structural Engineer", 15, 2200, 120),
                ("HVAC Engineer", 10, 2000, 100),
                ("Electrical Engineer", 10, 2000, 100),
                ("Plumbing Engineer", 8, 1900, 80),
                ("Cost Estimator", 12, 1800, 80),
            ],
        ),
        (
            "small_project",
            ProjectType::Architecture,
            vec![
                ("Chief Project Engineer", 20, 2500, 60),
                ("Architect", 30, 2200, 80),
                ("Engineer", 25, 1800, 100),
                ("Cost Estimator", 15, 1600, 40),
            ],
        ),
    ];

    for (name, project_type, roles) in templates {
        let roles = roles
            .into_iter()
            .filter_map(|(role, allocation_pct, rate, hours)| {
                TeamRole::new(
                    role,
                    Decimal::new(allocation_pct, 2),
                    Money::from_units(rate),
                    Decimal::from(hours),
                )
                .ok()
            })
            .collect();
        if let Ok(template) = TeamTemplate::new(name, project_type, roles) {
            catalog.register(template);
        }
    }
    catalog
});

impl TemplateCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the built-in templates.
    pub fn standard() -> Self {
        STANDARD_TEMPLATES.clone()
    }

    /// Adds a template, replacing any existing template with the same name.
    pub fn register(&mut self, template: TeamTemplate) {
        tracing::debug!(template = %template.name(), "Registered team template");
        self.templates.insert(template.name.clone(), template);
    }

    /// Looks up a template by name.
    pub fn get(&self, name: &str) -> Result<&TeamTemplate, NotFoundError> {
        self.templates
            .get(name)
            .ok_or_else(|| NotFoundError::new(ResourceKind::Template, name))
    }

    /// Returns all templates for a project type, in name order.
    pub fn for_project_type(&self, project_type: ProjectType) -> Vec<&TeamTemplate> {
        self.templates
            .values()
            .filter(|t| t.project_type == project_type)
            .collect()
    }

    /// Returns the template names in ascending order.
    pub fn names(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl FromIterator<TeamTemplate> for TemplateCatalog {
    fn from_iter<I: IntoIterator<Item = TeamTemplate>>(iter: I) -> Self {
        let mut catalog = TemplateCatalog::new();
        for template in iter {
            catalog.register(template);
        }
        catalog
    }
}
