//! Project category used for team templates and market benchmarks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Violation;

/// Category of design work a tender covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Architecture,
    Engineering,
    Landscaping,
    Complex,
    Restoration,
    Infrastructure,
}

impl ProjectType {
    /// All project types.
    pub const ALL: [ProjectType; 6] = [
        ProjectType::Architecture,
        ProjectType::Engineering,
        ProjectType::Landscaping,
        ProjectType::Complex,
        ProjectType::Restoration,
        ProjectType::Infrastructure,
    ];

    /// Returns the stable identifier used in reference data.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Architecture => "architecture",
            ProjectType::Engineering => "engineering",
            ProjectType::Landscaping => "landscaping",
            ProjectType::Complex => "complex",
            ProjectType::Restoration => "restoration",
            ProjectType::Infrastructure => "infrastructure",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = Violation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Violation::unknown_reference("project type", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_type_parses_identifiers() {
        for t in ProjectType::ALL {
            assert_eq!(t.as_str().parse::<ProjectType>().unwrap(), t);
        }
    }

    #[test]
    fn project_type_rejects_unknown() {
        let err = "shipbuilding".parse::<ProjectType>().unwrap_err();
        assert_eq!(err, Violation::unknown_reference("project type", "shipbuilding"));
    }

    #[test]
    fn project_type_serializes_snake_case() {
        let json = serde_json::to_string(&ProjectType::Restoration).unwrap();
        assert_eq!(json, "\"restoration\"");
    }
}
