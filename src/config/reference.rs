//! Reference data (team templates and market benchmarks) loaded from YAML
//!
//! Entries in the file are layered over the built-in catalogs: a template
//! with an existing name, or a benchmark for an existing project type,
//! replaces the built-in one.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::error::ReferenceDataError;
use crate::domain::economics::{BenchmarkCatalog, MarketBenchmark, TeamTemplate, TemplateCatalog};

/// Parsed reference data file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReferenceData {
    #[serde(default)]
    pub templates: Vec<TeamTemplate>,

    #[serde(default)]
    pub benchmarks: Vec<MarketBenchmark>,
}

impl ReferenceData {
    /// Parse reference data from a YAML document
    ///
    /// Every template and benchmark goes through the same validation as one
    /// built in code.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ReferenceDataError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read and parse a reference data file
    pub fn load(path: &Path) -> Result<Self, ReferenceDataError> {
        let yaml = fs::read_to_string(path).map_err(|source| ReferenceDataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let data = Self::from_yaml_str(&yaml)?;
        tracing::info!(
            path = %path.display(),
            templates = data.templates.len(),
            benchmarks = data.benchmarks.len(),
            "Loaded reference data"
        );
        Ok(data)
    }

    /// Built-in templates overlaid with the ones from this file
    pub fn template_catalog(&self) -> TemplateCatalog {
        let mut catalog = TemplateCatalog::standard();
        for template in &self.templates {
            catalog.register(template.clone());
        }
        catalog
    }

    /// Built-in benchmarks overlaid with the ones from this file
    pub fn benchmark_catalog(&self) -> BenchmarkCatalog {
        let mut catalog = BenchmarkCatalog::standard();
        for benchmark in &self.benchmarks {
            catalog.insert(benchmark.clone());
        }
        catalog
    }
}
