//! Market benchmarks per project type.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{
    NotFoundError, Percentage, ProjectType, ResourceKind, ValidationError, Violation,
};

/// Where a value falls relative to a benchmark range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangePosition {
    Below,
    Within,
    Above,
    /// The value itself is undefined (e.g. ROI with zero cost).
    Undetermined,
}

/// An inclusive expected range, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BenchmarkRange {
    pub min: Percentage,
    pub max: Percentage,
}

impl BenchmarkRange {
    pub fn new(min: Percentage, max: Percentage) -> Self {
        Self { min, max }
    }

    pub fn position(&self, value: Percentage) -> RangePosition {
        if value < self.min {
            RangePosition::Below
        } else if value > self.max {
            RangePosition::Above
        } else {
            RangePosition::Within
        }
    }

    pub fn midpoint(&self) -> Percentage {
        Percentage::new(self.min.value() / Decimal::TWO + self.max.value() / Decimal::TWO)
    }

    fn violations(&self, field: &str) -> Vec<Violation> {
        if self.min > self.max {
            vec![Violation::out_of_range(
                format!("{}.min", field),
                format!("<= {}", self.max.value()),
                self.min.value(),
            )]
        } else {
            Vec::new()
        }
    }
}

/// Reference statistics for one project category.
///
/// Supplied externally; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MarketBenchmarkData")]
pub struct MarketBenchmark {
    project_type: ProjectType,
    margin_range: BenchmarkRange,
    roi_range: BenchmarkRange,
}

impl MarketBenchmark {
    /// Creates a benchmark; each range must have `min <= max`.
    pub fn new(
        project_type: ProjectType,
        margin_range: BenchmarkRange,
        roi_range: BenchmarkRange,
    ) -> Result<Self, ValidationError> {
        let mut violations = margin_range.violations("margin_range");
        violations.extend(roi_range.violations("roi_range"));
        if !violations.is_empty() {
            return Err(ValidationError::new(violations));
        }

        Ok(Self {
            project_type,
            margin_range,
            roi_range,
        })
    }

    pub fn project_type(&self) -> ProjectType {
        self.project_type
    }

    pub fn margin_range(&self) -> BenchmarkRange {
        self.margin_range
    }

    pub fn roi_range(&self) -> BenchmarkRange {
        self.roi_range
    }
}

#[derive(Debug, Clone, Deserialize)]
struct MarketBenchmarkData {
    project_type: ProjectType,
    margin_range: BenchmarkRange,
    roi_range: BenchmarkRange,
}

impl TryFrom<MarketBenchmarkData> for MarketBenchmark {
    type Error = ValidationError;

    fn try_from(data: MarketBenchmarkData) -> Result<Self, Self::Error> {
        MarketBenchmark::new(data.project_type, data.margin_range, data.roi_range)
    }
}

/// Benchmarks keyed by project type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BenchmarkCatalog {
    benchmarks: BTreeMap<ProjectType, MarketBenchmark>,
}

fn range(min: i64, max: i64) -> BenchmarkRange {
    BenchmarkRange::new(
        Percentage::new(Decimal::from(min)),
        Percentage::new(Decimal::from(max)),
    )
}

static STANDARD_BENCHMARKS: Lazy<BenchmarkCatalog> = Lazy::new(|| {
    [
        (ProjectType::Architecture, range(12, 18), range(20, 30)),
        (ProjectType::Engineering, range(10, 14), range(16, 24)),
        (ProjectType::Landscaping, range(15, 21), range(25, 35)),
        (ProjectType::Complex, range(8, 12), range(12, 18)),
        (ProjectType::Restoration, range(6, 10), range(10, 14)),
        (ProjectType::Infrastructure, range(11, 15), range(18, 26)),
    ]
    .into_iter()
    .filter_map(|(project_type, margin, roi)| MarketBenchmark::new(project_type, margin, roi).ok())
    .collect()
});

impl BenchmarkCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the built-in benchmarks for every project type.
    pub fn standard() -> Self {
        STANDARD_BENCHMARKS.clone()
    }

    /// Adds a benchmark, replacing any existing one for the same project type.
    pub fn insert(&mut self, benchmark: MarketBenchmark) {
        self.benchmarks.insert(benchmark.project_type, benchmark);
    }

    /// Looks up the benchmark for a project type.
    pub fn get(&self, project_type: ProjectType) -> Result<&MarketBenchmark, NotFoundError> {
        self.benchmarks
            .get(&project_type)
            .ok_or_else(|| NotFoundError::new(ResourceKind::Benchmark, project_type.as_str()))
    }

    pub fn len(&self) -> usize {
        self.benchmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }
}

impl FromIterator<MarketBenchmark> for BenchmarkCatalog {
    fn from_iter<I: IntoIterator<Item = MarketBenchmark>>(iter: I) -> Self {
        let mut catalog = BenchmarkCatalog::new();
        for benchmark in iter {
            catalog.insert(benchmark);
        }
        catalog
    }
}
