//! Market Comparator - Positions a result against category benchmarks.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::economics::{
    BenchmarkCatalog, EconomicsResult, MarketBenchmark, RangePosition, Roi,
};
use crate::domain::foundation::{NotFoundError, Percentage, ProjectType};

/// Coarse standing of a margin relative to the benchmark midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketStanding {
    SignificantlyBelow,
    Below,
    AtMarket,
    Above,
    SignificantlyAbove,
}

impl MarketStanding {
    /// Classifies a relative difference, in percent of the benchmark midpoint.
    pub fn from_relative_difference(diff_percent: Decimal) -> Self {
        if diff_percent >= Decimal::from(20) {
            MarketStanding::SignificantlyAbove
        } else if diff_percent >= Decimal::from(10) {
            MarketStanding::Above
        } else if diff_percent >= Decimal::from(-10) {
            MarketStanding::AtMarket
        } else if diff_percent >= Decimal::from(-20) {
            MarketStanding::Below
        } else {
            MarketStanding::SignificantlyBelow
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MarketStanding::SignificantlyBelow => "Significantly below market",
            MarketStanding::Below => "Below market",
            MarketStanding::AtMarket => "At market level",
            MarketStanding::Above => "Above market",
            MarketStanding::SignificantlyAbove => "Significantly above market",
        }
    }
}

/// Annotation attached to a result after benchmark comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarketComparison {
    pub project_type: ProjectType,
    pub margin_position: RangePosition,
    pub roi_position: RangePosition,
    /// Midpoint of the benchmark margin range.
    pub market_margin: Percentage,
    /// Midpoint of the benchmark ROI range.
    pub market_roi: Percentage,
    /// Result margin minus market margin, in percentage points.
    pub margin_difference: Percentage,
    pub standing: MarketStanding,
}

/// Read-only comparison against a benchmark catalog.
#[derive(Debug, Clone, Default)]
pub struct MarketComparator {
    catalog: BenchmarkCatalog,
}

impl MarketComparator {
    pub fn new(catalog: BenchmarkCatalog) -> Self {
        Self { catalog }
    }

    /// Comparator over the built-in benchmarks.
    pub fn standard() -> Self {
        Self::new(BenchmarkCatalog::standard())
    }

    pub fn catalog(&self) -> &BenchmarkCatalog {
        &self.catalog
    }

    /// Compares against the benchmark for the result's project type.
    ///
    /// # Errors
    ///
    /// Returns `NotFoundError` when the catalog has no benchmark for that type.
    pub fn compare(&self, result: &EconomicsResult) -> Result<MarketComparison, NotFoundError> {
        let benchmark = self.catalog.get(result.config().project_type())?;
        Ok(Self::compare_with(result, benchmark))
    }

    /// Compares against an explicit benchmark.
    ///
    /// # Edge Cases
    /// - Undefined ROI: `roi_position` is `Undetermined`
    /// - Non-positive market margin: standing is `AtMarket`
    pub fn compare_with(result: &EconomicsResult, benchmark: &MarketBenchmark) -> MarketComparison {
        let margin = result.profit_margin();
        let market_margin = benchmark.margin_range().midpoint();

        let roi_position = match result.roi() {
            Roi::Defined(roi) => benchmark.roi_range().position(roi),
            Roi::Undefined => RangePosition::Undetermined,
        };

        // Differences beyond the decimal range saturate.
        let margin_difference = margin
            .value()
            .checked_sub(market_margin.value())
            .unwrap_or(Decimal::MIN);
        let relative = if market_margin.value() > Decimal::ZERO {
            margin_difference
                .checked_div(market_margin.value())
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(if margin_difference.is_sign_negative() {
                    Decimal::MIN
                } else {
                    Decimal::MAX
                })
        } else {
            Decimal::ZERO
        };

        MarketComparison {
            project_type: benchmark.project_type(),
            margin_position: benchmark.margin_range().position(margin),
            roi_position,
            market_margin,
            market_roi: benchmark.roi_range().midpoint(),
            margin_difference: Percentage::new(margin_difference),
            standing: MarketStanding::from_relative_difference(relative),
        }
    }
}
