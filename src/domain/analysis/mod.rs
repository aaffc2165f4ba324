//! Analysis Module - Pure domain services for project economics.
//!
//! This module contains stateless services that operate on the economics
//! value objects to compute costs, taxes, profitability and risk.
//!
//! # Components
//!
//! - `TeamCostCalculator` - Labor cost and per-role breakdown
//! - `OverheadAggregator` - Overhead totals
//! - `TaxCalculator` - Sequential-deduction tax cascade
//! - `RiskAssessor` - Rule-based risk level (margin, duration, concentration)
//! - `MarketComparator` - Position against per-category benchmarks
//! - `EconomicsOrchestrator` - Full calculation pipeline
//! - `ScenarioEngine` - What-if re-evaluation, sequential or parallel
//!
//! # Design Philosophy
//!
//! All functions are pure (no side effects beyond logging). They take domain
//! objects as input and return computed results. No ports or adapters needed
//! since there's no I/O or external dependencies.

mod market_comparator;
mod orchestrator;
mod overhead;
mod risk_assessor;
mod scenario;
mod settings;
mod tax_calculator;
mod team_cost;

pub use market_comparator::{MarketComparator, MarketComparison, MarketStanding};
pub use orchestrator::EconomicsOrchestrator;
pub use overhead::{OverheadAggregator, OverheadCost};
pub use risk_assessor::{
    ConcentrationRule, DurationRule, MarginRule, RiskAssessment, RiskAssessor, RiskEffect,
    RiskInput, RiskRule, RiskSignal, RiskSignalKind, RiskThresholds,
};
pub use scenario::{Scenario, ScenarioDelta, ScenarioEngine};
pub use settings::AnalysisSettings;
pub use tax_calculator::{TaxAssessment, TaxCalculator, TaxLine};
pub use team_cost::{TeamCost, TeamCostCalculator};
