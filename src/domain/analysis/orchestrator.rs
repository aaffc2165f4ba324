//! Economics Orchestrator - Composes the cost, tax and risk services.
//!
//! One call to [`EconomicsOrchestrator::calculate`] runs the full pipeline:
//!
//! ```text
//! labor + overhead = gross cost
//! contract - gross cost = pre-tax profit
//! max(pre-tax profit, 0) -> tax cascade -> total tax
//! pre-tax profit - total tax = net profit
//! ```
//!
//! followed by margin, ROI, payback and risk classification.

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{
    AnalysisSettings, MarketComparator, OverheadAggregator, RiskAssessor, RiskInput,
    TaxCalculator, TeamCostCalculator,
};
use crate::domain::economics::{EconomicsResult, ProjectConfig, Roi};
use crate::domain::foundation::{
    EconomicsError, Money, NotFoundError, Percentage, ValidationError, Violation, ViolationSet,
};

/// Entry point for economics calculations.
///
/// Stateless apart from its settings; safe to share across threads.
#[derive(Debug)]
pub struct EconomicsOrchestrator {
    settings: AnalysisSettings,
    risk: RiskAssessor,
}

impl Default for EconomicsOrchestrator {
    fn default() -> Self {
        Self::new(AnalysisSettings::default())
    }
}

impl EconomicsOrchestrator {
    pub fn new(settings: AnalysisSettings) -> Self {
        let risk = RiskAssessor::new(&settings.risk);
        Self { settings, risk }
    }

    /// Uses a custom risk assessor instead of the one derived from settings.
    pub fn with_risk_assessor(mut self, risk: RiskAssessor) -> Self {
        self.risk = risk;
        self
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Returns every violation in the inputs, warnings included.
    pub fn validate(&self, contract_amount: Money, config: &ProjectConfig) -> Vec<Violation> {
        let mut violations = Vec::new();
        if !contract_amount.is_positive() {
            violations.push(Violation::not_positive(
                "contract_amount",
                contract_amount.amount(),
            ));
        }
        violations.extend(TeamCostCalculator::validate(
            config.team(),
            self.settings.allocation_ceiling,
        ));
        violations.extend(OverheadAggregator::validate(config.overhead_costs()));
        violations.extend(
            TaxCalculator::validate(Money::ZERO, config.taxes().as_slice()),
        );
        violations
    }

    /// Computes the economics of a project for a given contract amount.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` listing every error-level violation in the
    /// contract amount, team, overhead and tax rates. Warnings such as
    /// over-allocation do not fail the call; they are carried on the result.
    /// A figure that does not fit in a decimal fails with a single
    /// `Violation::Overflow` naming it.
    ///
    /// # Edge Cases
    /// - Pre-tax loss: tax base is zero, so no tax is owed
    /// - Zero gross cost: ROI is `Roi::Undefined`
    pub fn calculate(
        &self,
        contract_amount: Money,
        config: impl Into<Arc<ProjectConfig>>,
    ) -> Result<EconomicsResult, ValidationError> {
        let config: Arc<ProjectConfig> = config.into();

        info!(
            project = %config.project_name(),
            contract_amount = %contract_amount,
            "Calculating project economics"
        );

        let mut violations = ViolationSet::new();
        violations.extend(self.validate(contract_amount, &config));
        let warnings = violations.finish()?;
        for warning in &warnings {
            warn!(project = %config.project_name(), %warning, "Validation warning");
        }

        let overflow = |field: &str| ValidationError::single(Violation::overflow(field));

        let labor = TeamCostCalculator::compute(config.team(), Vec::new())
            .map_err(ValidationError::single)?;
        let overhead = OverheadAggregator::compute(config.overhead_costs())
            .map_err(ValidationError::single)?;
        let gross_cost = labor
            .total
            .checked_add(overhead.total)
            .ok_or_else(|| overflow("gross_cost"))?;
        let pre_tax_profit = contract_amount
            .checked_sub(gross_cost)
            .ok_or_else(|| overflow("pre_tax_profit"))?;
        let tax_base = pre_tax_profit.floor_at_zero();
        let taxes = TaxCalculator::cascade(tax_base, config.taxes().as_slice());
        let net_profit = pre_tax_profit
            .checked_sub(taxes.total)
            .ok_or_else(|| overflow("net_profit"))?;

        debug!(
            labor_cost = %labor.total,
            overhead_cost = %overhead.total,
            gross_cost = %gross_cost,
            pre_tax_profit = %pre_tax_profit,
            total_tax = %taxes.total,
            net_profit = %net_profit,
            "Computed cost and tax figures"
        );

        // The contract amount is validated positive, so a failed ratio is an overflow.
        let profit_margin = net_profit
            .ratio_to(contract_amount)
            .and_then(Percentage::checked_from_fraction)
            .ok_or_else(|| overflow("profit_margin"))?;

        let roi = if gross_cost.is_positive() {
            net_profit
                .ratio_to(gross_cost)
                .and_then(Percentage::checked_from_fraction)
                .map(Roi::Defined)
                .ok_or_else(|| overflow("roi"))?
        } else {
            Roi::Undefined
        };

        let payback_period_months =
            Self::payback_months(gross_cost, net_profit, config.duration_months())
                .map_err(ValidationError::single)?;

        let risk = self.risk.evaluate(&RiskInput {
            margin: profit_margin,
            config: &config,
        });

        info!(
            project = %config.project_name(),
            net_profit = %net_profit,
            profit_margin = %profit_margin,
            roi = %roi,
            risk_level = %risk.level,
            "Project economics calculated"
        );

        Ok(EconomicsResult {
            config,
            contract_amount,
            labor_cost: labor.total,
            labor_breakdown: labor.breakdown,
            overhead_cost: overhead.total,
            overhead_breakdown: overhead.breakdown,
            gross_cost,
            pre_tax_profit,
            tax_base,
            taxes: taxes.lines,
            total_tax: taxes.total,
            net_profit,
            profit_margin,
            roi,
            payback_period_months,
            risk,
            warnings,
            market_comparison: None,
        })
    }

    /// Months of average monthly net profit needed to cover the gross cost.
    ///
    /// `Ok(None)` when the project never pays back (net profit not positive).
    pub fn payback_months(
        gross_cost: Money,
        net_profit: Money,
        duration_months: u32,
    ) -> Result<Option<Decimal>, Violation> {
        if !net_profit.is_positive() {
            return Ok(None);
        }
        if gross_cost.is_zero() {
            return Ok(Some(Decimal::ZERO));
        }
        gross_cost
            .checked_scale(Decimal::from(duration_months))
            .and_then(|spent| spent.ratio_to(net_profit))
            .map(Some)
            .ok_or_else(|| Violation::overflow("payback_period_months"))
    }

    /// Returns a copy of `result` annotated with a market comparison.
    ///
    /// # Errors
    ///
    /// Returns `NotFoundError` when no benchmark exists for the project type.
    pub fn annotate(
        result: EconomicsResult,
        comparator: &MarketComparator,
    ) -> Result<EconomicsResult, NotFoundError> {
        let comparison = comparator.compare(&result)?;
        debug!(
            project_type = %comparison.project_type,
            standing = comparison.standing.label(),
            "Attached market comparison"
        );
        Ok(result.with_market_comparison(comparison))
    }

    /// Calculates and annotates in one step.
    pub fn calculate_and_compare(
        &self,
        contract_amount: Money,
        config: impl Into<Arc<ProjectConfig>>,
        comparator: &MarketComparator,
    ) -> Result<EconomicsResult, EconomicsError> {
        let result = self.calculate(contract_amount, config)?;
        Ok(Self::annotate(result, comparator)?)
    }
}
