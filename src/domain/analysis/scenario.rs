//! Scenario Engine - What-if re-evaluation on perturbed copies of a project.
//!
//! Deltas are applied to a builder derived from the base configuration, so
//! the perturbed project goes through the same validation as any other and
//! the base is never touched.

use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::EconomicsOrchestrator;
use crate::domain::economics::{EconomicsResult, ProjectConfig, ProjectConfigBuilder};
use crate::domain::foundation::{Money, ValidationError, Violation, ViolationSet};

/// A single perturbation of the inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "delta", rename_all = "snake_case")]
pub enum ScenarioDelta {
    /// Scales the contract amount (and the configured total) by a factor > 0.
    RevenueMultiplier { factor: Decimal },
    /// Adds months to the duration; the result must stay positive.
    DurationOffset { months: i32 },
    /// Scales one role's rate.
    RoleRateMultiplier { role: String, factor: Decimal },
    /// Scales every role's rate.
    AllRatesMultiplier { factor: Decimal },
    /// Scales one role's committed hours.
    RoleHoursMultiplier { role: String, factor: Decimal },
    /// Scales every overhead item.
    OverheadMultiplier { factor: Decimal },
    /// Replaces the rate of an existing tax, keeping its position.
    TaxRateOverride { tax: String, rate: Decimal },
}

/// A named set of deltas applied together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub deltas: Vec<ScenarioDelta>,
}

impl Scenario {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            deltas: Vec::new(),
        }
    }

    pub fn with(mut self, delta: ScenarioDelta) -> Self {
        self.deltas.push(delta);
        self
    }

    /// Applies the deltas to a copy of `base`.
    ///
    /// Returns the perturbed configuration and contract amount.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` listing every bad delta (unknown role or
    /// tax, negative factor, factor that overflows) together with anything
    /// the rebuilt configuration fails on.
    pub fn apply(
        &self,
        base: &ProjectConfig,
        contract_amount: Money,
    ) -> Result<(ProjectConfig, Money), ValidationError> {
        let mut builder = base.to_builder();
        let mut contract_amount = contract_amount;
        let mut duration = i64::from(base.duration_months());
        let mut violations = ViolationSet::new();

        for delta in &self.deltas {
            violations.extend(apply_delta(
                delta,
                &mut builder,
                &mut contract_amount,
                &mut duration,
            ));
        }

        match u32::try_from(duration) {
            Ok(months) if months > 0 => builder = builder.duration_months(months),
            _ => violations.push(Violation::not_positive(
                "duration_months",
                Decimal::from(duration),
            )),
        }

        let built = builder.build();
        if let Err(err) = &built {
            violations.extend(err.violations().iter().cloned());
        }
        violations.finish()?;

        Ok((built?, contract_amount))
    }
}

fn check_factor(field: &str, factor: Decimal) -> Option<Violation> {
    (factor < Decimal::ZERO).then(|| Violation::negative(field, factor))
}

fn scale_money(amount: &mut Money, factor: Decimal, field: &str) -> Option<Violation> {
    match amount.checked_scale(factor) {
        Some(scaled) => {
            *amount = scaled;
            None
        }
        None => Some(Violation::overflow(field)),
    }
}

fn apply_delta(
    delta: &ScenarioDelta,
    builder: &mut ProjectConfigBuilder,
    contract_amount: &mut Money,
    duration: &mut i64,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    // A rejected factor is reported once and leaves the builder untouched.
    match delta {
        ScenarioDelta::RevenueMultiplier { factor } => {
            let field = "scenario.revenue_multiplier";
            if *factor <= Decimal::ZERO {
                violations.push(Violation::not_positive(field, *factor));
            } else {
                violations.extend(scale_money(contract_amount, *factor, field));
                if let Some(total) = builder.total_amount.as_mut() {
                    violations.extend(scale_money(total, *factor, field));
                }
            }
        }
        ScenarioDelta::DurationOffset { months } => {
            *duration += i64::from(*months);
        }
        ScenarioDelta::RoleRateMultiplier { role, factor } => {
            let field = format!("scenario.{}.rate_multiplier", role);
            let rejected = check_factor(&field, *factor);
            match builder.roles.iter_mut().find(|draft| &draft.name == role) {
                Some(_) if rejected.is_some() => {}
                Some(draft) => violations.extend(scale_money(&mut draft.rate, *factor, &field)),
                None => violations.push(Violation::unknown_reference("role", role.clone())),
            }
            violations.extend(rejected);
        }
        ScenarioDelta::AllRatesMultiplier { factor } => {
            let field = "scenario.rate_multiplier";
            match check_factor(field, *factor) {
                Some(rejected) => violations.push(rejected),
                None => {
                    for draft in &mut builder.roles {
                        violations.extend(scale_money(&mut draft.rate, *factor, field));
                    }
                }
            }
        }
        ScenarioDelta::RoleHoursMultiplier { role, factor } => {
            let field = format!("scenario.{}.hours_multiplier", role);
            let rejected = check_factor(&field, *factor);
            match builder.roles.iter_mut().find(|draft| &draft.name == role) {
                Some(_) if rejected.is_some() => {}
                Some(draft) => match draft.hours.checked_mul(*factor) {
                    Some(hours) => draft.hours = hours,
                    None => violations.push(Violation::overflow(field.as_str())),
                },
                None => violations.push(Violation::unknown_reference("role", role.clone())),
            }
            violations.extend(rejected);
        }
        ScenarioDelta::OverheadMultiplier { factor } => {
            let field = "scenario.overhead_multiplier";
            match check_factor(field, *factor) {
                Some(rejected) => violations.push(rejected),
                None => {
                    for (_, amount) in &mut builder.overhead_costs {
                        violations.extend(scale_money(amount, *factor, field));
                    }
                }
            }
        }
        ScenarioDelta::TaxRateOverride { tax, rate } => {
            match builder.taxes.iter_mut().find(|(name, _)| name == tax) {
                Some((_, current)) => *current = *rate,
                None => violations.push(Violation::unknown_reference("tax", tax.clone())),
            }
        }
    }

    violations
}

/// Runs scenarios through an orchestrator.
#[derive(Debug, Default)]
pub struct ScenarioEngine {
    orchestrator: EconomicsOrchestrator,
}

impl ScenarioEngine {
    pub fn new(orchestrator: EconomicsOrchestrator) -> Self {
        Self { orchestrator }
    }

    pub fn orchestrator(&self) -> &EconomicsOrchestrator {
        &self.orchestrator
    }

    /// Evaluates one scenario against a base configuration.
    pub fn run_scenario(
        &self,
        base: &ProjectConfig,
        contract_amount: Money,
        scenario: &Scenario,
    ) -> Result<EconomicsResult, ValidationError> {
        debug!(
            scenario = %scenario.name,
            deltas = scenario.deltas.len(),
            "Running scenario"
        );
        let (config, contract_amount) = scenario.apply(base, contract_amount)?;
        self.orchestrator.calculate(contract_amount, config)
    }

    /// Lazily evaluates scenarios in order.
    pub fn run_batch<'a>(
        &'a self,
        base: &'a ProjectConfig,
        contract_amount: Money,
        scenarios: &'a [Scenario],
    ) -> impl Iterator<Item = Result<EconomicsResult, ValidationError>> + 'a {
        scenarios
            .iter()
            .map(move |scenario| self.run_scenario(base, contract_amount, scenario))
    }

    /// Evaluates scenarios in parallel; results keep the input order.
    pub fn run_batch_parallel(
        &self,
        base: &ProjectConfig,
        contract_amount: Money,
        scenarios: &[Scenario],
    ) -> Vec<Result<EconomicsResult, ValidationError>> {
        scenarios
            .par_iter()
            .map(|scenario| self.run_scenario(base, contract_amount, scenario))
            .collect()
    }
}
