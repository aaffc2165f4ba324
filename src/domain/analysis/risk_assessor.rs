//! Risk Assessor - Rule-based qualitative risk classification.
//!
//! Each rule looks at one signal and either sets a level or asks for an
//! escalation. The assessor takes the highest level set by any rule and then
//! escalates it once per escalation signal, capped at `Critical`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::economics::{EconomicsResult, ProjectConfig};
use crate::domain::foundation::{Percentage, RiskLevel};

/// Tunable thresholds for the standard rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Margins strictly below this are `High` risk.
    #[serde(default = "default_high_risk_margin")]
    pub high_risk_margin: Decimal,

    /// Margins strictly above this are `Low` risk; in between is `Medium`.
    #[serde(default = "default_low_risk_margin")]
    pub low_risk_margin: Decimal,

    /// Durations strictly above this many months escalate one level.
    #[serde(default = "default_long_duration_months")]
    pub long_duration_months: u32,

    /// A single role whose allocation fraction is strictly above this
    /// escalates one level.
    #[serde(default = "default_concentration_share")]
    pub concentration_share: Decimal,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high_risk_margin: default_high_risk_margin(),
            low_risk_margin: default_low_risk_margin(),
            long_duration_months: default_long_duration_months(),
            concentration_share: default_concentration_share(),
        }
    }
}

fn default_high_risk_margin() -> Decimal {
    Decimal::from(5)
}

fn default_low_risk_margin() -> Decimal {
    Decimal::from(15)
}

fn default_long_duration_months() -> u32 {
    12
}

fn default_concentration_share() -> Decimal {
    Decimal::new(5, 1)
}

/// Which signal a rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskSignalKind {
    Margin,
    Duration,
    Concentration,
}

/// What a fired rule does to the overall level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "effect", content = "level")]
pub enum RiskEffect {
    /// Sets a floor for the overall level.
    Level(RiskLevel),
    /// Raises the overall level by one step.
    Escalate,
}

/// A rule that fired, with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RiskSignal {
    pub kind: RiskSignalKind,
    pub effect: RiskEffect,
    pub reason: String,
}

impl RiskSignal {
    pub fn level(kind: RiskSignalKind, level: RiskLevel, reason: impl Into<String>) -> Self {
        Self {
            kind,
            effect: RiskEffect::Level(level),
            reason: reason.into(),
        }
    }

    pub fn escalate(kind: RiskSignalKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            effect: RiskEffect::Escalate,
            reason: reason.into(),
        }
    }
}

/// Overall level plus the signals that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub signals: Vec<RiskSignal>,
}

/// Inputs a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct RiskInput<'a> {
    pub margin: Percentage,
    pub config: &'a ProjectConfig,
}

/// A single, independently testable risk rule.
pub trait RiskRule: fmt::Debug + Send + Sync {
    fn kind(&self) -> RiskSignalKind;

    /// Returns a signal if the rule fires.
    fn evaluate(&self, input: &RiskInput<'_>) -> Option<RiskSignal>;
}

/// Thin margins carry more risk.
#[derive(Debug, Clone)]
pub struct MarginRule {
    pub high_risk_below: Decimal,
    pub low_risk_above: Decimal,
}

impl RiskRule for MarginRule {
    fn kind(&self) -> RiskSignalKind {
        RiskSignalKind::Margin
    }

    fn evaluate(&self, input: &RiskInput<'_>) -> Option<RiskSignal> {
        let margin = input.margin.value();
        let (level, reason) = if margin < self.high_risk_below {
            (
                RiskLevel::High,
                format!("Profit margin {} is below {}%", input.margin, self.high_risk_below),
            )
        } else if margin > self.low_risk_above {
            (
                RiskLevel::Low,
                format!("Profit margin {} is above {}%", input.margin, self.low_risk_above),
            )
        } else {
            (
                RiskLevel::Medium,
                format!(
                    "Profit margin {} is between {}% and {}%",
                    input.margin, self.high_risk_below, self.low_risk_above
                ),
            )
        };
        Some(RiskSignal::level(self.kind(), level, reason))
    }
}

/// Long projects are exposed to schedule slips and inflation.
#[derive(Debug, Clone)]
pub struct DurationRule {
    pub max_months: u32,
}

impl RiskRule for DurationRule {
    fn kind(&self) -> RiskSignalKind {
        RiskSignalKind::Duration
    }

    fn evaluate(&self, input: &RiskInput<'_>) -> Option<RiskSignal> {
        let months = input.config.duration_months();
        (months > self.max_months).then(|| {
            RiskSignal::escalate(
                self.kind(),
                format!("Project lasts {} months (> {})", months, self.max_months),
            )
        })
    }
}

/// One role carrying most of the effort is a key-person dependency.
#[derive(Debug, Clone)]
pub struct ConcentrationRule {
    pub max_share: Decimal,
}

impl RiskRule for ConcentrationRule {
    fn kind(&self) -> RiskSignalKind {
        RiskSignalKind::Concentration
    }

    fn evaluate(&self, input: &RiskInput<'_>) -> Option<RiskSignal> {
        let heaviest = input
            .config
            .team()
            .values()
            .max_by_key(|role| role.allocation())?;

        (heaviest.allocation() > self.max_share).then(|| {
            RiskSignal::escalate(
                self.kind(),
                format!(
                    "Role '{}' is allocated {} of total effort (> {})",
                    heaviest.name(),
                    Percentage::from_fraction(heaviest.allocation()),
                    Percentage::from_fraction(self.max_share)
                ),
            )
        })
    }
}

/// Classifier combining independent rules by worst case.
#[derive(Debug)]
pub struct RiskAssessor {
    rules: Vec<Box<dyn RiskRule>>,
}

impl Default for RiskAssessor {
    fn default() -> Self {
        Self::new(&RiskThresholds::default())
    }
}

impl RiskAssessor {
    /// Creates an assessor with the standard margin, duration and concentration rules.
    pub fn new(thresholds: &RiskThresholds) -> Self {
        Self::with_rules(vec![
            Box::new(MarginRule {
                high_risk_below: thresholds.high_risk_margin,
                low_risk_above: thresholds.low_risk_margin,
            }),
            Box::new(DurationRule {
                max_months: thresholds.long_duration_months,
            }),
            Box::new(ConcentrationRule {
                max_share: thresholds.concentration_share,
            }),
        ])
    }

    /// Creates an assessor with a custom rule set.
    pub fn with_rules(rules: Vec<Box<dyn RiskRule>>) -> Self {
        Self { rules }
    }

    /// Assesses an existing result against its configuration.
    pub fn assess(&self, result: &EconomicsResult, config: &ProjectConfig) -> RiskAssessment {
        self.evaluate(&RiskInput {
            margin: result.profit_margin(),
            config,
        })
    }

    /// Runs every rule and combines the signals.
    pub fn evaluate(&self, input: &RiskInput<'_>) -> RiskAssessment {
        let signals: Vec<RiskSignal> = self
            .rules
            .iter()
            .filter_map(|rule| rule.evaluate(input))
            .collect();

        RiskAssessment {
            level: Self::combine(&signals),
            signals,
        }
    }

    /// Highest level set by any signal, escalated once per escalation signal.
    ///
    /// # Edge Cases
    /// - No signals: `Low`
    /// - Escalations beyond `Critical` saturate
    pub fn combine(signals: &[RiskSignal]) -> RiskLevel {
        let base = signals
            .iter()
            .filter_map(|s| match s.effect {
                RiskEffect::Level(level) => Some(level),
                RiskEffect::Escalate => None,
            })
            .max()
            .unwrap_or(RiskLevel::Low);

        let escalations = signals
            .iter()
            .filter(|s| s.effect == RiskEffect::Escalate)
            .count();

        base.escalate_by(escalations)
    }
}
