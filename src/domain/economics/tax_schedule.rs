//! Ordered tax schedule.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::domain::foundation::{ValidationError, Violation};

/// A named tax rate, `0 <= rate < 1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxRate {
    pub name: String,
    pub rate: Decimal,
}

impl TaxRate {
    pub fn new(name: impl Into<String>, rate: Decimal) -> Self {
        Self {
            name: name.into(),
            rate,
        }
    }

    /// Returns the invariants this rate breaks.
    pub fn violations(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        if self.name.trim().is_empty() {
            violations.push(Violation::empty_field("taxes.name"));
        }
        if (self.rate.is_sign_negative() && !self.rate.is_zero()) || self.rate >= Decimal::ONE {
            violations.push(Violation::out_of_range(
                format!("taxes.{}", self.name),
                "[0, 1)",
                self.rate,
            ));
        }
        violations
    }
}

/// Taxes in the order they are deducted.
///
/// Built from an unordered mapping the order is ascending tax name; built
/// from an explicit sequence the caller's order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TaxScheduleData", into = "Vec<TaxRate>")]
pub struct TaxSchedule(Vec<TaxRate>);

impl TaxSchedule {
    /// A schedule with no taxes.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a schedule that deducts taxes in the given order.
    pub fn ordered<I, S>(rates: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        let rates: Vec<TaxRate> = rates
            .into_iter()
            .map(|(name, rate)| TaxRate::new(name, rate))
            .collect();

        let mut violations = Vec::new();
        let mut seen = HashSet::new();
        for rate in &rates {
            violations.extend(rate.violations());
            if !seen.insert(rate.name.as_str()) {
                violations.push(Violation::duplicate_name("tax", rate.name.clone()));
            }
        }

        if violations.is_empty() {
            Ok(Self(rates))
        } else {
            Err(ValidationError::new(violations))
        }
    }

    /// Builds a schedule in canonical (ascending name) order.
    pub fn from_map(rates: BTreeMap<String, Decimal>) -> Result<Self, ValidationError> {
        Self::ordered(rates)
    }

    pub fn as_slice(&self) -> &[TaxRate] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaxRate> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<TaxSchedule> for Vec<TaxRate> {
    fn from(schedule: TaxSchedule) -> Self {
        schedule.0
    }
}

/// Wire form: either an ordered list or a name → rate mapping.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum TaxScheduleData {
    Ordered(Vec<TaxRate>),
    Mapping(BTreeMap<String, Decimal>),
}

impl TryFrom<TaxScheduleData> for TaxSchedule {
    type Error = ValidationError;

    fn try_from(data: TaxScheduleData) -> Result<Self, Self::Error> {
        match data {
            TaxScheduleData::Ordered(rates) => {
                TaxSchedule::ordered(rates.into_iter().map(|t| (t.name, t.rate)))
            }
            TaxScheduleData::Mapping(map) => TaxSchedule::from_map(map),
        }
    }
}
