//! Error types for the economics domain.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// How serious a violation is.
///
/// Errors stop a calculation; warnings are carried on the result so the
/// caller can decide whether to proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A single problem found while validating economics input.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "violation", rename_all = "snake_case")]
pub enum Violation {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must not be negative, got {actual}")]
    Negative { field: String, actual: Decimal },

    #[error("Field '{field}' must be greater than zero, got {actual}")]
    NotPositive { field: String, actual: Decimal },

    #[error("Field '{field}' must be within {range}, got {actual}")]
    OutOfRange {
        field: String,
        range: String,
        actual: Decimal,
    },

    #[error("Duplicate {kind} name '{name}'")]
    DuplicateName { kind: String, name: String },

    #[error("Total team allocation {total} exceeds sanity ceiling {ceiling}")]
    OverAllocated { total: Decimal, ceiling: Decimal },

    #[error("Unknown {kind} '{name}'")]
    UnknownReference { kind: String, name: String },

    #[error("Computing '{field}' overflowed the decimal range")]
    Overflow { field: String },
}

impl Violation {
    /// Creates an empty field violation.
    pub fn empty_field(field: impl Into<String>) -> Self {
        Violation::EmptyField { field: field.into() }
    }

    /// Creates a negative value violation.
    pub fn negative(field: impl Into<String>, actual: Decimal) -> Self {
        Violation::Negative {
            field: field.into(),
            actual,
        }
    }

    /// Creates a violation for a value that must be strictly positive.
    pub fn not_positive(field: impl Into<String>, actual: Decimal) -> Self {
        Violation::NotPositive {
            field: field.into(),
            actual,
        }
    }

    /// Creates an out of range violation.
    pub fn out_of_range(field: impl Into<String>, range: impl Into<String>, actual: Decimal) -> Self {
        Violation::OutOfRange {
            field: field.into(),
            range: range.into(),
            actual,
        }
    }

    /// Creates a duplicate name violation.
    pub fn duplicate_name(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Violation::DuplicateName {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Creates an over-allocation warning.
    pub fn over_allocated(total: Decimal, ceiling: Decimal) -> Self {
        Violation::OverAllocated { total, ceiling }
    }

    /// Creates an unknown reference violation.
    pub fn unknown_reference(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Violation::UnknownReference {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Creates a violation for a figure too large to represent.
    pub fn overflow(field: impl Into<String>) -> Self {
        Violation::Overflow {
            field: field.into(),
        }
    }

    /// Over-allocation is the only warning-level violation.
    pub fn severity(&self) -> Severity {
        match self {
            Violation::OverAllocated { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Returns the error code for this violation.
    pub fn code(&self) -> ErrorCode {
        match self {
            Violation::EmptyField { .. } => ErrorCode::EmptyField,
            Violation::Negative { .. } => ErrorCode::NegativeValue,
            Violation::NotPositive { .. } => ErrorCode::NotPositive,
            Violation::OutOfRange { .. } => ErrorCode::OutOfRange,
            Violation::DuplicateName { .. } => ErrorCode::DuplicateName,
            Violation::OverAllocated { .. } => ErrorCode::OverAllocated,
            Violation::UnknownReference { .. } => ErrorCode::UnknownReference,
            Violation::Overflow { .. } => ErrorCode::ArithmeticOverflow,
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    NegativeValue,
    NotPositive,
    OutOfRange,
    DuplicateName,
    OverAllocated,
    UnknownReference,
    ArithmeticOverflow,

    // Not found errors
    BenchmarkNotFound,
    TemplateNotFound,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::NegativeValue => "NEGATIVE_VALUE",
            ErrorCode::NotPositive => "NOT_POSITIVE",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::DuplicateName => "DUPLICATE_NAME",
            ErrorCode::OverAllocated => "OVER_ALLOCATED",
            ErrorCode::UnknownReference => "UNKNOWN_REFERENCE",
            ErrorCode::ArithmeticOverflow => "ARITHMETIC_OVERFLOW",
            ErrorCode::BenchmarkNotFound => "BENCHMARK_NOT_FOUND",
            ErrorCode::TemplateNotFound => "TEMPLATE_NOT_FOUND",
        };
        write!(f, "{}", s)
    }
}

/// Malformed or out-of-range input, carrying every violation found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    /// Creates a validation error from a list of violations.
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Creates a validation error with a single violation.
    pub fn single(violation: Violation) -> Self {
        Self {
            violations: vec![violation],
        }
    }

    /// Returns all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes the error, returning its violations.
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    pub fn code(&self) -> ErrorCode {
        ErrorCode::ValidationFailed
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} violation(s)",
            self.code(),
            self.violations.len()
        )?;
        for (i, violation) in self.violations.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{}{}", sep, violation)?;
        }
        Ok(())
    }
}

impl Error for ValidationError {}

/// Collects violations while validating, splitting errors from warnings.
#[derive(Debug, Clone, Default)]
pub struct ViolationSet {
    errors: Vec<Violation>,
    warnings: Vec<Violation>,
}

impl ViolationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation according to its severity.
    pub fn push(&mut self, violation: Violation) {
        match violation.severity() {
            Severity::Error => self.errors.push(violation),
            Severity::Warning => self.warnings.push(violation),
        }
    }

    /// Records every violation from an iterator.
    pub fn extend(&mut self, violations: impl IntoIterator<Item = Violation>) {
        for violation in violations {
            self.push(violation);
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Fails with every error-level violation, or returns the warnings.
    pub fn finish(self) -> Result<Vec<Violation>, ValidationError> {
        if self.errors.is_empty() {
            Ok(self.warnings)
        } else {
            Err(ValidationError::new(self.errors))
        }
    }
}

/// Kinds of reference data that can be looked up by key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Benchmark,
    Template,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResourceKind::Benchmark => "benchmark",
            ResourceKind::Template => "template",
        };
        write!(f, "{}", s)
    }
}

/// A requested benchmark or template is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFoundError {
    pub kind: ResourceKind,
    pub key: String,
}

impl NotFoundError {
    pub fn new(kind: ResourceKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            ResourceKind::Benchmark => ErrorCode::BenchmarkNotFound,
            ResourceKind::Template => ErrorCode::TemplateNotFound,
        }
    }
}

impl fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} '{}' not found", self.code(), self.kind, self.key)
    }
}

impl Error for NotFoundError {}

/// Any failure an economics operation can produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EconomicsError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

impl EconomicsError {
    pub fn code(&self) -> ErrorCode {
        match self {
            EconomicsError::Validation(err) => err.code(),
            EconomicsError::NotFound(err) => err.code(),
        }
    }
}
