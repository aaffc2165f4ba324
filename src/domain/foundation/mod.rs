//! Foundation module - Shared domain primitives.
//!
//! Contains the value objects, enums and error types that form the
//! vocabulary of the economics domain.

mod errors;
mod money;
mod percentage;
mod project_type;
mod risk_level;

pub use errors::{
    EconomicsError, ErrorCode, NotFoundError, ResourceKind, Severity, ValidationError, Violation,
    ViolationSet,
};
pub use money::Money;
pub use percentage::Percentage;
pub use project_type::ProjectType;
pub use risk_level::RiskLevel;
