//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (money, percentages, enums, errors)
//! - `economics` - Project configuration, reference data and results
//! - `analysis` - Pure domain services (costs, taxes, risk, market, scenarios)

pub mod analysis;
pub mod economics;
pub mod foundation;
