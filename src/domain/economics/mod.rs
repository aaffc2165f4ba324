//! Economics module - Project inputs, reference data and calculation results.
//!
//! Everything here is an immutable value object validated at construction.
//! The services that compute on these values live in [`crate::domain::analysis`].

mod benchmarks;
mod project_config;
mod result;
mod tax_schedule;
mod team_role;
mod templates;

pub use benchmarks::{BenchmarkCatalog, BenchmarkRange, MarketBenchmark, RangePosition};
pub use project_config::{ProjectConfig, ProjectConfigBuilder, ProjectConfigSpec, RoleSpec};
pub use result::{EconomicsResult, ProfitGrade, Roi};
pub use tax_schedule::{TaxRate, TaxSchedule};
pub use team_role::TeamRole;
pub use templates::{TeamTemplate, TemplateCatalog};
