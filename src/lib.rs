//! Tender Economics - Project economics engine for tender evaluation
//!
//! Given a tender's contract amount, a staffing plan, overhead costs and tax
//! rules, this crate computes profitability, ROI, margin and a qualitative
//! risk rating, re-evaluates what-if scenarios and compares results against
//! market benchmarks.
//!
//! The domain layer performs no I/O; configuration and reference-data
//! loading live in [`config`].

pub mod config;
pub mod domain;
