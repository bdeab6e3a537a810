//! Report aggregation for spendbook
//!
//! Computes the figures consumed by external chart and report rendering.

pub mod category;

pub use category::{aggregate_by_category, CategoryTotal, ReportSummary};
