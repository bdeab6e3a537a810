//! Core data models for spendbook
//!
//! This module contains the data structures that represent the expense
//! tracking domain: money, expenses, ledgers, and budget summaries.

pub mod expense;
pub mod ids;
pub mod ledger;
pub mod money;

pub use expense::{
    current_timestamp, normalize_category, Expense, DATE_FORMAT, DEFAULT_CATEGORY,
    SUGGESTED_CATEGORIES,
};
pub use ids::ExpenseId;
pub use ledger::{BudgetSummary, Ledger, Profile};
pub use money::Money;
