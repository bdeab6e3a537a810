//! Expense model
//!
//! One dated, categorized, amount-bearing entry in a ledger.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::money::Money;

/// Category assigned when the caller supplies none
pub const DEFAULT_CATEGORY: &str = "Others";

/// Categories offered by presentation layers; the field itself is free-form
pub const SUGGESTED_CATEGORIES: [&str; 5] = ["Food", "Transport", "Shopping", "Bills", "Others"];

/// Timestamp format used for generated expense dates
///
/// Lexicographic order on this format is chronological order, which the
/// date-descending sort in [`filter`](crate::services::LedgerSession::filter)
/// relies on.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The current local time rendered in [`DATE_FORMAT`]
pub fn current_timestamp() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

/// A single expense entry
///
/// The date is kept as the string it was created or imported with; imports
/// accept arbitrary date text and searches match on the rendered form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier, stable for the lifetime of the entry
    pub id: ExpenseId,

    /// Creation or user-supplied date string
    pub date: String,

    /// Category label (free-form; see [`SUGGESTED_CATEGORIES`])
    pub category: String,

    /// Amount spent
    pub amount: Money,

    /// Optional free-text note
    #[serde(default)]
    pub note: String,
}

impl Expense {
    /// Create a new expense dated now, with a fresh identifier
    pub fn new(category: impl Into<String>, amount: Money, note: impl Into<String>) -> Self {
        Self {
            id: ExpenseId::new(),
            date: current_timestamp(),
            category: normalize_category(category.into()),
            amount,
            note: note.into(),
        }
    }

    /// Create an expense with every field supplied (used by CSV import)
    pub fn from_parts(
        id: ExpenseId,
        date: String,
        category: String,
        amount: Money,
        note: String,
    ) -> Self {
        Self {
            id,
            date,
            category: normalize_category(category),
            amount,
            note,
        }
    }

    /// Case-insensitive substring match against category, note, and date
    ///
    /// `query` must already be lowercased.
    pub fn matches_query(&self, query: &str) -> bool {
        self.category.to_lowercase().contains(query)
            || self.note.to_lowercase().contains(query)
            || self.date.to_lowercase().contains(query)
    }
}

/// Blank category input falls back to [`DEFAULT_CATEGORY`]
pub fn normalize_category(category: String) -> String {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        DEFAULT_CATEGORY.to_string()
    } else {
        trimmed.to_string()
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.category, self.amount)
    }
}
