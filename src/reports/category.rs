//! Category aggregation
//!
//! Reduces an expense collection to per-category totals for the
//! external charting and report layer. Rendering happens elsewhere;
//! this module only computes the numbers.

use serde::Serialize;

use crate::models::{BudgetSummary, Expense, Ledger, Money};

/// Summed spending for one category label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
}

/// Group expenses by category label and sum amounts per group
///
/// Labels match exactly (case-sensitive). The result is ordered by
/// first occurrence, so chart legends stay stable across refreshes.
pub fn aggregate_by_category(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for expense in expenses {
        match totals.iter_mut().find(|t| t.category == expense.category) {
            Some(entry) => entry.total += expense.amount,
            None => totals.push(CategoryTotal {
                category: expense.category.clone(),
                total: expense.amount,
            }),
        }
    }

    totals
}

/// The numbers behind the one-page expense report
///
/// Budget accounting plus entry count and category breakdown; a PDF or
/// chart layer renders these however it likes.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub budget: Money,
    pub total_spent: Money,
    pub remaining: Money,
    pub over_budget: bool,
    pub entry_count: usize,
    pub by_category: Vec<CategoryTotal>,
}

impl ReportSummary {
    /// Compute the report numbers for a ledger
    pub fn generate(ledger: &Ledger) -> Self {
        let BudgetSummary {
            budget,
            total_spent,
            remaining,
            over_budget,
        } = ledger.summary();

        Self {
            budget,
            total_spent,
            remaining,
            over_budget,
            entry_count: ledger.expenses.len(),
            by_category: aggregate_by_category(&ledger.expenses),
        }
    }
}
