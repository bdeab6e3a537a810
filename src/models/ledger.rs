//! Ledger model
//!
//! A user's full expense collection plus budget and profile metadata.
//! One ledger is persisted per username; a missing file and an empty
//! ledger are deliberately indistinguishable.

use serde::{Deserialize, Serialize};

use super::expense::Expense;
use super::ids::ExpenseId;
use super::money::Money;

/// Profile metadata attached to a ledger
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Optional avatar reference (a path chosen by the presentation layer)
    pub avatar: Option<String>,
}

/// A user's ledger: expenses, monthly budget, and profile metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    /// All expense entries, in insertion order
    #[serde(default)]
    pub expenses: Vec<Expense>,

    /// Monthly spending threshold; zero means unset
    #[serde(default)]
    pub monthly_budget: Money,

    /// Profile metadata
    #[serde(default)]
    pub profile: Profile,
}

/// Budget accounting derived from a ledger
///
/// `remaining` is `budget - total_spent` when a budget is set (negative
/// once the budget is exceeded) and zero when no budget is set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetSummary {
    pub budget: Money,
    pub total_spent: Money,
    pub remaining: Money,
    pub over_budget: bool,
}

impl Ledger {
    /// Sum of all expense amounts
    pub fn total_spent(&self) -> Money {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Compute the budget summary for the current contents
    pub fn summary(&self) -> BudgetSummary {
        let budget = self.monthly_budget;
        let total_spent = self.total_spent();
        let remaining = if budget.is_positive() {
            budget - total_spent
        } else {
            Money::zero()
        };

        BudgetSummary {
            budget,
            total_spent,
            remaining,
            over_budget: budget.is_positive() && total_spent > budget,
        }
    }

    /// Whether an expense with the given id exists
    pub fn contains(&self, id: ExpenseId) -> bool {
        self.expenses.iter().any(|e| e.id == id)
    }

    /// Look up an expense by id
    pub fn find(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Look up an expense by id, mutably
    pub fn find_mut(&mut self, id: ExpenseId) -> Option<&mut Expense> {
        self.expenses.iter_mut().find(|e| e.id == id)
    }
}
