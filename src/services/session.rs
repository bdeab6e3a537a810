//! Ledger session service
//!
//! Owns the ledger loaded for the authenticated user and carries every
//! mutation through to the ledger store. An explicit session object
//! replaces ambient "current user" state, so tests and multiple
//! sessions need no globals.
//!
//! Every operation either fully succeeds, with the new state persisted,
//! or fully fails with the in-memory ledger unchanged: mutations are
//! rolled back when the save does not go through.

use std::collections::HashSet;
use std::io::Read;

use tracing::info;

use crate::error::{SpendbookError, SpendbookResult};
use crate::models::{normalize_category, BudgetSummary, Expense, ExpenseId, Ledger, Money};
use crate::services::import::{read_expenses_csv, ImportOutcome};
use crate::storage::LedgerStore;

/// User-supplied fields for creating or editing an expense
///
/// The amount arrives as the raw string the user typed; parsing it is
/// the service's job and a parse failure is a validation error.
#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    pub category: String,
    pub amount: String,
    pub note: String,
}

impl ExpenseDraft {
    pub fn new(
        category: impl Into<String>,
        amount: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            amount: amount.into(),
            note: note.into(),
        }
    }
}

/// Result of adding an expense
#[derive(Debug, Clone)]
pub struct ExpenseAdded {
    /// The created entry
    pub expense: Expense,
    /// Whether total spending now exceeds the budget (meaningful only
    /// when a budget is set)
    pub over_budget: bool,
}

/// The active session over one user's ledger
pub struct LedgerSession {
    store: LedgerStore,
    username: String,
    ledger: Ledger,
}

impl LedgerSession {
    /// Open a session for a username, loading their ledger
    pub fn open(store: LedgerStore, username: impl Into<String>) -> Self {
        let username = username.into();
        let ledger = store.load(&username);
        Self {
            store,
            username,
            ledger,
        }
    }

    /// The username this session belongs to
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The ledger as currently held in memory
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// All expenses in insertion order
    pub fn expenses(&self) -> &[Expense] {
        &self.ledger.expenses
    }

    /// Add a new expense and persist the ledger
    ///
    /// Returns the created entry plus whether spending now exceeds the
    /// budget, so the caller can warn immediately.
    pub fn add_expense(&mut self, draft: &ExpenseDraft) -> SpendbookResult<ExpenseAdded> {
        let amount = parse_amount(&draft.amount)?;
        let expense = Expense::new(draft.category.clone(), amount, draft.note.trim());

        self.ledger.expenses.push(expense.clone());
        if let Err(e) = self.persist() {
            self.ledger.expenses.pop();
            return Err(e);
        }

        Ok(ExpenseAdded {
            expense,
            over_budget: self.ledger.summary().over_budget,
        })
    }

    /// Edit an existing expense in place and persist the ledger
    ///
    /// Only category, amount, and note change; id and date are stable.
    pub fn edit_expense(&mut self, id: ExpenseId, draft: &ExpenseDraft) -> SpendbookResult<Expense> {
        let amount = parse_amount(&draft.amount)?;

        let expense = self
            .ledger
            .find_mut(id)
            .ok_or_else(|| SpendbookError::expense_not_found(id.to_string()))?;

        let previous = expense.clone();
        expense.category = normalize_category(draft.category.clone());
        expense.amount = amount;
        expense.note = draft.note.trim().to_string();
        let updated = expense.clone();

        if let Err(e) = self.persist() {
            if let Some(expense) = self.ledger.find_mut(id) {
                *expense = previous;
            }
            return Err(e);
        }

        Ok(updated)
    }

    /// Delete one expense by id and persist the ledger
    pub fn delete_expense(&mut self, id: ExpenseId) -> SpendbookResult<()> {
        let index = self
            .ledger
            .expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| SpendbookError::expense_not_found(id.to_string()))?;

        let removed = self.ledger.expenses.remove(index);
        if let Err(e) = self.persist() {
            self.ledger.expenses.insert(index, removed);
            return Err(e);
        }

        Ok(())
    }

    /// Clear the entire expense collection; irreversible once persisted
    pub fn delete_all(&mut self) -> SpendbookResult<()> {
        let previous = std::mem::take(&mut self.ledger.expenses);
        if let Err(e) = self.persist() {
            self.ledger.expenses = previous;
            return Err(e);
        }

        Ok(())
    }

    /// Set the monthly budget; zero unsets it
    pub fn set_budget(&mut self, amount: &str) -> SpendbookResult<Money> {
        let budget = parse_amount(amount)?;
        if budget.is_negative() {
            return Err(SpendbookError::Validation(
                "Budget must not be negative".into(),
            ));
        }

        let previous = self.ledger.monthly_budget;
        self.ledger.monthly_budget = budget;
        if let Err(e) = self.persist() {
            self.ledger.monthly_budget = previous;
            return Err(e);
        }

        Ok(budget)
    }

    /// Update the profile avatar reference
    pub fn set_avatar(&mut self, avatar: Option<String>) -> SpendbookResult<()> {
        let previous = std::mem::replace(&mut self.ledger.profile.avatar, avatar);
        if let Err(e) = self.persist() {
            self.ledger.profile.avatar = previous;
            return Err(e);
        }

        Ok(())
    }

    /// The current budget summary
    pub fn summary(&self) -> BudgetSummary {
        self.ledger.summary()
    }

    /// Expenses sorted by date descending, optionally narrowed by a query
    ///
    /// A non-empty query keeps the expenses whose category, note, or
    /// date contain it case-insensitively. The view is recomputed from
    /// the live ledger on every call; nothing is cached.
    pub fn filter(&self, query: &str) -> Vec<Expense> {
        let query = query.to_lowercase();

        let mut results: Vec<Expense> = self
            .ledger
            .expenses
            .iter()
            .filter(|e| query.is_empty() || e.matches_query(&query))
            .cloned()
            .collect();
        results.sort_by(|a, b| b.date.cmp(&a.date));
        results
    }

    /// Import expenses from CSV, appending and persisting as one batch
    pub fn import_csv<R: Read>(&mut self, reader: R) -> SpendbookResult<ImportOutcome> {
        let existing_ids: HashSet<ExpenseId> =
            self.ledger.expenses.iter().map(|e| e.id).collect();
        let outcome = read_expenses_csv(reader, &existing_ids)?;

        let previous_len = self.ledger.expenses.len();
        self.ledger.expenses.extend(outcome.added.iter().cloned());
        if let Err(e) = self.persist() {
            self.ledger.expenses.truncate(previous_len);
            return Err(e);
        }

        info!(
            username = %self.username,
            added = outcome.added.len(),
            skipped = outcome.skipped,
            "csv import completed"
        );
        Ok(outcome)
    }

    /// Persist the current ledger state
    ///
    /// Mutating operations save on their own; this is the hook for
    /// session end (logout, window close).
    pub fn save(&self) -> SpendbookResult<()> {
        self.persist()
    }

    fn persist(&self) -> SpendbookResult<()> {
        self.store.save(&self.username, &self.ledger)
    }
}

/// Parse a user-supplied amount string
fn parse_amount(s: &str) -> SpendbookResult<Money> {
    Money::parse(s).map_err(|e| SpendbookError::Validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DataPaths;
    use tempfile::TempDir;

    fn open_session(username: &str) -> (TempDir, LedgerSession) {
        let temp_dir = TempDir::new().unwrap();
        let paths = DataPaths::with_base_dir(temp_dir.path().to_path_buf());
        let session = LedgerSession::open(LedgerStore::new(paths), username);
        (temp_dir, session)
    }

    fn reload(temp_dir: &TempDir, username: &str) -> Ledger {
        let paths = DataPaths::with_base_dir(temp_dir.path().to_path_buf());
        LedgerStore::new(paths).load(username)
    }

    #[test]
    fn test_fresh_session_has_empty_ledger() {
        let (_temp_dir, session) = open_session("alice");

        assert!(session.expenses().is_empty());
        assert!(session.summary().budget.is_zero());
    }

    #[test]
    fn test_add_expense_persists() {
        let (temp_dir, mut session) = open_session("alice");

        let added = session
            .add_expense(&ExpenseDraft::new("Food", "60", "lunch"))
            .unwrap();
        assert_eq!(added.expense.category, "Food");
        assert_eq!(added.expense.amount.cents(), 6000);
        assert!(!added.over_budget);

        let on_disk = reload(&temp_dir, "alice");
        assert_eq!(on_disk.expenses.len(), 1);
        assert_eq!(on_disk.expenses[0].id, added.expense.id);
    }

    #[test]
    fn test_add_expense_rejects_bad_amount() {
        let (_temp_dir, mut session) = open_session("alice");

        let err = session
            .add_expense(&ExpenseDraft::new("Food", "sixty", ""))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(session.expenses().is_empty());
    }

    #[test]
    fn test_summary_within_budget() {
        let (_temp_dir, mut session) = open_session("alice");

        session.set_budget("100").unwrap();
        session
            .add_expense(&ExpenseDraft::new("Food", "60", "lunch"))
            .unwrap();

        let s = session.summary();
        assert_eq!(s.budget.cents(), 10000);
        assert_eq!(s.total_spent.cents(), 6000);
        assert_eq!(s.remaining.cents(), 4000);
        assert!(!s.over_budget);
    }

    #[test]
    fn test_exceeding_budget_flags_add_and_reports_negative_remaining() {
        let (_temp_dir, mut session) = open_session("alice");

        session.set_budget("100").unwrap();
        session
            .add_expense(&ExpenseDraft::new("Food", "60", "lunch"))
            .unwrap();
        let added = session
            .add_expense(&ExpenseDraft::new("Transport", "50", ""))
            .unwrap();
        assert!(added.over_budget);

        let s = session.summary();
        assert_eq!(s.total_spent.cents(), 11000);
        assert_eq!(s.remaining.cents(), -1000);
        assert!(s.over_budget);
    }

    #[test]
    fn test_over_budget_false_without_budget() {
        let (_temp_dir, mut session) = open_session("alice");

        let added = session
            .add_expense(&ExpenseDraft::new("Food", "9999", ""))
            .unwrap();
        assert!(!added.over_budget);
        assert!(!session.summary().over_budget);
    }

    #[test]
    fn test_edit_expense_keeps_id_and_date() {
        let (temp_dir, mut session) = open_session("alice");

        let added = session
            .add_expense(&ExpenseDraft::new("Food", "60", "lunch"))
            .unwrap();
        let id = added.expense.id;
        let date = added.expense.date.clone();

        let updated = session
            .edit_expense(id, &ExpenseDraft::new("Bills", "60", "lunch"))
            .unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(updated.date, date);
        assert_eq!(updated.category, "Bills");
        assert_eq!(updated.amount.cents(), 6000);
        assert_eq!(updated.note, "lunch");

        let on_disk = reload(&temp_dir, "alice");
        assert_eq!(on_disk.expenses[0].category, "Bills");
    }

    #[test]
    fn test_edit_unknown_expense_fails() {
        let (_temp_dir, mut session) = open_session("alice");

        let err = session
            .edit_expense(ExpenseId::new(), &ExpenseDraft::new("Food", "1", ""))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_edit_with_bad_amount_changes_nothing() {
        let (_temp_dir, mut session) = open_session("alice");

        let added = session
            .add_expense(&ExpenseDraft::new("Food", "60", "lunch"))
            .unwrap();
        let err = session
            .edit_expense(added.expense.id, &ExpenseDraft::new("Bills", "oops", ""))
            .unwrap_err();
        assert!(err.is_validation());

        let current = session.expenses()[0].clone();
        assert_eq!(current, added.expense);
    }

    #[test]
    fn test_delete_expense_removes_exactly_one() {
        let (temp_dir, mut session) = open_session("alice");

        let first = session
            .add_expense(&ExpenseDraft::new("Food", "60", "lunch"))
            .unwrap();
        let second = session
            .add_expense(&ExpenseDraft::new("Transport", "50", "bus"))
            .unwrap();

        session.delete_expense(first.expense.id).unwrap();

        assert_eq!(session.expenses().len(), 1);
        assert_eq!(session.expenses()[0], second.expense);
        assert_eq!(reload(&temp_dir, "alice").expenses.len(), 1);

        let err = session.delete_expense(first.expense.id).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_all() {
        let (temp_dir, mut session) = open_session("alice");

        session
            .add_expense(&ExpenseDraft::new("Food", "60", ""))
            .unwrap();
        session
            .add_expense(&ExpenseDraft::new("Transport", "50", ""))
            .unwrap();

        session.delete_all().unwrap();

        assert!(session.expenses().is_empty());
        assert!(reload(&temp_dir, "alice").expenses.is_empty());
    }

    #[test]
    fn test_total_spent_tracks_adds_and_deletes() {
        let (_temp_dir, mut session) = open_session("alice");

        let a = session
            .add_expense(&ExpenseDraft::new("Food", "10", ""))
            .unwrap();
        session
            .add_expense(&ExpenseDraft::new("Food", "20", ""))
            .unwrap();
        session
            .add_expense(&ExpenseDraft::new("Food", "30", ""))
            .unwrap();
        assert_eq!(session.summary().total_spent.cents(), 6000);

        session.delete_expense(a.expense.id).unwrap();
        assert_eq!(session.summary().total_spent.cents(), 5000);
    }

    #[test]
    fn test_set_budget_validation() {
        let (_temp_dir, mut session) = open_session("alice");

        assert!(session.set_budget("abc").unwrap_err().is_validation());
        assert!(session.set_budget("-5").unwrap_err().is_validation());

        session.set_budget("100").unwrap();
        assert_eq!(session.summary().budget.cents(), 10000);

        // Zero unsets the budget
        session.set_budget("0").unwrap();
        assert!(session.summary().budget.is_zero());
    }

    #[test]
    fn test_filter_sorts_date_descending() {
        let (_temp_dir, mut session) = open_session("alice");

        session
            .add_expense(&ExpenseDraft::new("Food", "10", ""))
            .unwrap();
        session
            .add_expense(&ExpenseDraft::new("Transport", "20", ""))
            .unwrap();

        // Force distinct, known dates
        session.ledger.expenses[0].date = "2025-01-10 08:00:00".into();
        session.ledger.expenses[1].date = "2025-02-01 08:00:00".into();

        let all = session.filter("");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].category, "Transport");
        assert_eq!(all[1].category, "Food");
    }

    #[test]
    fn test_filter_matches_category_note_and_date() {
        let (_temp_dir, mut session) = open_session("alice");

        session
            .add_expense(&ExpenseDraft::new("Food", "10", "team LUNCH"))
            .unwrap();
        session
            .add_expense(&ExpenseDraft::new("Transport", "20", "bus"))
            .unwrap();
        session.ledger.expenses[1].date = "2024-12-31 09:00:00".into();

        assert_eq!(session.filter("food").len(), 1);
        assert_eq!(session.filter("lunch").len(), 1);
        assert_eq!(session.filter("2024-12").len(), 1);
        assert_eq!(session.filter("nothing-matches").len(), 0);
    }

    #[test]
    fn test_filter_is_fresh_each_call() {
        let (_temp_dir, mut session) = open_session("alice");

        assert!(session.filter("").is_empty());
        session
            .add_expense(&ExpenseDraft::new("Food", "10", ""))
            .unwrap();
        assert_eq!(session.filter("").len(), 1);
    }

    #[test]
    fn test_set_avatar_persists() {
        let (temp_dir, mut session) = open_session("alice");

        session.set_avatar(Some("/tmp/avatar.png".into())).unwrap();
        assert_eq!(
            reload(&temp_dir, "alice").profile.avatar.as_deref(),
            Some("/tmp/avatar.png")
        );

        session.set_avatar(None).unwrap();
        assert_eq!(reload(&temp_dir, "alice").profile.avatar, None);
    }

    #[test]
    fn test_import_csv_batch() {
        let (temp_dir, mut session) = open_session("alice");

        let csv_data = "date,category,amount,note\n\
                        2025-01-15,Food,60.00,lunch\n\
                        2025-01-16,Transport,abc,bad\n\
                        2025-01-17,Bills,30.00,rent";
        let outcome = session.import_csv(csv_data.as_bytes()).unwrap();

        assert_eq!(outcome.added.len(), 2);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(session.expenses().len(), 2);
        assert_eq!(reload(&temp_dir, "alice").expenses.len(), 2);
    }

    #[test]
    fn test_sessions_reopen_from_disk() {
        let (temp_dir, mut session) = open_session("alice");
        session
            .add_expense(&ExpenseDraft::new("Food", "60", "lunch"))
            .unwrap();
        session.save().unwrap();
        drop(session);

        let paths = DataPaths::with_base_dir(temp_dir.path().to_path_buf());
        let session2 = LedgerSession::open(LedgerStore::new(paths), "alice");
        assert_eq!(session2.expenses().len(), 1);
        assert_eq!(session2.expenses()[0].note, "lunch");
    }
}
