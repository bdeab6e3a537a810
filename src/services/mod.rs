//! Service layer for spendbook
//!
//! Business logic on top of the storage layer: the per-user ledger
//! session and CSV import parsing.

pub mod import;
pub mod session;

pub use import::ImportOutcome;
pub use session::{ExpenseAdded, ExpenseDraft, LedgerSession};
