//! spendbook - ledger and account management core for a personal
//! expense tracker
//!
//! This library implements the non-presentation half of a single-user
//! expense tracking application: credential verification, per-user
//! ledger persistence, expense CRUD with search, budget accounting,
//! CSV import/export, and category aggregation. Window rendering,
//! charts, and dialogs are left to an external presentation layer that
//! calls into these modules and renders what they return.
//!
//! # Architecture
//!
//! - `config`: data-directory path management
//! - `error`: custom error types
//! - `models`: core data models (money, expenses, ledgers)
//! - `auth`: password hashing and the credential store
//! - `storage`: JSON file storage with atomic writes
//! - `services`: business logic (the ledger session, CSV import)
//! - `export`: CSV export
//! - `reports`: category aggregation for charts and reports
//!
//! # Example
//!
//! ```rust,ignore
//! use spendbook::auth::CredentialStore;
//! use spendbook::config::DataPaths;
//! use spendbook::services::{ExpenseDraft, LedgerSession};
//! use spendbook::storage::LedgerStore;
//!
//! let paths = DataPaths::new()?;
//! let mut credentials = CredentialStore::open(paths.clone())?;
//! credentials.register("alice", "pw123")?;
//! credentials.authenticate("alice", "pw123")?;
//!
//! let mut session = LedgerSession::open(LedgerStore::new(paths), "alice");
//! session.set_budget("100")?;
//! session.add_expense(&ExpenseDraft::new("Food", "60", "lunch"))?;
//! let summary = session.summary();
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{SpendbookError, SpendbookResult};
