//! Storage layer for spendbook
//!
//! JSON file storage with atomic writes and automatic directory
//! creation: per-user ledger files plus the remember-me record.

pub mod file_io;
pub mod ledgers;
pub mod remember;

pub use file_io::{read_json, write_json_atomic};
pub use ledgers::LedgerStore;
