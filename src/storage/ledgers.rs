//! Ledger persistence
//!
//! One JSON file per username. A ledger that is missing or unreadable
//! loads as the empty default; saves are whole-file atomic overwrites.

use tracing::{debug, warn};

use crate::config::DataPaths;
use crate::error::SpendbookResult;
use crate::models::Ledger;

use super::file_io::{read_json, write_json_atomic};

/// Loads and saves per-user ledger files
#[derive(Debug, Clone)]
pub struct LedgerStore {
    paths: DataPaths,
}

impl LedgerStore {
    /// Create a store over the given data directory
    pub fn new(paths: DataPaths) -> Self {
        Self { paths }
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    /// Load the ledger for a username
    ///
    /// A missing file resolves to the empty default, and so does an
    /// unreadable one: the caller never sees a read failure, only a
    /// fresh ledger. The unreadable case is logged.
    pub fn load(&self, username: &str) -> Ledger {
        let path = self.paths.ledger_file(username);
        match read_json(&path) {
            Ok(ledger) => ledger,
            Err(e) => {
                warn!(username, error = %e, "ledger file unreadable, starting from empty");
                Ledger::default()
            }
        }
    }

    /// Persist the full ledger for a username, replacing the prior state
    ///
    /// Whole-file overwrite; last writer wins. Single-writer usage is
    /// assumed per username.
    pub fn save(&self, username: &str, ledger: &Ledger) -> SpendbookResult<()> {
        self.paths.ensure_directories()?;
        write_json_atomic(self.paths.ledger_file(username), ledger)?;
        debug!(username, expenses = ledger.expenses.len(), "ledger saved");
        Ok(())
    }
}
