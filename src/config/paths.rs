//! Path management for spendbook
//!
//! Resolves the data directory holding the user registry, the
//! remember-me record, and one ledger file per username.
//!
//! ## Path Resolution Order
//!
//! 1. `SPENDBOOK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/spendbook` or `~/.config/spendbook`
//! 3. Windows: `%APPDATA%\spendbook`

use std::path::PathBuf;

use crate::error::SpendbookError;

/// Manages all paths used by spendbook
#[derive(Debug, Clone)]
pub struct DataPaths {
    /// Base directory for all spendbook data
    base_dir: PathBuf,
}

impl DataPaths {
    /// Create a new DataPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no base directory can be determined.
    pub fn new() -> Result<Self, SpendbookError> {
        let base_dir = if let Ok(custom) = std::env::var("SPENDBOOK_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create DataPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the user registry file
    pub fn users_file(&self) -> PathBuf {
        self.base_dir.join("users.json")
    }

    /// Get the path to the remember-me record
    pub fn remember_file(&self) -> PathBuf {
        self.base_dir.join("remember.json")
    }

    /// Get the path to a user's ledger file
    ///
    /// Usernames are validated at registration to be safe path components.
    pub fn ledger_file(&self, username: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", username))
    }

    /// Ensure the data directory exists
    pub fn ensure_directories(&self) -> Result<(), SpendbookError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SpendbookError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, SpendbookError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME")
                .map_err(|_| SpendbookError::Config("HOME environment variable not set".into()))?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("spendbook"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, SpendbookError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| SpendbookError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("spendbook"))
}
