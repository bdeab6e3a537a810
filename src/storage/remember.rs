//! The "remember last user" record
//!
//! A single process-wide file holding the last username that asked to be
//! remembered. Its presence pre-fills the login form; deleting it is the
//! only way to forget.

use serde::{Deserialize, Serialize};

use crate::config::DataPaths;
use crate::error::SpendbookResult;

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RememberRecord {
    username: String,
}

/// Record the username to pre-fill on the next login
pub fn remember(paths: &DataPaths, username: &str) -> SpendbookResult<()> {
    paths.ensure_directories()?;
    write_json_atomic(
        paths.remember_file(),
        &RememberRecord {
            username: username.to_string(),
        },
    )
}

/// Delete the remember-me record, if present
pub fn forget(paths: &DataPaths) -> SpendbookResult<()> {
    let path = paths.remember_file();
    if path.exists() {
        std::fs::remove_file(&path)?;
    }
    Ok(())
}

/// The remembered username, if any
///
/// Absent or unreadable records both read as "nothing remembered".
pub fn remembered(paths: &DataPaths) -> Option<String> {
    let record: RememberRecord = read_json(paths.remember_file()).ok()?;
    if record.username.is_empty() {
        None
    } else {
        Some(record.username)
    }
}
