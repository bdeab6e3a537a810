//! Credential store: user registration and authentication
//!
//! The registry is one JSON file mapping username to password hash.
//! Registering a user also initializes their empty ledger file, so a
//! first login always finds a well-defined ledger on disk.

pub mod password;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::DataPaths;
use crate::error::{SpendbookError, SpendbookResult};
use crate::models::Ledger;
use crate::storage::{read_json, write_json_atomic, LedgerStore};

pub use password::{hash_password, verify_password};

/// Stored credential record for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "passwordHash")]
    pub password_hash: String,
}

/// Registry mapping username to password hash
///
/// Loaded fully into memory at open; every registration rewrites the
/// registry file atomically. No deletion or password-change operation
/// is exposed.
pub struct CredentialStore {
    paths: DataPaths,
    users: BTreeMap<String, UserRecord>,
}

impl CredentialStore {
    /// Open the registry from the data directory
    ///
    /// A missing registry file is an empty registry. A corrupt one is an
    /// error: silently treating it as empty would let re-registration
    /// replace existing accounts.
    pub fn open(paths: DataPaths) -> SpendbookResult<Self> {
        let users = read_json(paths.users_file())?;
        Ok(Self { paths, users })
    }

    /// Number of registered users
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the registry has no users
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Whether a username is registered
    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username.trim())
    }

    /// Register a new user and initialize their empty ledger
    ///
    /// Fails with a duplicate error if the username is taken, and with a
    /// validation error for an empty password or a username that is not
    /// a safe file-name component.
    pub fn register(&mut self, username: &str, password: &str) -> SpendbookResult<()> {
        let username = username.trim();
        validate_username(username)?;

        if password.is_empty() {
            return Err(SpendbookError::Validation("Password must not be empty".into()));
        }
        if self.users.contains_key(username) {
            return Err(SpendbookError::user_exists(username));
        }

        let record = UserRecord {
            password_hash: password::hash_password(password)?,
        };
        self.users.insert(username.to_string(), record);

        self.paths.ensure_directories()?;
        write_json_atomic(self.paths.users_file(), &self.users)?;

        // A fresh account starts with an empty ledger on disk
        LedgerStore::new(self.paths.clone()).save(username, &Ledger::default())?;

        info!(username, "user registered");
        Ok(())
    }

    /// Verify a username/password pair
    ///
    /// Unknown usernames and wrong passwords produce the same error, so
    /// callers cannot probe for registered names.
    pub fn authenticate(&self, username: &str, password: &str) -> SpendbookResult<()> {
        let username = username.trim();
        let record = self
            .users
            .get(username)
            .ok_or(SpendbookError::InvalidCredentials)?;

        if password::verify_password(password, &record.password_hash) {
            Ok(())
        } else {
            Err(SpendbookError::InvalidCredentials)
        }
    }
}

/// Usernames key a file on disk, so only safe path characters are allowed
fn validate_username(username: &str) -> SpendbookResult<()> {
    if username.is_empty() {
        return Err(SpendbookError::Validation("Username must not be empty".into()));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err(SpendbookError::Validation(format!(
            "Username may only contain letters, digits, '-', '_' and '.': {}",
            username
        )));
    }
    Ok(())
}
