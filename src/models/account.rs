use serde::{Deserialize, Serialize};

use crate::constants::{
    MAX_EMAIL_LEN, MAX_PASSWORD_LEN, MSG_FIELD_TOO_LONG, MSG_MISSING_FIELDS,
};

/// Account record stored in redb
/// Uses Unix timestamp for compact storage with bincode
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountRecord {
    /// Login email (unique)
    pub email: String,
    /// SHA-256 of password + server pepper (hex)
    pub password_digest: String,
    /// When the account was created (Unix timestamp)
    pub created_at: i64,
}

/// Account as seen by handlers and templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: u64,
    pub email: String,
}

impl Account {
    pub fn from_record(id: u64, record: AccountRecord) -> Self {
        Self {
            id,
            email: record.email,
        }
    }

    /// Check submitted credentials before they touch the store
    ///
    /// Returns the flash message to show when the form is unusable.
    pub fn validate_credentials(email: &str, password: &str) -> Result<(), &'static str> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(MSG_MISSING_FIELDS);
        }
        if email.chars().count() > MAX_EMAIL_LEN || password.chars().count() > MAX_PASSWORD_LEN {
            return Err(MSG_FIELD_TOO_LONG);
        }
        Ok(())
    }
}
