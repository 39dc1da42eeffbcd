//! Account storage operations
//!
//! All functions here are blocking and must be called from
//! `tokio::task::spawn_blocking` inside async handlers.

use chrono::Utc;
use redb::{Database, ReadableTable, ReadableTableMetadata};

use crate::db::tables;
use crate::error::Result;
use crate::models::AccountRecord;

/// Insert a new account unless the email is already registered
///
/// The uniqueness check and both inserts happen in one write transaction,
/// so concurrent registrations with the same email cannot both succeed.
///
/// Returns `Ok(None)` when the email is taken, otherwise the new account id.
pub fn insert_account(db: &Database, email: &str, password_digest: &str) -> Result<Option<u64>> {
    let write_txn = db.begin_write()?;
    let account_id = {
        let mut emails = write_txn.open_table(tables::ACCOUNT_EMAILS)?;
        if emails.get(email)?.is_some() {
            tracing::info!("Registration rejected, email already exists");
            return Ok(None);
        }

        let mut accounts = write_txn.open_table(tables::ACCOUNTS)?;
        let account_id = accounts
            .last()?
            .map(|(id, _)| id.value() + 1)
            .unwrap_or(1);

        let record = AccountRecord {
            email: email.to_string(),
            password_digest: password_digest.to_string(),
            created_at: Utc::now().timestamp(),
        };
        let bytes = bincode::serialize(&record)?;
        accounts.insert(account_id, bytes.as_slice())?;
        emails.insert(email, account_id)?;

        account_id
    };
    write_txn.commit()?;

    tracing::info!("New account registered: {}", account_id);

    Ok(Some(account_id))
}

/// Look up an account by its exact email
pub fn find_account_by_email(db: &Database, email: &str) -> Result<Option<(u64, AccountRecord)>> {
    let read_txn = db.begin_read()?;
    let emails = read_txn.open_table(tables::ACCOUNT_EMAILS)?;

    let Some(account_id) = emails.get(email)?.map(|id| id.value()) else {
        return Ok(None);
    };

    let accounts = read_txn.open_table(tables::ACCOUNTS)?;
    let record = accounts
        .get(account_id)?
        .map(|bytes| bincode::deserialize::<AccountRecord>(bytes.value()))
        .transpose()?;

    Ok(record.map(|r| (account_id, r)))
}

/// Load an account by id
pub fn get_account(db: &Database, account_id: u64) -> Result<Option<AccountRecord>> {
    let read_txn = db.begin_read()?;
    let accounts = read_txn.open_table(tables::ACCOUNTS)?;

    let record = accounts
        .get(account_id)?
        .map(|bytes| bincode::deserialize(bytes.value()))
        .transpose()?;

    Ok(record)
}

/// Number of registered accounts
pub fn count_accounts(db: &Database) -> Result<u64> {
    let read_txn = db.begin_read()?;
    let accounts = read_txn.open_table(tables::ACCOUNTS)?;
    Ok(accounts.len()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_database;
    use tempfile::TempDir;

    fn test_db(temp_dir: &TempDir) -> crate::db::Db {
        open_database(temp_dir.path().join("test.redb")).unwrap()
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let temp_dir = TempDir::new().unwrap();
        let db = test_db(&temp_dir);

        assert_eq!(insert_account(&db, "a@example.com", "d1").unwrap(), Some(1));
        assert_eq!(insert_account(&db, "b@example.com", "d2").unwrap(), Some(2));
        assert_eq!(count_accounts(&db).unwrap(), 2);
    }

    #[test]
    fn test_duplicate_email_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let db = test_db(&temp_dir);

        assert!(insert_account(&db, "a@example.com", "d1").unwrap().is_some());
        assert!(insert_account(&db, "a@example.com", "d2").unwrap().is_none());

        // No second record, original digest untouched
        assert_eq!(count_accounts(&db).unwrap(), 1);
        let (_, record) = find_account_by_email(&db, "a@example.com")
            .unwrap()
            .unwrap();
        assert_eq!(record.password_digest, "d1");
    }

    #[test]
    fn test_email_match_is_exact() {
        let temp_dir = TempDir::new().unwrap();
        let db = test_db(&temp_dir);

        insert_account(&db, "a@example.com", "d1").unwrap();

        assert!(find_account_by_email(&db, "A@example.com").unwrap().is_none());
        assert!(insert_account(&db, "A@example.com", "d2").unwrap().is_some());
    }

    #[test]
    fn test_get_account_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let db = test_db(&temp_dir);

        let id = insert_account(&db, "a@example.com", "d1").unwrap().unwrap();
        let record = get_account(&db, id).unwrap().unwrap();

        assert_eq!(record.email, "a@example.com");
        assert!(get_account(&db, id + 1).unwrap().is_none());
    }

    #[test]
    fn test_find_unknown_email() {
        let temp_dir = TempDir::new().unwrap();
        let db = test_db(&temp_dir);

        assert!(find_account_by_email(&db, "nobody@example.com")
            .unwrap()
            .is_none());
    }
}
