use redb::TableDefinition;

/// Accounts table: account_id -> AccountRecord (serialized)
pub const ACCOUNTS: TableDefinition<u64, &[u8]> = TableDefinition::new("accounts");

/// Email index: email -> account_id
/// Enforces email uniqueness across accounts
pub const ACCOUNT_EMAILS: TableDefinition<&str, u64> = TableDefinition::new("account_emails");
