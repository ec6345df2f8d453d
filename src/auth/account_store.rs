//! Account Storage
//! The gate's storage boundary and its SQLite implementation

use crate::auth::models::{Account, Role};
use anyhow::{Context, Result};
use parking_lot::Mutex;
use rusqlite::{params, types::Type, Connection, ErrorCode, OpenFlags, Row};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

const SCHEMA_SQL: &str = r#"
PRAGMA journal_mode = WAL;
PRAGMA synchronous = NORMAL;

CREATE TABLE IF NOT EXISTS accounts (
    id TEXT PRIMARY KEY,
    email TEXT NOT NULL COLLATE NOCASE,
    password_hash TEXT NOT NULL,
    full_name TEXT NOT NULL,
    role TEXT NOT NULL,
    created_at TEXT NOT NULL,
    bio TEXT,
    profile_image TEXT
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_accounts_email ON accounts(email COLLATE NOCASE);
"#;

const ACCOUNT_COLUMNS: &str =
    "id, email, password_hash, full_name, role, created_at, bio, profile_image";

/// Why an insert was refused.
#[derive(Debug, thiserror::Error)]
pub enum InsertError {
    #[error("unique key violation")]
    DuplicateKey,
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// What the session gate needs from persistence.
///
/// `insert_account` must enforce email uniqueness atomically; the gate does
/// not lock around its own check.
pub trait AccountStore: Send + Sync {
    fn find_account_by_email(&self, email: &str) -> Result<Option<Account>>;
    fn find_account_by_id(&self, id: &Uuid) -> Result<Option<Account>>;
    fn insert_account(&self, account: &Account) -> Result<(), InsertError>;
}

/// Account storage with SQLite backend
pub struct SqliteAccountStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteAccountStore {
    /// Open (or create) the account database and initialize its schema
    pub fn new(db_path: &str) -> Result<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = Connection::open_with_flags(db_path, flags)
            .with_context(|| format!("Failed to open account database at {}", db_path))?;

        conn.execute_batch(SCHEMA_SQL)
            .context("Failed to initialize account schema")?;

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))
            .unwrap_or(0);
        info!("🔐 Account store ready at {} ({} accounts)", db_path, count);

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn row_to_account(row: &Row<'_>) -> rusqlite::Result<Account> {
        let id: String = row.get(0)?;
        let role: String = row.get(4)?;
        Ok(Account {
            id: Uuid::parse_str(&id)
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?,
            email: row.get(1)?,
            password_hash: row.get(2)?,
            full_name: row.get(3)?,
            role: role
                .parse::<Role>()
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?,
            created_at: row.get(5)?,
            bio: row.get(6)?,
            profile_image: row.get(7)?,
        })
    }

    fn find_one(&self, column: &str, value: &str) -> Result<Option<Account>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE {column} = ?1"
        ))?;

        match stmt.query_row(params![value], Self::row_to_account) {
            Ok(account) => Ok(Some(account)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn count(&self) -> Result<usize> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl AccountStore for SqliteAccountStore {
    fn find_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        self.find_one("email", email)
            .context("Failed to look up account by email")
    }

    fn find_account_by_id(&self, id: &Uuid) -> Result<Option<Account>> {
        self.find_one("id", &id.to_string())
            .context("Failed to look up account by id")
    }

    fn insert_account(&self, account: &Account) -> Result<(), InsertError> {
        let conn = self.conn.lock();
        let result = conn.execute(
            "INSERT INTO accounts (id, email, password_hash, full_name, role, created_at, bio, profile_image)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                account.id.to_string(),
                account.email,
                account.password_hash,
                account.full_name,
                account.role.as_str(),
                account.created_at,
                account.bio,
                account.profile_image,
            ],
        );

        match result {
            Ok(_) => {
                info!("✅ Created account: {} ({})", account.email, account.role);
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(InsertError::DuplicateKey)
            }
            Err(e) => Err(InsertError::Backend(
                anyhow::Error::new(e).context("Failed to insert account"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::NamedTempFile;

    fn account(email: &str, role: Role) -> Account {
        Account {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            full_name: "Someone".to_string(),
            role,
            created_at: Utc::now().to_rfc3339(),
            bio: None,
            profile_image: None,
        }
    }

    #[test]
    fn test_insert_and_find() {
        let store = SqliteAccountStore::new(":memory:").unwrap();
        let teacher = account("t@school.edu", Role::Teacher);
        store.insert_account(&teacher).unwrap();

        let by_email = store.find_account_by_email("t@school.edu").unwrap().unwrap();
        assert_eq!(by_email.id, teacher.id);
        assert_eq!(by_email.role, Role::Teacher);

        let by_id = store.find_account_by_id(&teacher.id).unwrap().unwrap();
        assert_eq!(by_id.email, "t@school.edu");

        assert!(store.find_account_by_email("nobody@school.edu").unwrap().is_none());
        assert!(store.find_account_by_id(&Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_email_is_rejected() {
        let store = SqliteAccountStore::new(":memory:").unwrap();
        let first = account("a@x.com", Role::Student);
        store.insert_account(&first).unwrap();

        let second = account("a@x.com", Role::Teacher);
        assert!(matches!(
            store.insert_account(&second),
            Err(InsertError::DuplicateKey)
        ));

        // First account unaffected
        let stored = store.find_account_by_email("a@x.com").unwrap().unwrap();
        assert_eq!(stored.id, first.id);
        assert_eq!(stored.role, Role::Student);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_email_uniqueness_ignores_case() {
        let store = SqliteAccountStore::new(":memory:").unwrap();
        store.insert_account(&account("a@x.com", Role::Student)).unwrap();

        assert!(matches!(
            store.insert_account(&account("A@X.COM", Role::Student)),
            Err(InsertError::DuplicateKey)
        ));
        assert!(store.find_account_by_email("A@x.Com").unwrap().is_some());
    }

    #[test]
    fn test_accounts_persist_across_reopen() {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap();

        let created = account("persist@x.com", Role::Teacher);
        {
            let store = SqliteAccountStore::new(db_path).unwrap();
            store.insert_account(&created).unwrap();
        }

        let reopened = SqliteAccountStore::new(db_path).unwrap();
        let found = reopened.find_account_by_email("persist@x.com").unwrap().unwrap();
        assert_eq!(found.id, created.id);
    }
}
