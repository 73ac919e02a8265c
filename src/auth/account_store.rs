//! Account Storage
//! Mission: persist account records in SQLite with unique usernames

use crate::auth::models::Account;
use crate::auth::password;
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, ErrorCode};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Account creation errors. The UNIQUE index on username is the single
/// authority on duplicates; there is no check-then-insert pre-check to race
/// against.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("username already exists")]
    DuplicateUsername,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Account storage with SQLite backend
pub struct AccountStore {
    db_path: String,
}

impl AccountStore {
    /// Create a new account store and initialize the schema
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS accounts (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                email TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Create a new account. The password is hashed before it touches the
    /// store; a username collision maps to `DuplicateUsername`.
    pub fn create_account(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<Account, StoreError> {
        let password_hash = password::hash_password(password)?;

        let account = Account {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash,
            email: email.to_string(),
            created_at: Utc::now().to_rfc3339(),
        };

        let conn =
            Connection::open(&self.db_path).context("Failed to open account database")?;

        let inserted = conn.execute(
            "INSERT INTO accounts (id, username, password_hash, email, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                account.id.to_string(),
                account.username,
                account.password_hash,
                account.email,
                account.created_at,
            ],
        );

        match inserted {
            Ok(_) => {
                info!("✅ Created account: {}", account.username);
                Ok(account)
            }
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::DuplicateUsername)
            }
            Err(e) => Err(StoreError::Internal(
                anyhow::Error::new(e).context("Failed to insert account"),
            )),
        }
    }

    /// Get an account by username
    pub fn get_by_username(&self, username: &str) -> Result<Option<Account>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, username, password_hash, email, created_at
             FROM accounts WHERE username = ?1",
        )?;

        let account = stmt.query_row(params![username], |row| {
            let id: String = row.get(0)?;
            Ok(Account {
                id: parse_uuid(0, &id)?,
                username: row.get(1)?,
                password_hash: row.get(2)?,
                email: row.get(3)?,
                created_at: row.get(4)?,
            })
        });

        match account {
            Ok(account) => Ok(Some(account)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Verify a username/password pair against the stored hash.
    ///
    /// Returns the account on a match and `None` otherwise; callers cannot tell
    /// an unknown username apart from a wrong password.
    pub fn verify_credentials(&self, username: &str, password: &str) -> Result<Option<Account>> {
        let Some(account) = self.get_by_username(username)? else {
            return Ok(None);
        };

        if password::verify_password(password, &account.password_hash)? {
            Ok(Some(account))
        } else {
            Ok(None)
        }
    }
}

pub(crate) fn parse_uuid(col: usize, value: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(e))
    })
}
