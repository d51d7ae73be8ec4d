//! User Storage
//! Mission: Securely store and manage accounts with SQLite

use crate::auth::models::{User, UserRole, UserStatus, UserUpdate};
use anyhow::{Context, Result};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{DateTime, Utc};
use rusqlite::{params, types::Type, Connection};
use tracing::info;
use uuid::Uuid;

/// Account storage with SQLite backend
///
/// Email uniqueness is enforced here, at the store level: the `email` column
/// carries a UNIQUE constraint and inserts fail when it is violated. Callers
/// never re-check it.
pub struct UserStore {
    db_path: String,
}

impl UserStore {
    /// Create a new user store and initialize the schema
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        let conn = self.open()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL,
                status TEXT NOT NULL,
                join_date TEXT NOT NULL
            )",
            [],
        )
        .context("Failed to create users table")?;

        Ok(())
    }

    fn open(&self) -> Result<Connection> {
        Connection::open(&self.db_path)
            .with_context(|| format!("Failed to open database at {}", self.db_path))
    }

    /// Insert a pre-built account record
    ///
    /// Fails if the email is already taken (UNIQUE constraint).
    pub fn insert_user(&self, user: &User) -> Result<()> {
        let conn = self.open()?;
        conn.execute(
            "INSERT INTO users (id, name, email, password_hash, role, status, join_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                user.id.to_string(),
                user.name,
                user.email,
                user.password_hash,
                user.role.as_str(),
                user.status.as_str(),
                user.join_date.to_rfc3339(),
            ],
        )
        .context("Failed to insert user")?;

        Ok(())
    }

    /// Create a new account, hashing the password
    pub fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
        status: UserStatus,
    ) -> Result<User> {
        let password_hash = hash(password, DEFAULT_COST).context("Failed to hash password")?;

        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
            role,
            status,
            join_date: Utc::now(),
        };

        self.insert_user(&user)?;

        info!("✅ Created user: {} ({})", user.email, user.role.as_str());

        Ok(user)
    }

    /// Get account by email (exact match)
    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.open()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, email, password_hash, role, status, join_date
             FROM users WHERE email = ?1",
        )?;

        match stmt.query_row(params![email], Self::row_to_user) {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get account by id
    pub fn get_user_by_id(&self, id: &Uuid) -> Result<Option<User>> {
        let conn = self.open()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, email, password_hash, role, status, join_date
             FROM users WHERE id = ?1",
        )?;

        match stmt.query_row(params![id.to_string()], Self::row_to_user) {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Verify email and password
    ///
    /// Returns Ok(false) both for an unknown email and a wrong password, so
    /// callers cannot distinguish the two cases.
    pub fn verify_password(&self, email: &str, password: &str) -> Result<bool> {
        match self.get_user_by_email(email)? {
            Some(user) => {
                let valid =
                    verify(password, &user.password_hash).context("Failed to verify password")?;
                Ok(valid)
            }
            None => Ok(false),
        }
    }

    /// List all accounts
    pub fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.open()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, email, password_hash, role, status, join_date FROM users",
        )?;

        let users = stmt
            .query_map([], Self::row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(users)
    }

    /// Apply a partial update; returns the updated account, or None if absent
    pub fn update_user(&self, id: &Uuid, update: &UserUpdate) -> Result<Option<User>> {
        let conn = self.open()?;

        let rows_affected = conn
            .execute(
                "UPDATE users SET
                    name = COALESCE(?1, name),
                    email = COALESCE(?2, email),
                    role = COALESCE(?3, role),
                    status = COALESCE(?4, status)
                 WHERE id = ?5",
                params![
                    update.name,
                    update.email,
                    update.role.as_ref().map(|r| r.as_str()),
                    update.status.as_ref().map(|s| s.as_str()),
                    id.to_string(),
                ],
            )
            .context("Failed to update user")?;

        if rows_affected == 0 {
            return Ok(None);
        }

        self.get_user_by_id(id)
    }

    /// Delete an account by id; returns false if no row matched
    pub fn delete_user(&self, id: &Uuid) -> Result<bool> {
        let conn = self.open()?;

        let rows_affected =
            conn.execute("DELETE FROM users WHERE id = ?1", params![id.to_string()])?;

        if rows_affected > 0 {
            info!("🗑️  Deleted user: {}", id);
        }

        Ok(rows_affected > 0)
    }

    /// Count all accounts
    pub fn count_users(&self) -> Result<i64> {
        let conn = self.open()?;
        let count = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Count accounts with the given status
    pub fn count_users_with_status(&self, status: UserStatus) -> Result<i64> {
        let conn = self.open()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM users WHERE status = ?1",
            params![status.as_str()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Count accounts that joined at or after the given instant
    pub fn count_users_joined_since(&self, since: DateTime<Utc>) -> Result<i64> {
        let conn = self.open()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM users WHERE datetime(join_date) >= datetime(?1)",
            params![since.to_rfc3339()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
        let id_str: String = row.get(0)?;
        let role_str: String = row.get(4)?;
        let status_str: String = row.get(5)?;
        let join_str: String = row.get(6)?;

        Ok(User {
            id: Uuid::parse_str(&id_str)
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?,
            name: row.get(1)?,
            email: row.get(2)?,
            password_hash: row.get(3)?,
            role: UserRole::from_str(&role_str).unwrap_or(UserRole::User),
            status: UserStatus::from_str(&status_str).unwrap_or(UserStatus::Active),
            join_date: DateTime::parse_from_rfc3339(&join_str)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e))
                })?,
        })
    }
}
