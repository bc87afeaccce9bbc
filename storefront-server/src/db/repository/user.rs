//! User Repository

use super::{RepoError, RepoResult};
use crate::db::models::User;
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHasher};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password, role, phone, address FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Ensure the administrator record exists.
    ///
    /// Runs once at startup. The password is only hashed and stored on first
    /// creation; an existing record is left untouched, whatever its role —
    /// there is no in-band promotion path.
    pub async fn ensure_seed_admin(&self, email: &str, password: &str) -> RepoResult<()> {
        if self.find_by_email(email).await?.is_some() {
            return Ok(());
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| RepoError::Internal(format!("password hash failed: {e}")))?
            .to_string();

        sqlx::query(
            "INSERT INTO users (name, email, password, role) VALUES ('Store Admin', ?, ?, 'admin')",
        )
        .bind(email)
        .bind(hash)
        .execute(&self.pool)
        .await?;

        tracing::info!(email = %email, "Seeded administrator account");
        Ok(())
    }
}
