use sqlx::PgPool;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::lockout::{lock_deadline, MAX_FAILED_ATTEMPTS};
use crate::auth::repo_types::User;

/// Creation failure split out so the signup flow can tell the caller which
/// field collided. The DB unique constraints are the authoritative guard
/// under concurrent signups; the flow's pre-check is an optimization only.
#[derive(Debug, Error)]
pub enum CreateUserError {
    #[error("Email already registered")]
    DuplicateEmail,
    #[error("Account number already registered")]
    DuplicateAccountNumber,
    #[error(transparent)]
    Other(#[from] sqlx::Error),
}

impl User {
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, account_number, email, password_hash, is_verified, last_login,
                   login_attempts, lock_until, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, account_number, email, password_hash, is_verified, last_login,
                   login_attempts, lock_until, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Pre-check for signup: is either identity column already taken.
    pub async fn find_by_email_or_account(
        db: &PgPool,
        email: &str,
        account_number: &str,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, account_number, email, password_hash, is_verified, last_login,
                   login_attempts, lock_until, created_at
            FROM users
            WHERE email = $1 OR account_number = $2
            "#,
        )
        .bind(email)
        .bind(account_number)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a login identity. Unique violations are mapped by constraint
    /// so two racing signups resolve to exactly one winner and a precise
    /// error for the loser.
    pub async fn create(
        db: &PgPool,
        account_number: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, CreateUserError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (account_number, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, account_number, email, password_hash, is_verified, last_login,
                      login_attempts, lock_until, created_at
            "#,
        )
        .bind(account_number)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                match db_err.constraint() {
                    Some("users_email_key") => return CreateUserError::DuplicateEmail,
                    Some("users_account_number_key") => {
                        return CreateUserError::DuplicateAccountNumber
                    }
                    _ => {}
                }
            }
            CreateUserError::Other(e)
        })?;
        Ok(user)
    }

    /// Record a failed password check. One atomic statement so concurrent
    /// logins for the same user never lose an increment: the counter bump
    /// and the conditional lock land together, and the write sticks even
    /// though the surrounding login fails.
    pub async fn record_failed_login(db: &PgPool, id: Uuid) -> anyhow::Result<User> {
        let now = OffsetDateTime::now_utc();
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET login_attempts = login_attempts + 1,
                lock_until = CASE
                    WHEN login_attempts + 1 >= $2 THEN $3
                    ELSE lock_until
                END
            WHERE id = $1
            RETURNING id, account_number, email, password_hash, is_verified, last_login,
                      login_attempts, lock_until, created_at
            "#,
        )
        .bind(id)
        .bind(MAX_FAILED_ATTEMPTS)
        .bind(lock_deadline(now))
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Record a successful password check: counter back to zero, lock
    /// cleared, last-login stamped.
    pub async fn record_successful_login(db: &PgPool, id: Uuid) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET login_attempts = 0,
                lock_until = NULL,
                last_login = now()
            WHERE id = $1
            RETURNING id, account_number, email, password_hash, is_verified, last_login,
                      login_attempts, lock_until, created_at
            "#,
        )
        .bind(id)
        .fetch_one(db)
        .await?;
        Ok(user)
    }
}
