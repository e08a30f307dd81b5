use sqlx::PgPool;

use crate::accounts::repo_types::{Account, AccountType};

impl Account {
    pub async fn find_by_number(
        db: &PgPool,
        account_number: &str,
    ) -> anyhow::Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT account_number, pin_hash, holder_name, balance_minor, is_active, account_type, created_at
            FROM accounts
            WHERE account_number = $1
            "#,
        )
        .bind(account_number)
        .fetch_optional(db)
        .await?;
        Ok(account)
    }

    /// Provision an account. Only the seed process calls this; the signup
    /// flow never creates accounts.
    pub async fn create(
        db: &PgPool,
        account_number: &str,
        pin_hash: &str,
        holder_name: &str,
        balance_minor: i64,
        is_active: bool,
        account_type: AccountType,
    ) -> anyhow::Result<Account> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (account_number, pin_hash, holder_name, balance_minor, is_active, account_type)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING account_number, pin_hash, holder_name, balance_minor, is_active, account_type, created_at
            "#,
        )
        .bind(account_number)
        .bind(pin_hash)
        .bind(holder_name)
        .bind(balance_minor)
        .bind(is_active)
        .bind(account_type)
        .fetch_one(db)
        .await?;
        Ok(account)
    }
}
