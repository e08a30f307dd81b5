use sqlx::PgPool;

use crate::transactions::repo_types::{Transaction, TransactionKind, TransactionStatus};

impl Transaction {
    /// Most recent entries first, bounded. Used for the login payload.
    pub async fn list_recent(
        db: &PgPool,
        account_number: &str,
        limit: i64,
    ) -> anyhow::Result<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, account_number, kind, amount_minor, description, balance_after_minor,
                   reference, status, created_at
            FROM transactions
            WHERE account_number = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(account_number)
        .bind(limit)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Complete history, newest first. Used by the verify endpoint.
    pub async fn list_all(db: &PgPool, account_number: &str) -> anyhow::Result<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, account_number, kind, amount_minor, description, balance_after_minor,
                   reference, status, created_at
            FROM transactions
            WHERE account_number = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(account_number)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Post a historical entry. Only the seed process calls this; the API
    /// treats the ledger as read-only.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &PgPool,
        account_number: &str,
        kind: TransactionKind,
        amount_minor: i64,
        description: &str,
        balance_after_minor: i64,
        reference: &str,
        status: TransactionStatus,
    ) -> anyhow::Result<Transaction> {
        let txn = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (account_number, kind, amount_minor, description,
                                      balance_after_minor, reference, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, account_number, kind, amount_minor, description, balance_after_minor,
                      reference, status, created_at
            "#,
        )
        .bind(account_number)
        .bind(kind)
        .bind(amount_minor)
        .bind(description)
        .bind(balance_after_minor)
        .bind(reference)
        .bind(status)
        .fetch_one(db)
        .await?;
        Ok(txn)
    }
}
