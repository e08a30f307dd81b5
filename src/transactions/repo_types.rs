use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "transaction_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Credit,
    Debit,
    Transfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "transaction_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

/// Immutable ledger entry, written once by the seeding/posting process and
/// read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub account_number: String,
    pub kind: TransactionKind,
    /// Signed amount in minor units; never zero.
    pub amount_minor: i64,
    pub description: String,
    /// Account balance in minor units after this entry posted.
    pub balance_after_minor: i64,
    pub reference: String,
    pub status: TransactionStatus,
    pub created_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_keys() {
        let txn = Transaction {
            id: Uuid::new_v4(),
            account_number: "1234567890".into(),
            kind: TransactionKind::Debit,
            amount_minor: -1500_00,
            description: "ATM Withdrawal".into(),
            balance_after_minor: 18_500_00,
            reference: "TXN17000000000ABCDEFGHI".into(),
            status: TransactionStatus::Completed,
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&txn).unwrap();
        assert!(json.contains("\"accountNumber\""));
        assert!(json.contains("\"balanceAfterMinor\""));
        assert!(json.contains("\"kind\":\"debit\""));
        assert!(json.contains("\"status\":\"completed\""));
    }
}
