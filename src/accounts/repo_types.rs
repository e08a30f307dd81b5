use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Savings,
    Current,
    Salary,
}

/// Bank account row. Provisioned by the seed process, never by the API;
/// the PIN is stored hashed and never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_number: String,
    #[serde(skip_serializing)]
    pub pin_hash: String,
    pub holder_name: String,
    /// Balance in minor units (cents). Non-negative by DB constraint.
    pub balance_minor: i64,
    pub is_active: bool,
    pub account_type: AccountType,
    pub created_at: OffsetDateTime,
}
