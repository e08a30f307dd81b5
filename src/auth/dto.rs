use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::accounts::Account;
use crate::transactions::Transaction;

/// Request body for signup: the account-linking proof (number + PIN) plus
/// the new login credentials.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub account_number: String,
    pub debit_pin: String,
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Session payload the client caches: public user fields, the linked
/// account, and a transaction page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: Uuid,
    pub account_number: String,
    pub email: String,
    pub last_login: Option<OffsetDateTime>,
    pub account_details: Account,
    pub transactions: Vec<Transaction>,
}

/// Success envelope for signup and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub user: SessionUser,
}

/// Success envelope for the verify endpoint.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub user: SessionUser,
}
