use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::auth::jwt::TokenError;

/// Failure taxonomy surfaced by the API. Everything serializes to the
/// `{success: false, message}` envelope the client expects.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input. Never retried by the client.
    #[error("{0}")]
    Validation(String),

    /// An identity-proofing factor failed (unknown account, wrong PIN,
    /// wrong password, duplicate registration).
    #[error("{0}")]
    Credentials(String),

    /// Login attempted against an email with no registered user.
    #[error("Email does not exist. Please sign up first.")]
    UnknownEmail,

    /// Too many failed logins; carries the time left on the lock.
    #[error("Account locked due to too many failed attempts. Try again in {minutes} minutes.")]
    Locked { minutes: i64 },

    #[error("Not authorized, no token provided")]
    MissingToken,

    #[error("Not authorized, invalid token")]
    InvalidToken,

    #[error("Not authorized, token expired")]
    ExpiredToken,

    #[error("Not authorized, user not found")]
    UnknownIdentity,

    /// Store or other infrastructure failure. Detail is logged, never
    /// sent to the client.
    #[error("Server error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect_to_signup: Option<bool>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Credentials(_) | ApiError::UnknownEmail => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Locked { .. } => StatusCode::FORBIDDEN,
            ApiError::MissingToken
            | ApiError::InvalidToken
            | ApiError::ExpiredToken
            | ApiError::UnknownIdentity => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if let ApiError::Internal(ref e) = self {
            error!(error = %e, "internal error");
        }
        let body = ErrorBody {
            success: false,
            message: self.to_string(),
            redirect_to_signup: matches!(self, ApiError::UnknownEmail).then_some(true),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Internal(e.into())
    }
}

impl From<TokenError> for ApiError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Missing => ApiError::MissingToken,
            TokenError::Expired => ApiError::ExpiredToken,
            TokenError::Invalid => ApiError::InvalidToken,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn status_codes_match_taxonomy() {
        assert_eq!(
            ApiError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Credentials("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Locked { minutes: 3 }.status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(ApiError::ExpiredToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::MissingToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn unknown_email_carries_signup_hint() {
        let resp = ApiError::UnknownEmail.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v["success"], false);
        assert_eq!(v["redirectToSignup"], true);
    }

    #[tokio::test]
    async fn internal_error_hides_detail() {
        let resp = ApiError::Internal(anyhow::anyhow!("connection refused")).into_response();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v["message"], "Server error");
    }

    #[tokio::test]
    async fn lockout_message_reports_minutes() {
        let resp = ApiError::Locked { minutes: 12 }.into_response();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(v["message"].as_str().unwrap().contains("12 minutes"));
        assert!(v.get("redirectToSignup").is_none());
    }
}
