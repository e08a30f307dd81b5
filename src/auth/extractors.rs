use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::auth::jwt::{JwtKeys, TokenError};
use crate::auth::repo_types::User;
use crate::error::ApiError;
use crate::state::AppState;

/// Bearer-token extractor. Verifies the JWT, then re-resolves the subject
/// to a live user row: a valid signature alone is not enough, the identity
/// has to still exist. The resolved record is handed to the handler as an
/// explicit value.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(TokenError::Missing)?;

        let token = header
            .strip_prefix("Bearer ")
            .or_else(|| header.strip_prefix("bearer "))
            .ok_or(TokenError::Missing)?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token)?;

        let user = User::find_by_id(&state.db, claims.sub)
            .await
            .map_err(ApiError::Internal)?
            .ok_or(ApiError::UnknownIdentity)?;

        Ok(CurrentUser(user))
    }
}
