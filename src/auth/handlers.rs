use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use crate::{
    accounts::Account,
    auth::{
        dto::{AuthResponse, LoginRequest, SessionUser, SignupRequest, VerifyResponse},
        extractors::CurrentUser,
        jwt::JwtKeys,
        lockout::LockoutStatus,
        password::{hash_secret, verify_secret},
        repo::CreateUserError,
        repo_types::User,
    },
    error::ApiError,
    state::AppState,
    transactions::Transaction,
};

/// Transaction page size on the login payload; the verify endpoint returns
/// the full history.
const LOGIN_TRANSACTION_PAGE: i64 = 10;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/verify", get(verify))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn is_valid_account_number(number: &str) -> bool {
    lazy_static! {
        static ref ACCOUNT_RE: Regex = Regex::new(r"^\d{10,16}$").unwrap();
    }
    ACCOUNT_RE.is_match(number)
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(mut payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    payload.account_number = payload.account_number.trim().to_string();
    payload.debit_pin = payload.debit_pin.trim().to_string();
    payload.email = payload.email.trim().to_lowercase();

    if payload.account_number.is_empty()
        || payload.debit_pin.is_empty()
        || payload.email.is_empty()
        || payload.password.trim().is_empty()
    {
        return Err(ApiError::Validation(
            "Please provide all required fields".into(),
        ));
    }
    if !is_valid_email(&payload.email) {
        return Err(ApiError::Validation("Please provide a valid email".into()));
    }
    if !is_valid_account_number(&payload.account_number) {
        return Err(ApiError::Validation(
            "Account number must be 10-16 digits".into(),
        ));
    }
    if payload.password.len() < 6 {
        return Err(ApiError::Validation(
            "Password must be at least 6 characters".into(),
        ));
    }

    // Fast duplicate check; the DB unique constraints stay authoritative.
    if let Some(existing) =
        User::find_by_email_or_account(&state.db, &payload.email, &payload.account_number).await?
    {
        warn!(email = %payload.email, "signup duplicate identity");
        let message = if existing.email == payload.email {
            "Email already registered"
        } else {
            "Account number already registered"
        };
        return Err(ApiError::Credentials(message.into()));
    }

    let account = Account::find_by_number(&state.db, &payload.account_number)
        .await?
        .ok_or_else(|| {
            warn!(account_number = %payload.account_number, "signup unknown account");
            ApiError::Credentials("Invalid account number. Please contact your bank.".into())
        })?;

    if !account.is_active {
        warn!(account_number = %account.account_number, "signup inactive account");
        return Err(ApiError::Credentials(
            "Account is inactive. Please contact your bank.".into(),
        ));
    }

    // The identity-proofing step: linking requires knowledge of the PIN.
    if !verify_secret(&payload.debit_pin, &account.pin_hash) {
        warn!(account_number = %account.account_number, "signup wrong PIN");
        return Err(ApiError::Credentials(
            "Invalid debit PIN for this account number".into(),
        ));
    }

    let password_hash = hash_secret(&payload.password)?;
    let user = User::create(
        &state.db,
        &payload.account_number,
        &payload.email,
        &password_hash,
    )
    .await
    .map_err(|e| match e {
        CreateUserError::DuplicateEmail => ApiError::Credentials("Email already registered".into()),
        CreateUserError::DuplicateAccountNumber => {
            ApiError::Credentials("Account number already registered".into())
        }
        CreateUserError::Other(e) => ApiError::Internal(e.into()),
    })?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign_access(user.id, &user.account_number)?;

    info!(user_id = %user.id, account_number = %user.account_number, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            message: "Registration successful".into(),
            token,
            user: SessionUser {
                id: user.id,
                account_number: user.account_number,
                email: user.email,
                last_login: user.last_login,
                account_details: account,
                // a freshly linked login has no history attached yet
                transactions: vec![],
            },
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if payload.email.is_empty() || payload.password.trim().is_empty() {
        return Err(ApiError::Validation(
            "Please provide email and password".into(),
        ));
    }

    let user = User::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(|| {
            warn!(email = %payload.email, "login unknown email");
            ApiError::UnknownEmail
        })?;

    // Lock check is a precondition; a locked user never reaches the hash
    // comparison.
    if let LockoutStatus::Locked { minutes_remaining } =
        user.lockout_status(OffsetDateTime::now_utc())
    {
        warn!(user_id = %user.id, minutes_remaining, "login while locked");
        return Err(ApiError::Locked {
            minutes: minutes_remaining,
        });
    }

    if !verify_secret(&payload.password, &user.password_hash) {
        let updated = User::record_failed_login(&state.db, user.id).await?;
        warn!(
            user_id = %user.id,
            login_attempts = updated.login_attempts,
            locked = updated.lock_until.is_some(),
            "login invalid password"
        );
        return Err(ApiError::Credentials("Invalid password".into()));
    }

    let user = User::record_successful_login(&state.db, user.id).await?;

    let account = Account::find_by_number(&state.db, &user.account_number)
        .await?
        .ok_or_else(|| anyhow::anyhow!("account {} missing for user", user.account_number))?;
    let transactions =
        Transaction::list_recent(&state.db, &user.account_number, LOGIN_TRANSACTION_PAGE).await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign_access(user.id, &user.account_number)?;

    info!(user_id = %user.id, account_number = %user.account_number, "user logged in");
    Ok(Json(AuthResponse {
        success: true,
        message: "Login successful".into(),
        token,
        user: SessionUser {
            id: user.id,
            account_number: user.account_number,
            email: user.email,
            last_login: user.last_login,
            account_details: account,
            transactions,
        },
    }))
}

/// Session refresh: full current snapshot for a valid bearer token.
#[instrument(skip(state, current))]
pub async fn verify(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<VerifyResponse>, ApiError> {
    let CurrentUser(user) = current;

    let account = Account::find_by_number(&state.db, &user.account_number)
        .await?
        .ok_or_else(|| anyhow::anyhow!("account {} missing for user", user.account_number))?;
    let transactions = Transaction::list_all(&state.db, &user.account_number).await?;

    Ok(Json(VerifyResponse {
        success: true,
        user: SessionUser {
            id: user.id,
            account_number: user.account_number,
            email: user.email,
            last_login: user.last_login,
            account_details: account,
            transactions,
        },
    }))
}
