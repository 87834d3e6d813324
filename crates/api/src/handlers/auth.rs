//! Handlers for the `/auth` resource: signup, login, the current user, and
//! the refresh-token protocol (refresh, logout, remember-me).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::{AppendHeaders, IntoResponse, Response};
use axum::Json;
use inotebook_core::error::CoreError;
use inotebook_core::signup::{normalize_email, SignupForm, IDENTITY_RULES, PASSWORD_RULES};
use inotebook_core::validation::{first_failure, Reason};
use inotebook_db::models::user::{CreateUser, UserResponse, UserSummary};
use inotebook_db::repositories::user_repo::UQ_USERS_EMAIL;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::cookie::{clear_refresh_cookie, refresh_cookie};
use crate::auth::password::{hash_password, verify_against_dummy_hash, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::json::JsonBody;
use crate::middleware::refresh::RefreshSession;
use crate::state::AppState;

/// The one message for every failed login.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body returned by signup, login, and remember-me.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserSummary,
    pub access_token: String,
    pub refresh_token: String,
}

/// Body returned by `POST /auth/refresh`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

/// Body returned by `POST /auth/getUser`.
#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/createUser
///
/// Validate, hash the password, store the user, and start a session.
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<SignupForm>,
) -> AppResult<Response> {
    // 1. Name and email format.
    first_failure(&form, IDENTITY_RULES)?;

    // 2. Email uniqueness.
    let email = normalize_email(&form.email);
    if state.users.find_user_by_email(&email).await?.is_some() {
        return Err(Reason::EmailTaken.into());
    }

    // 3. Password strength.
    first_failure(&form, PASSWORD_RULES)?;

    let password_hash = hash_password(&form.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // A concurrent signup for the same email can pass the lookup above; the
    // unique index decides.
    let user = state
        .users
        .create_user(&CreateUser {
            name: form.name.trim().to_owned(),
            email,
            password_hash,
        })
        .await
        .map_err(|e| {
            if e.is_unique_violation(UQ_USERS_EMAIL) {
                AppError::from(Reason::EmailTaken)
            } else {
                AppError::Store(e)
            }
        })?;

    tracing::info!(user_id = user.id, "User created");

    start_session(&state, UserSummary::from(&user), StatusCode::CREATED).await
}

/// POST /api/auth/login
///
/// Unknown email and wrong password fail identically. An unknown email
/// still pays for one hash comparison.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LoginRequest>,
) -> AppResult<Response> {
    let email = normalize_email(&input.email);

    let user = if email.is_empty() || input.password.is_empty() {
        None
    } else {
        state.users.find_user_by_email(&email).await?
    };

    let Some(user) = user else {
        verify_against_dummy_hash(&input.password, &state.dummy_hash);
        tracing::debug!("Login failed: unknown email");
        return Err(invalid_credentials());
    };

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::debug!(user_id = user.id, "Login failed: wrong password");
        return Err(invalid_credentials());
    }

    tracing::info!(user_id = user.id, "User logged in");

    start_session(&state, UserSummary::from(&user), StatusCode::OK).await
}

/// POST /api/auth/getUser
///
/// The authenticated user's profile. The password hash is never included.
pub async fn get_user(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<CurrentUserResponse>> {
    let user = state
        .users
        .find_user_by_id(auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    Ok(Json(CurrentUserResponse { user: user.into() }))
}

/// POST /api/auth/refresh
///
/// Mint a new access token. The refresh token is not rotated.
pub async fn refresh(
    session: RefreshSession,
    State(state): State<AppState>,
) -> AppResult<Json<RefreshResponse>> {
    let access_token = state.tokens.issue_access_token(session.user_id)?;

    tracing::debug!(user_id = session.user_id, "Access token refreshed");

    Ok(Json(RefreshResponse { access_token }))
}

/// POST /api/auth/logout
///
/// Remove the presented refresh token from the ledger and clear the cookie.
pub async fn logout(
    session: RefreshSession,
    State(state): State<AppState>,
) -> AppResult<Response> {
    let removed = state.tokens.revoke_refresh_token(&session.token).await?;

    tracing::info!(user_id = session.user_id, removed, "User logged out");

    Ok((
        AppendHeaders([(SET_COOKIE, clear_refresh_cookie(state.config.cookie_secure))]),
        Json(json!({ "message": "Logout successful" })),
    )
        .into_response())
}

/// POST /api/auth/rememberme
///
/// Issue a fresh access and refresh token for a still-valid refresh token.
/// The presented refresh token stays in the ledger.
pub async fn remember_me(
    session: RefreshSession,
    State(state): State<AppState>,
) -> AppResult<Response> {
    // The ledger row outlives its user only if the cascade was bypassed.
    let user = state
        .users
        .find_user_by_id(session.user_id)
        .await?
        .ok_or_else(AppError::invalid_token)?;

    tracing::info!(user_id = user.id, "Session remembered");

    start_session(&state, UserSummary::from(&user), StatusCode::CREATED).await
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::validation(INVALID_CREDENTIALS))
}

/// Issue a token pair and answer with the refresh cookie and the auth body.
///
/// If the ledger insert fails nothing is returned to the client.
async fn start_session(
    state: &AppState,
    user: UserSummary,
    status: StatusCode,
) -> AppResult<Response> {
    let pair = state.tokens.issue_pair(user.id).await?;

    let cookie = refresh_cookie(
        &pair.refresh_token,
        state.tokens.config().refresh_max_age_secs(),
        state.config.cookie_secure,
    );

    Ok((
        status,
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(AuthResponse {
            user,
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }),
    )
        .into_response())
}
