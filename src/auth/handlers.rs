use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    credentials::Credentials,
    session::{Account, Session},
    tokens::{AuthUser, TokenKind},
};
use crate::{
    error::{AppError, AppResult},
    models::User,
    profile::services::ensure_profile,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/me", get(me))
}

#[derive(Debug, Deserialize)]
pub struct RefreshBody {
    pub refresh_token: String,
}

#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    Json(creds): Json<Credentials>,
) -> AppResult<(StatusCode, Json<Session>)> {
    creds.check_new_account()?;
    let hash = creds.password_hash()?;

    let Some(user) = state.users.create_user(creds.username(), &hash).await? else {
        warn!(username = %creds.username(), "username already registered");
        return Err(AppError::Conflict("Username already registered"));
    };

    if let Err(e) = ensure_profile(state.store.as_ref(), user.id).await {
        // created lazily on first access otherwise
        warn!(error = %e, user_id = %user.id, "initial profile not created");
    }

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok((StatusCode::CREATED, Json(Session::open(&state.tokens, &user)?)))
}

#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    Json(creds): Json<Credentials>,
) -> AppResult<Json<Session>> {
    let user = state.users.find_user_by_name(creds.username()).await?;
    match user {
        Some(user) if creds.matches(&user.password_hash) => {
            info!(user_id = %user.id, "user logged in");
            Ok(Json(Session::open(&state.tokens, &user)?))
        }
        _ => {
            warn!(username = %creds.username(), "login rejected");
            Err(AppError::Unauthorized("Invalid credentials"))
        }
    }
}

#[instrument(skip_all)]
pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshBody>,
) -> AppResult<Json<Session>> {
    let user_id = state.tokens.subject(&body.refresh_token, TokenKind::Refresh)?;
    let user = known_user(&state, user_id).await?;
    Ok(Json(Session::open(&state.tokens, &user)?))
}

#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<Account>> {
    let user = known_user(&state, user_id).await?;
    Ok(Json(Account::from(&user)))
}

/// Tokens outlive accounts, so the subject is looked up again.
async fn known_user(state: &AppState, user_id: Uuid) -> AppResult<User> {
    state.users.find_user(user_id).await?.ok_or_else(|| {
        warn!(%user_id, "token for unknown user");
        AppError::Unauthorized("User not found")
    })
}
