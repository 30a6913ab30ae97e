use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};
use tracing::instrument;

use super::dto::{GoalOverrideRequest, ProfileResponse, ProfileUpdateRequest};
use super::services::{ensure_profile, override_goals, update_profile};
use crate::{auth::AuthUser, error::AppResult, state::AppState};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).put(put_profile))
        .route("/profile/goals", put(put_goals))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<ProfileResponse>> {
    let (profile, created) = ensure_profile(state.store.as_ref(), user_id).await?;
    Ok(Json(ProfileResponse::new(&profile, created)))
}

#[instrument(skip(state))]
pub async fn put_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ProfileUpdateRequest>,
) -> AppResult<Json<ProfileResponse>> {
    let profile = update_profile(state.store.as_ref(), user_id, &payload).await?;
    Ok(Json(ProfileResponse::new(&profile, false)))
}

#[instrument(skip(state))]
pub async fn put_goals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<GoalOverrideRequest>,
) -> AppResult<Json<ProfileResponse>> {
    let profile = override_goals(state.store.as_ref(), user_id, &payload).await?;
    Ok(Json(ProfileResponse::new(&profile, false)))
}
