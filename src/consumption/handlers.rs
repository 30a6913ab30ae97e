use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::dto::LogEntryRequest;
use super::services::{delete_entry, entries_for_day, log_entry};
use crate::{
    auth::AuthUser,
    dates::{self, DayQuery},
    error::AppResult,
    models::LoggedFood,
    state::AppState,
};

pub fn entry_routes() -> Router<AppState> {
    Router::new()
        .route("/entries", get(list_entries).post(create_entry))
        .route("/entries/:id", delete(remove_entry))
}

#[instrument(skip(state))]
pub async fn list_entries(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DayQuery>,
) -> AppResult<Json<Vec<LoggedFood>>> {
    let day = q.resolve(dates::today())?;
    Ok(Json(entries_for_day(state.store.as_ref(), user_id, day).await?))
}

#[instrument(skip(state))]
pub async fn create_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<LogEntryRequest>,
) -> AppResult<(StatusCode, Json<LoggedFood>)> {
    let logged = log_entry(
        state.store.as_ref(),
        user_id,
        payload.food_id,
        payload.quantity,
        dates::today(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(logged)))
}

#[instrument(skip(state))]
pub async fn remove_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    delete_entry(state.store.as_ref(), user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
