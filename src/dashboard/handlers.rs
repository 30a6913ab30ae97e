use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::dto::Dashboard;
use super::services::build_dashboard;
use crate::{
    auth::AuthUser,
    dates::{self, DayQuery},
    error::AppResult,
    state::AppState,
};

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}

#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DayQuery>,
) -> AppResult<Json<Dashboard>> {
    let today = dates::today();
    let day = q.resolve(today)?;
    Ok(Json(
        build_dashboard(state.store.as_ref(), user_id, day, today).await?,
    ))
}
