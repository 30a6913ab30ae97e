use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::instrument;

use super::dto::NewFoodRequest;
use super::services::{add_food, list_foods};
use crate::{auth::AuthUser, error::AppResult, models::Food, state::AppState};

pub fn food_routes() -> Router<AppState> {
    Router::new().route("/foods", get(get_foods).post(post_food))
}

#[instrument(skip(state))]
pub async fn get_foods(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
) -> AppResult<Json<Vec<Food>>> {
    Ok(Json(list_foods(state.store.as_ref()).await?))
}

#[instrument(skip(state))]
pub async fn post_food(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<NewFoodRequest>,
) -> AppResult<(StatusCode, Json<Food>)> {
    let food = add_food(state.store.as_ref(), user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(food)))
}
