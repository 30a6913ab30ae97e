use crate::state::AppState;
use axum::Router;

mod credentials;
pub mod handlers;
mod session;
pub mod tokens;

pub use tokens::AuthUser;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
