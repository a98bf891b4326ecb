mod dto;
pub mod handlers;
pub mod repo;
pub mod seeding;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::seed_routes()
}
