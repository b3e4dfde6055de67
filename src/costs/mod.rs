pub mod dto;
pub mod handlers;
pub mod repo;
pub mod report;
pub mod repo_types;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::cost_routes()
}
