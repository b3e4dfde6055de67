use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::{dto::UserDetails, services};
use crate::{error::ApiError, state::AppState};

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users/:user_id", get(get_user_details))
}

/// GET /api/users/:userId
#[instrument(skip(state))]
pub async fn get_user_details(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserDetails>, ApiError> {
    let details =
        services::get_user_details(state.users.as_ref(), state.costs.as_ref(), &user_id).await?;
    Ok(Json(details))
}
