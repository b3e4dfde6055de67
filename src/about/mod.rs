use axum::{routing::get, Json, Router};
use serde::Serialize;
use tracing::instrument;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeamMember {
    pub first_name: &'static str,
    pub last_name: &'static str,
}

pub const TEAM: &[TeamMember] = &[
    TeamMember {
        first_name: "Bar",
        last_name: "Azarya",
    },
    TeamMember {
        first_name: "Aviv Meir",
        last_name: "Ovadia",
    },
];

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/about", get(about))
        .route("/about/", get(about))
}

/// GET /api/about
#[instrument]
pub async fn about() -> Json<&'static [TeamMember]> {
    Json(TEAM)
}
