use axum::{
    extract::{rejection::JsonRejection, Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{instrument, warn};

use super::{
    dto::{AddCostRequest, MonthlyReport, ReportQuery},
    repo_types::Cost,
    services,
};
use crate::{error::ApiError, state::AppState};

pub fn cost_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(add_cost))
        .route("/add/", post(add_cost))
        .route("/report", get(monthly_report))
        .route("/report/", get(monthly_report))
}

/// POST /api/add
#[instrument(skip(state, payload))]
pub async fn add_cost(
    State(state): State<AppState>,
    payload: Result<Json<AddCostRequest>, JsonRejection>,
) -> Result<Json<Cost>, ApiError> {
    let Json(body) = payload.map_err(|e| {
        warn!(error = %e, "add cost: unreadable body");
        ApiError::invalid(e.body_text())
    })?;

    let cost = services::add_cost(
        state.users.as_ref(),
        state.costs.as_ref(),
        state.config.utc_offset,
        body,
    )
    .await?;
    Ok(Json(cost))
}

/// GET /api/report?id=&year=&month=
#[instrument(skip(state))]
pub async fn monthly_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<MonthlyReport>, ApiError> {
    let report = services::generate_report(
        state.users.as_ref(),
        state.costs.as_ref(),
        state.config.utc_offset,
        &query,
    )
    .await?;
    Ok(Json(report))
}
