use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::costs::repo_types::Category;

/// Failures surfaced to API clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required query parameters: id, year, month")]
    MissingParameter,

    #[error("Missing required fields")]
    MissingFields,

    #[error("{0}")]
    InvalidParameter(String),

    #[error("Invalid category")]
    InvalidCategory,

    #[error("Invalid user ID")]
    InvalidUserId,

    #[error("User not found")]
    UserNotFound(i64),

    #[error("Server error")]
    Server(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter
            | ApiError::MissingFields
            | ApiError::InvalidParameter(_)
            | ApiError::InvalidCategory
            | ApiError::InvalidUserId => StatusCode::BAD_REQUEST,
            ApiError::UserNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::MissingParameter => "MissingParameter",
            ApiError::MissingFields => "MissingFields",
            ApiError::InvalidParameter(_) => "InvalidParameter",
            ApiError::InvalidCategory => "InvalidCategory",
            ApiError::InvalidUserId => "InvalidUserId",
            ApiError::UserNotFound(_) => "UserNotFound",
            ApiError::Server(_) => "ServerError",
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ApiError::InvalidParameter(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = json!({
            "error": self.to_string(),
            "kind": self.kind(),
        });
        match &self {
            ApiError::InvalidCategory => {
                body["validCategories"] = json!(Category::ALL);
            }
            ApiError::Server(e) => {
                let detail = format!("{e:#}");
                error!(error = %detail, "request failed");
                body["message"] = json!(detail);
            }
            _ => {}
        }
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(ApiError::MissingParameter.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::invalid("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidUserId.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::UserNotFound(9).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Server(anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn kinds_are_distinct() {
        let kinds = [
            ApiError::MissingParameter.kind(),
            ApiError::MissingFields.kind(),
            ApiError::invalid("x").kind(),
            ApiError::InvalidCategory.kind(),
            ApiError::InvalidUserId.kind(),
            ApiError::UserNotFound(1).kind(),
            ApiError::Server(anyhow!("boom")).kind(),
        ];
        let unique: std::collections::HashSet<_> = kinds.iter().collect();
        assert_eq!(unique.len(), kinds.len());
    }

    #[test]
    fn server_error_keeps_underlying_message() {
        let err = ApiError::from(anyhow!("connection refused").context("select user by id"));
        assert_eq!(err.to_string(), "Server error");
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
