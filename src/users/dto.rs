use serde::Serialize;

/// Body of `GET /api/users/:userId`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDetails {
    pub first_name: String,
    pub last_name: String,
    pub id: i64,
    pub total: f64,
}
