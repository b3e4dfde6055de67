use serde::{Deserialize, Serialize};

use crate::costs::repo_types::Category;

/// A JSON number or a string holding one; clients send ids both ways.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberLike {
    Number(serde_json::Number),
    Text(String),
}

impl NumberLike {
    pub fn is_blank(&self) -> bool {
        matches!(self, NumberLike::Text(s) if s.trim().is_empty())
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            NumberLike::Number(n) => n.as_i64(),
            NumberLike::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            NumberLike::Number(n) => n.as_f64(),
            NumberLike::Text(s) => s.trim().parse().ok(),
        }?;
        value.is_finite().then_some(value)
    }
}

/// Body of `POST /api/add`. Every field is optional here so that missing
/// ones are reported as such instead of as a malformed body.
#[derive(Debug, Default, Deserialize)]
pub struct AddCostRequest {
    pub userid: Option<NumberLike>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub sum: Option<NumberLike>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
}

/// Query of `GET /api/report`.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub id: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportItem {
    pub sum: f64,
    pub description: String,
    pub day: u8,
}

/// One list per category; all five keys are always serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryCosts {
    pub food: Vec<ReportItem>,
    pub health: Vec<ReportItem>,
    pub housing: Vec<ReportItem>,
    pub sport: Vec<ReportItem>,
    pub education: Vec<ReportItem>,
}

impl CategoryCosts {
    pub fn get_mut(&mut self, category: Category) -> &mut Vec<ReportItem> {
        match category {
            Category::Food => &mut self.food,
            Category::Health => &mut self.health,
            Category::Housing => &mut self.housing,
            Category::Sport => &mut self.sport,
            Category::Education => &mut self.education,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReport {
    pub userid: i64,
    pub year: i32,
    pub month: u8,
    pub costs: CategoryCosts,
}
