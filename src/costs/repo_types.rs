use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Fixed expense classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Health,
    Housing,
    Sport,
    Education,
}

impl Category {
    /// Every category, in report order.
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Health,
        Category::Housing,
        Category::Sport,
        Category::Education,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Health => "health",
            Category::Housing => "housing",
            Category::Sport => "sport",
            Category::Education => "education",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category {:?}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

/// A persisted expense line item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cost {
    pub id: Uuid,
    pub userid: i64,
    pub description: String,
    pub category: Category,
    pub sum: f64,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A validated cost ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewCost {
    pub userid: i64,
    pub description: String,
    pub category: Category,
    pub sum: f64,
    pub created_at: OffsetDateTime,
}

impl NewCost {
    pub fn into_cost(self, id: Uuid) -> Cost {
        Cost {
            id,
            userid: self.userid,
            description: self.description,
            category: self.category,
            sum: self.sum,
            created_at: self.created_at,
        }
    }
}

/// Row shape of the `costs` table.
#[derive(Debug, FromRow)]
pub struct CostRow {
    pub id: Uuid,
    pub userid: i64,
    pub description: String,
    pub category: String,
    pub amount: f64,
    pub created_at: OffsetDateTime,
}

impl TryFrom<CostRow> for Cost {
    type Error = UnknownCategory;

    fn try_from(r: CostRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            userid: r.userid,
            description: r.description,
            category: r.category.parse()?,
            sum: r.amount,
            created_at: r.created_at,
        })
    }
}
