use std::str::FromStr;

use anyhow::anyhow;
use sqlx::FromRow;
use time::Date;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MaritalStatus {
    #[default]
    Single,
    Married,
    Divorced,
    Widowed,
}

impl FromStr for MaritalStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Self::Single),
            "married" => Ok(Self::Married),
            "divorced" => Ok(Self::Divorced),
            "widowed" => Ok(Self::Widowed),
            other => Err(anyhow!("unknown marital status {other:?}")),
        }
    }
}

/// User profile. Provisioned outside this service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birthday: Date,
    pub marital_status: MaritalStatus,
}

/// Row shape of the `users` table.
#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birthday: Date,
    pub marital_status: String,
}

impl TryFrom<UserRow> for User {
    type Error = anyhow::Error;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            first_name: r.first_name,
            last_name: r.last_name,
            birthday: r.birthday,
            marital_status: r.marital_status.parse()?,
        })
    }
}
