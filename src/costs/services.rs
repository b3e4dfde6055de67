use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime,
    PrimitiveDateTime, UtcOffset,
};
use tracing::{info, warn};

use crate::{
    costs::{
        dto::{AddCostRequest, MonthlyReport, ReportQuery},
        report,
        repo_types::{Category, Cost, NewCost},
    },
    error::ApiError,
    store::{CostStore, UserStore},
};

/// Accepts an RFC 3339 timestamp, a local `YYYY-MM-DDTHH:MM:SS[.f]` date-time
/// or a bare `YYYY-MM-DD`. Local forms are read in `offset`.
pub fn parse_created_at(raw: &str, offset: UtcOffset) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(at) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(at);
    }
    let local = PrimitiveDateTime::parse(
        raw,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
    )
    .or_else(|_| {
        PrimitiveDateTime::parse(
            raw,
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        )
    })
    .or_else(|_| {
        Date::parse(raw, format_description!("[year]-[month]-[day]")).map(Date::midnight)
    })
    .ok()?;
    Some(local.assume_offset(offset))
}

pub async fn add_cost(
    users: &dyn UserStore,
    costs: &dyn CostStore,
    offset: UtcOffset,
    req: AddCostRequest,
) -> Result<Cost, ApiError> {
    let (Some(userid), Some(description), Some(category), Some(sum)) = (
        req.userid.filter(|v| !v.is_blank()),
        req.description.filter(|v| !v.trim().is_empty()),
        req.category.filter(|v| !v.trim().is_empty()),
        req.sum.filter(|v| !v.is_blank()),
    ) else {
        warn!("add cost: one or more required fields are missing");
        return Err(ApiError::MissingFields);
    };

    let category: Category = category.parse().map_err(|_| {
        warn!(%category, "add cost: category not recognized");
        ApiError::InvalidCategory
    })?;

    let userid = userid
        .as_i64()
        .ok_or_else(|| ApiError::invalid("userid must be an integer"))?;
    let sum = sum
        .as_f64()
        .ok_or_else(|| ApiError::invalid("sum must be a number"))?;
    let created_at = match req.created_at.as_deref().map(str::trim) {
        None | Some("") => OffsetDateTime::now_utc(),
        Some(raw) => parse_created_at(raw, offset).ok_or_else(|| {
            warn!(created_at = raw, "add cost: unparseable createdAt");
            ApiError::invalid("createdAt must be a date")
        })?,
    };

    if users.find_by_id(userid).await?.is_none() {
        warn!(userid, "add cost: no such user");
        return Err(ApiError::UserNotFound(userid));
    }

    let saved = costs
        .insert(NewCost {
            userid,
            description,
            category,
            sum,
            created_at,
        })
        .await?;
    info!(cost_id = %saved.id, userid, %category, sum, "cost added");
    Ok(saved)
}

pub async fn generate_report(
    users: &dyn UserStore,
    costs: &dyn CostStore,
    offset: UtcOffset,
    query: &ReportQuery,
) -> Result<MonthlyReport, ApiError> {
    let period = report::parse_query(query, offset).inspect_err(|e| {
        warn!(error = %e, ?query, "report: rejected query");
    })?;

    if users.find_by_id(period.userid).await?.is_none() {
        warn!(userid = period.userid, "report: no such user");
        return Err(ApiError::UserNotFound(period.userid));
    }

    let found = costs
        .list_between(period.userid, period.start, period.end)
        .await?;

    Ok(MonthlyReport {
        userid: period.userid,
        year: period.year,
        month: period.month as u8,
        costs: report::group_by_category(found, offset),
    })
}
