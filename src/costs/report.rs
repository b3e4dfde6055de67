use time::{
    error::ComponentRange, util::days_in_year_month, Date, Duration, Month, OffsetDateTime,
    PrimitiveDateTime, UtcOffset,
};

use crate::{
    costs::{
        dto::{CategoryCosts, ReportItem, ReportQuery},
        repo_types::Cost,
    },
    error::ApiError,
};

/// Validated report request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    pub userid: i64,
    pub year: i32,
    pub month: Month,
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Presence is checked for all three parameters before any is parsed. The
/// month bounds are resolved here so calendar errors surface before any lookup.
pub fn parse_query(query: &ReportQuery, offset: UtcOffset) -> Result<ReportPeriod, ApiError> {
    let (Some(id), Some(year), Some(month)) = (
        present(&query.id),
        present(&query.year),
        present(&query.month),
    ) else {
        return Err(ApiError::MissingParameter);
    };

    let (Ok(userid), Ok(year), Ok(month)) =
        (id.parse::<i64>(), year.parse::<i64>(), month.parse::<i64>())
    else {
        return Err(ApiError::invalid(
            "Query parameters id, year, and month must be numbers",
        ));
    };

    let year = i32::try_from(year)
        .map_err(|_| ApiError::invalid(format!("Year {year} is out of range")))?;
    let month = u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or_else(|| ApiError::invalid("Query parameter month must be between 1 and 12"))?;
    let (start, end) = month_bounds(year, month, offset)?;

    Ok(ReportPeriod {
        userid,
        year,
        month,
        start,
        end,
    })
}

/// Half-open `[first of month, first of next month)` at midnight in `offset`,
/// returned in UTC.
pub fn month_bounds(
    year: i32,
    month: Month,
    offset: UtcOffset,
) -> Result<(OffsetDateTime, OffsetDateTime), ApiError> {
    let out_of_range =
        || ApiError::invalid(format!("{month} {year} is outside the supported date range"));

    let first = Date::from_calendar_date(year, month, 1)
        .map_err(|_: ComponentRange| out_of_range())?;
    let last = first
        .replace_day(days_in_year_month(year, month))
        .map_err(|_: ComponentRange| out_of_range())?;
    let to_utc = Duration::seconds(offset.whole_seconds().into());

    let start = first
        .midnight()
        .checked_sub(to_utc)
        .ok_or_else(out_of_range)?;
    // December 9999 ends past the last representable instant.
    let end = last
        .midnight()
        .checked_add(Duration::DAY - to_utc)
        .unwrap_or(PrimitiveDateTime::MAX);

    Ok((start.assume_utc(), end.assume_utc()))
}

/// Buckets costs by category, ordered by timestamp within each bucket.
pub fn group_by_category(mut costs: Vec<Cost>, offset: UtcOffset) -> CategoryCosts {
    costs.sort_by_key(|c| c.created_at);

    let mut grouped = CategoryCosts::default();
    for cost in costs {
        let day = cost.created_at.to_offset(offset).day();
        grouped.get_mut(cost.category).push(ReportItem {
            sum: cost.sum,
            description: cost.description,
            day,
        });
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costs::repo_types::Category;
    use time::macros::{datetime, offset};
    use uuid::Uuid;

    fn query(id: &str, year: &str, month: &str) -> ReportQuery {
        ReportQuery {
            id: Some(id.into()),
            year: Some(year.into()),
            month: Some(month.into()),
        }
    }

    fn cost(category: Category, description: &str, at: OffsetDateTime) -> Cost {
        Cost {
            id: Uuid::new_v4(),
            userid: 1,
            description: description.into(),
            category,
            sum: 1.0,
            created_at: at,
        }
    }

    #[test]
    fn parses_valid_query() {
        let period = parse_query(&query("123123", "2025", "2"), UtcOffset::UTC).unwrap();
        assert_eq!(
            period,
            ReportPeriod {
                userid: 123123,
                year: 2025,
                month: Month::February,
                start: datetime!(2025-02-01 0:00 UTC),
                end: datetime!(2025-03-01 0:00 UTC),
            }
        );
    }

    #[test]
    fn missing_wins_over_malformed() {
        let q = ReportQuery {
            id: Some("abc".into()),
            year: Some("2025".into()),
            month: None,
        };
        assert!(matches!(parse_query(&q, UtcOffset::UTC), Err(ApiError::MissingParameter)));

        let blank = query("1", "", "3");
        assert!(matches!(parse_query(&blank, UtcOffset::UTC), Err(ApiError::MissingParameter)));
    }

    #[test]
    fn non_numeric_is_invalid() {
        assert!(matches!(
            parse_query(&query("1", "abc", "3"), UtcOffset::UTC),
            Err(ApiError::InvalidParameter(_))
        ));
        assert!(matches!(
            parse_query(&query("x", "2024", "3"), UtcOffset::UTC),
            Err(ApiError::InvalidParameter(_))
        ));
    }

    #[test]
    fn month_out_of_range_is_invalid() {
        assert!(matches!(
            parse_query(&query("1", "2024", "13"), UtcOffset::UTC),
            Err(ApiError::InvalidParameter(_))
        ));
        assert!(matches!(
            parse_query(&query("1", "2024", "0"), UtcOffset::UTC),
            Err(ApiError::InvalidParameter(_))
        ));
    }

    #[test]
    fn bounds_roll_over_the_year() {
        let (start, end) = month_bounds(2024, Month::December, UtcOffset::UTC).unwrap();
        assert_eq!(start, datetime!(2024-12-01 0:00 UTC));
        assert_eq!(end, datetime!(2025-01-01 0:00 UTC));
    }

    #[test]
    fn bounds_use_local_midnight() {
        let (start, end) = month_bounds(2024, Month::February, offset!(+2)).unwrap();
        assert_eq!(start, datetime!(2024-01-31 22:00 UTC));
        assert_eq!(end, datetime!(2024-02-29 22:00 UTC));
    }

    #[test]
    fn bounds_use_local_midnight_west_of_utc() {
        let (start, end) = month_bounds(2024, Month::March, offset!(-5)).unwrap();
        assert_eq!(start, datetime!(2024-03-01 5:00 UTC));
        assert_eq!(end, datetime!(2024-04-01 5:00 UTC));
    }

    #[test]
    fn bounds_reject_unrepresentable_years() {
        assert!(month_bounds(100_000, Month::March, UtcOffset::UTC).is_err());
        assert!(month_bounds(-9999, Month::January, offset!(+2)).is_err());
    }

    #[test]
    fn last_representable_month_is_reportable() {
        let (start, end) = month_bounds(9999, Month::December, UtcOffset::UTC).unwrap();
        assert_eq!(start, datetime!(9999-12-01 0:00 UTC));
        assert_eq!(end, PrimitiveDateTime::MAX.assume_utc());

        let (_, end) = month_bounds(9999, Month::December, offset!(+2)).unwrap();
        assert_eq!(end, datetime!(9999-12-31 22:00 UTC));
    }

    #[test]
    fn calendar_errors_are_query_errors() {
        assert!(matches!(
            parse_query(&query("999", "100000", "1"), UtcOffset::UTC),
            Err(ApiError::InvalidParameter(_))
        ));
        assert!(parse_query(&query("1", "9999", "12"), UtcOffset::UTC).is_ok());
    }

    #[test]
    fn groups_into_buckets_sorted_by_time() {
        let costs = vec![
            cost(Category::Food, "bread", datetime!(2024-03-20 8:00 UTC)),
            cost(Category::Sport, "gym", datetime!(2024-03-02 18:00 UTC)),
            cost(Category::Food, "milk", datetime!(2024-03-05 0:00 UTC)),
        ];

        let grouped = group_by_category(costs, UtcOffset::UTC);
        let food: Vec<_> = grouped.food.iter().map(|i| (&*i.description, i.day)).collect();
        assert_eq!(food, vec![("milk", 5), ("bread", 20)]);
        assert_eq!(grouped.sport.len(), 1);
        assert!(grouped.health.is_empty());
        assert!(grouped.housing.is_empty());
        assert!(grouped.education.is_empty());
    }

    #[test]
    fn day_is_read_in_configured_offset() {
        let costs = vec![cost(Category::Health, "pharmacy", datetime!(2024-03-04 23:30 UTC))];

        let grouped = group_by_category(costs, offset!(+2));
        assert_eq!(grouped.health[0].day, 5);
    }
}
