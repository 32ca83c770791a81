//! Date filter handler for Elasticsearch.
//!
//! The grid filters whole calendar days. Every comparison is turned into a
//! half-open day range `[lower, upper)` so that timestamps within a day are
//! matched regardless of their time component.

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value, json};

use crate::schema::ColumnDef;
use crate::types::{DateCondition, DateOperator};

use super::{exists, missing, must_not};

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Builds an ES query clause for a date condition.
pub fn build_clause(def: &ColumnDef, condition: &DateCondition) -> Option<Value> {
    let field = def.field.as_str();
    let from = || condition.date_from.as_deref().and_then(parse_day);

    match condition.operator? {
        DateOperator::Equals => {
            let day = from()?;
            range(field, Some(day), next_day(day))
        }
        DateOperator::NotEqual => {
            let day = from()?;
            range(field, Some(day), next_day(day)).map(must_not)
        }
        DateOperator::GreaterThan => range(field, next_day(from()?), None),
        DateOperator::LessThan => range(field, None, Some(from()?)),
        DateOperator::InRange => {
            let upper = condition
                .date_to
                .as_deref()
                .and_then(parse_day)
                .and_then(next_day);
            range(field, from(), upper)
        }
        DateOperator::Blank => Some(missing(field)),
        DateOperator::NotBlank => Some(exists(field)),
        DateOperator::Unsupported => None,
    }
}

/// Parses a calendar day from `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` or RFC 3339.
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(value, DAY_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

fn next_day(day: NaiveDate) -> Option<NaiveDate> {
    day.checked_add_days(Days::new(1))
}

/// Builds `range { gte: lower, lt: upper }` from the bounds present.
fn range(field: &str, lower: Option<NaiveDate>, upper: Option<NaiveDate>) -> Option<Value> {
    let mut conditions = Map::new();
    if let Some(lower) = lower {
        conditions.insert(
            "gte".to_string(),
            json!(lower.format(DAY_FORMAT).to_string()),
        );
    }
    if let Some(upper) = upper {
        conditions.insert(
            "lt".to_string(),
            json!(upper.format(DAY_FORMAT).to_string()),
        );
    }

    if conditions.is_empty() {
        None
    } else {
        Some(json!({ "range": { field: Value::Object(conditions) } }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn condition(operator: DateOperator, from: Option<&str>, to: Option<&str>) -> DateCondition {
        DateCondition {
            operator: Some(operator),
            date_from: from.map(str::to_string),
            date_to: to.map(str::to_string),
        }
    }

    #[test]
    fn test_in_range_covers_both_days() {
        let clause = build_clause(
            &ColumnDef::date("document_date"),
            &condition(
                DateOperator::InRange,
                Some("2020-01-01 00:00:00"),
                Some("2020-12-31 00:00:00"),
            ),
        )
        .unwrap();

        assert_eq!(
            clause,
            json!({
                "range": { "document_date": { "gte": "2020-01-01", "lt": "2021-01-01" } }
            })
        );
    }

    #[test]
    fn test_equals_is_one_day() {
        let clause = build_clause(
            &ColumnDef::date("document_date"),
            &condition(DateOperator::Equals, Some("2024-02-28"), None),
        )
        .unwrap();
        assert_eq!(
            clause["range"]["document_date"],
            json!({ "gte": "2024-02-28", "lt": "2024-02-29" })
        );
    }

    #[test]
    fn test_greater_than_starts_next_day() {
        let clause = build_clause(
            &ColumnDef::date("recorded_datetime"),
            &condition(DateOperator::GreaterThan, Some("2023-12-31"), None),
        )
        .unwrap();
        assert_eq!(
            clause["range"]["recorded_datetime"],
            json!({ "gte": "2024-01-01" })
        );
    }

    #[test]
    fn test_less_than_excludes_day() {
        let clause = build_clause(
            &ColumnDef::date("document_date"),
            &condition(DateOperator::LessThan, Some("2019-06-01T12:00:00Z"), None),
        )
        .unwrap();
        assert_eq!(
            clause["range"]["document_date"],
            json!({ "lt": "2019-06-01" })
        );
    }

    #[test]
    fn test_not_equal_negates_day() {
        let clause = build_clause(
            &ColumnDef::date("document_date"),
            &condition(DateOperator::NotEqual, Some("2024-01-15"), None),
        )
        .unwrap();
        assert!(clause["bool"]["must_not"][0]["range"]["document_date"].is_object());
    }

    #[test]
    fn test_unparseable_date_emits_nothing() {
        let def = ColumnDef::date("document_date");
        assert_eq!(
            build_clause(&def, &condition(DateOperator::Equals, Some("last week"), None)),
            None
        );
        assert_eq!(
            build_clause(&def, &condition(DateOperator::InRange, None, None)),
            None
        );
    }

    #[test]
    fn test_parse_day_formats() {
        let expected = NaiveDate::from_ymd_opt(2021, 3, 4);
        assert_eq!(parse_day("2021-03-04"), expected);
        assert_eq!(parse_day("2021-03-04 10:11:12"), expected);
        assert_eq!(parse_day("2021-03-04T10:11:12-05:00"), expected);
        assert_eq!(parse_day("03/04/2021"), None);
    }
}
