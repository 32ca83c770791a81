//! Maps search responses back into grid pages.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::SearchResponse;

use super::aggregation::GROUP_COUNT_AGG;
use super::query_builder::{EsQuery, GroupingPlan};

/// Key holding a group row's document count.
pub const CHILD_COUNT_KEY: &str = "childCount";

/// One page of grid rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridPage {
    /// The rows of the page.
    pub rows: Vec<Value>,
    /// Total number of rows at this level.
    pub total: u64,
}

/// Turns the response to `query` into a grid page.
///
/// Flat pages return the hits' sources. Grouped pages return one row per
/// bucket of the current grouping level.
pub fn map_response(query: &EsQuery, response: &SearchResponse) -> GridPage {
    match &query.grouping {
        None => GridPage {
            rows: response.sources().cloned().collect(),
            total: response.total(),
        },
        Some(plan) => map_groups(plan, response),
    }
}

fn map_groups(plan: &GroupingPlan, response: &SearchResponse) -> GridPage {
    let rows: Vec<Value> = response
        .aggregation(&plan.agg_name)
        .and_then(|agg| agg.get("buckets"))
        .and_then(Value::as_array)
        .map(|buckets| buckets.iter().map(|b| group_row(plan, b)).collect())
        .unwrap_or_default();

    let total = response
        .aggregation(GROUP_COUNT_AGG)
        .and_then(|agg| agg.get("value"))
        .and_then(Value::as_u64)
        .unwrap_or(plan.start_row + rows.len() as u64);

    GridPage { rows, total }
}

/// Builds `{ <group column>: key, childCount, <value column>: value, ... }`.
fn group_row(plan: &GroupingPlan, bucket: &Value) -> Value {
    let mut row = Map::new();

    let key = bucket
        .get("key_as_string")
        .or_else(|| bucket.get("key"))
        .cloned()
        .unwrap_or(Value::Null);
    row.insert(plan.column_id.clone(), key);
    row.insert(
        CHILD_COUNT_KEY.to_string(),
        bucket.get("doc_count").cloned().unwrap_or(Value::from(0)),
    );

    for column in &plan.value_columns {
        let value = bucket
            .get(column)
            .and_then(|agg| agg.get("value"))
            .cloned()
            .unwrap_or(Value::Null);
        row.insert(column.clone(), value);
    }

    Value::Object(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::translate;
    use crate::schema::Dataset;
    use crate::types::{AggFunc, RowModelRequest};
    use serde_json::json;

    #[test]
    fn test_flat_page() {
        let es_query = translate(
            Dataset::Pluto.registry(),
            &RowModelRequest::new(0, 2),
        );
        let mut response = SearchResponse::from_sources(vec![
            json!({ "bbl": "1000130001" }),
            json!({ "bbl": "1000130002" }),
        ]);
        response.hits.total.as_mut().unwrap().value = 812;

        let page = map_response(&es_query, &response);
        assert_eq!(page.total, 812);
        assert_eq!(page.rows[1], json!({ "bbl": "1000130002" }));
    }

    #[test]
    fn test_grouped_page() {
        let request = RowModelRequest::new(0, 100)
            .with_group_col("doc_type")
            .with_value_col("document_amt", AggFunc::Sum);
        let es_query = translate(Dataset::AcrisDocuments.registry(), &request);

        let response = SearchResponse::default().with_aggregations(json!({
            "group_by_doc_type": {
                "buckets": [
                    { "key": "DEED", "doc_count": 12, "document_amt": { "value": 4500000.0 } },
                    { "key": "MTGE", "doc_count": 9, "document_amt": { "value": 3100000.0 } }
                ]
            },
            "group_count": { "value": 5 }
        }));

        let page = map_response(&es_query, &response);
        assert_eq!(page.total, 5);
        assert_eq!(
            page.rows[0],
            json!({ "doc_type": "DEED", "childCount": 12, "document_amt": 4500000.0 })
        );
    }

    #[test]
    fn test_grouped_page_without_count_falls_back() {
        let request = RowModelRequest::new(200, 300).with_group_col("doc_type");
        let es_query = translate(Dataset::AcrisDocuments.registry(), &request);

        let response = SearchResponse::default().with_aggregations(json!({
            "group_by_doc_type": { "buckets": [{ "key": "SAT", "doc_count": 1 }] }
        }));

        let page = map_response(&es_query, &response);
        assert_eq!(page.total, 201);
        assert_eq!(page.rows, vec![json!({ "doc_type": "SAT", "childCount": 1 })]);
    }

    #[test]
    fn test_date_bucket_prefers_formatted_key() {
        let request = RowModelRequest::new(0, 10).with_group_col("document_date");
        let es_query = translate(Dataset::AcrisDocuments.registry(), &request);

        let response = SearchResponse::default().with_aggregations(json!({
            "group_by_document_date": {
                "buckets": [{ "key": 1577836800000u64, "key_as_string": "2020-01-01", "doc_count": 3 }]
            }
        }));

        let page = map_response(&es_query, &response);
        assert_eq!(page.rows[0]["document_date"], json!("2020-01-01"));
    }
}
