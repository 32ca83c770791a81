//! Grouping aggregations.
//!
//! A grouped grid request asks for one page of the buckets at the current
//! grouping level. The current level becomes a `terms` aggregation sized to
//! the end of the window with a `bucket_sort` that cuts out the page; each
//! deeper level nests inside it, sized so the whole tree stays within the
//! cluster's bucket limit. Value columns are aggregated within every
//! level's buckets. A `cardinality` sibling counts the distinct groups so
//! the grid knows how many rows exist in total.

use serde_json::{Map, Value, json};

use crate::schema::ColumnDef;
use crate::types::{AggFunc, SortDirection, SortModelItem};

/// Name of the distinct group count aggregation.
pub const GROUP_COUNT_AGG: &str = "group_count";

/// Name of the page-cutting pipeline aggregation.
const PAGE_AGG: &str = "page";

/// Largest bucket count for levels below the current one.
pub const NESTED_BUCKET_SIZE: u64 = 100;

/// Default `search.max_buckets` of an Elasticsearch cluster.
pub const MAX_BUCKETS: u64 = 65_536;

/// A grouping column resolved against the registry.
#[derive(Debug, Clone, Copy)]
pub struct GroupLevel<'a> {
    /// Grid column id.
    pub id: &'a str,
    /// Index mapping of the column.
    pub def: &'a ColumnDef,
}

/// A value column resolved against the registry.
#[derive(Debug, Clone, Copy)]
pub struct ValueAgg<'a> {
    /// Grid column id, also used as the aggregation name.
    pub id: &'a str,
    /// Index mapping of the column.
    pub def: &'a ColumnDef,
    /// Aggregation function.
    pub func: AggFunc,
}

/// Returns the aggregation name used for a grouping column.
pub fn group_agg_name(column_id: &str) -> String {
    format!("group_by_{}", column_id)
}

/// Builds the `aggs` section for a grouped request.
///
/// `levels` holds the current grouping level first, followed by the deeper
/// ones. `window_end` is already clamped by the caller. When the window is
/// empty only the group count is requested.
pub fn build_group_aggs(
    levels: &[GroupLevel<'_>],
    values: &[ValueAgg<'_>],
    sort: &[SortModelItem],
    window_start: u64,
    window_end: u64,
) -> Map<String, Value> {
    let mut aggs = Map::new();
    let Some((current, deeper)) = levels.split_first() else {
        return aggs;
    };

    aggs.insert(
        GROUP_COUNT_AGG.to_string(),
        json!({ "cardinality": { "field": current.def.exact_field() } }),
    );

    let page_size = window_end.saturating_sub(window_start);
    if page_size == 0 {
        return aggs;
    }

    let mut terms = json!({ "field": current.def.exact_field(), "size": window_end });
    if let Some(order) = bucket_order(current, values, sort) {
        terms["order"] = order;
    }

    let nested_size = nested_bucket_size(window_end, deeper.len());
    let mut sub_aggs = level_sub_aggs(deeper, values, nested_size);
    sub_aggs.insert(
        PAGE_AGG.to_string(),
        json!({ "bucket_sort": { "from": window_start, "size": page_size } }),
    );

    aggs.insert(
        group_agg_name(current.id),
        json!({ "terms": terms, "aggs": Value::Object(sub_aggs) }),
    );
    aggs
}

/// Builds the value aggregations plus the next grouping level, recursively.
fn level_sub_aggs(
    deeper: &[GroupLevel<'_>],
    values: &[ValueAgg<'_>],
    size: u64,
) -> Map<String, Value> {
    let mut aggs = value_aggs(values);

    if let Some((next, rest)) = deeper.split_first() {
        let mut terms = json!({
            "terms": { "field": next.def.exact_field(), "size": size }
        });
        let nested = level_sub_aggs(rest, values, size);
        if !nested.is_empty() {
            terms["aggs"] = Value::Object(nested);
        }
        aggs.insert(group_agg_name(next.id), terms);
    }

    aggs
}

/// Picks the bucket count for the `depth` levels below a current level of
/// `window_end` buckets.
///
/// Elasticsearch collects every bucket before `bucket_sort` trims the page,
/// so the tree may hold at most [`MAX_BUCKETS`] buckets across all levels.
/// The size never drops below one.
pub fn nested_bucket_size(window_end: u64, depth: usize) -> u64 {
    if depth == 0 {
        return NESTED_BUCKET_SIZE;
    }
    let tree_buckets = |size: u64| {
        let mut level = window_end;
        let mut total = window_end;
        for _ in 0..depth {
            level = level.saturating_mul(size);
            total = total.saturating_add(level);
        }
        total
    };
    (1..=NESTED_BUCKET_SIZE)
        .rev()
        .find(|&size| tree_buckets(size) <= MAX_BUCKETS)
        .unwrap_or(1)
}

/// Builds one metric aggregation per value column.
pub fn value_aggs(values: &[ValueAgg<'_>]) -> Map<String, Value> {
    values
        .iter()
        .map(|value| {
            let field = match value.func {
                AggFunc::Count => value.def.exact_field(),
                _ => value.def.numeric_field(),
            };
            (
                value.id.to_string(),
                json!({ value.func.es_name(): { "field": field } }),
            )
        })
        .collect()
}

/// Orders the current level's buckets by the first applicable sort entry:
/// the group column sorts by key, a value column by its aggregate.
fn bucket_order(
    current: &GroupLevel<'_>,
    values: &[ValueAgg<'_>],
    sort: &[SortModelItem],
) -> Option<Value> {
    sort.iter().find_map(|item| {
        let direction: SortDirection = item.sort;
        if item.col_id == current.id {
            Some(json!({ "_key": direction.as_str() }))
        } else if values.iter().any(|v| v.id == item.col_id) {
            Some(json!({ item.col_id.as_str(): direction.as_str() }))
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sort(col: &str, direction: SortDirection) -> SortModelItem {
        SortModelItem {
            col_id: col.to_string(),
            sort: direction,
        }
    }

    #[test]
    fn test_current_level_window() {
        let def = ColumnDef::keyword("doc_type");
        let levels = [GroupLevel {
            id: "doc_type",
            def: &def,
        }];

        let aggs = build_group_aggs(&levels, &[], &[], 20, 40);

        let terms = &aggs["group_by_doc_type"]["terms"];
        assert_eq!(terms["field"], json!("doc_type"));
        assert_eq!(terms["size"], json!(40));
        assert_eq!(
            aggs["group_by_doc_type"]["aggs"]["page"]["bucket_sort"],
            json!({ "from": 20, "size": 20 })
        );
        assert_eq!(
            aggs[GROUP_COUNT_AGG],
            json!({ "cardinality": { "field": "doc_type" } })
        );
    }

    #[test]
    fn test_nested_levels_carry_values() {
        let borough = ColumnDef::keyword("borough");
        let doc_type = ColumnDef::keyword("doc_type");
        let amount = ColumnDef::number("document_amt");
        let levels = [
            GroupLevel {
                id: "borough",
                def: &borough,
            },
            GroupLevel {
                id: "doc_type",
                def: &doc_type,
            },
        ];
        let values = [ValueAgg {
            id: "document_amt",
            def: &amount,
            func: AggFunc::Sum,
        }];

        let aggs = build_group_aggs(&levels, &values, &[], 0, 10);

        let current = &aggs["group_by_borough"]["aggs"];
        assert_eq!(aggs["group_by_borough"]["terms"]["size"], json!(10));
        assert_eq!(
            current["document_amt"],
            json!({ "sum": { "field": "document_amt" } })
        );
        let nested = &current["group_by_doc_type"];
        assert_eq!(nested["terms"]["size"], json!(NESTED_BUCKET_SIZE));
        assert_eq!(
            nested["aggs"]["document_amt"],
            json!({ "sum": { "field": "document_amt" } })
        );
    }

    #[test]
    fn test_deep_page_stays_under_bucket_limit() {
        let borough = ColumnDef::keyword("borough");
        let doc_type = ColumnDef::keyword("doc_type");
        let party_type = ColumnDef::keyword("party_type");
        let levels = [
            GroupLevel {
                id: "borough",
                def: &borough,
            },
            GroupLevel {
                id: "doc_type",
                def: &doc_type,
            },
            GroupLevel {
                id: "party_type",
                def: &party_type,
            },
        ];

        let aggs = build_group_aggs(&levels, &[], &[], 9_900, 10_000);

        let current = &aggs["group_by_borough"];
        assert_eq!(current["terms"]["size"], json!(10_000));
        let second = &current["aggs"]["group_by_doc_type"];
        let third = &second["aggs"]["group_by_party_type"];
        let second_size = second["terms"]["size"].as_u64().unwrap();
        let third_size = third["terms"]["size"].as_u64().unwrap();
        assert_eq!(second_size, third_size);
        assert!(second_size >= 1);

        let total = 10_000 + 10_000 * second_size + 10_000 * second_size * third_size;
        assert!(total <= MAX_BUCKETS, "{} buckets requested", total);
    }

    #[test]
    fn test_nested_bucket_size() {
        assert_eq!(nested_bucket_size(10, 1), NESTED_BUCKET_SIZE);
        assert_eq!(nested_bucket_size(100, 1), 100);
        assert_eq!(nested_bucket_size(1_000, 1), 64);
        assert_eq!(nested_bucket_size(10_000, 2), 1);
        assert_eq!(nested_bucket_size(u64::MAX, 3), 1);
        assert_eq!(nested_bucket_size(10_000, 0), NESTED_BUCKET_SIZE);
    }

    #[test]
    fn test_empty_window_only_counts() {
        let def = ColumnDef::keyword("doc_type");
        let levels = [GroupLevel {
            id: "doc_type",
            def: &def,
        }];

        let aggs = build_group_aggs(&levels, &[], &[], 10, 10);
        assert_eq!(aggs.len(), 1);
        assert!(aggs.contains_key(GROUP_COUNT_AGG));
    }

    #[test]
    fn test_sort_on_group_column_orders_by_key() {
        let def = ColumnDef::integer_id("block");
        let levels = [GroupLevel {
            id: "block",
            def: &def,
        }];

        let aggs = build_group_aggs(
            &levels,
            &[],
            &[sort("block", SortDirection::Desc)],
            0,
            100,
        );
        assert_eq!(
            aggs["group_by_block"]["terms"]["order"],
            json!({ "_key": "desc" })
        );
        assert_eq!(aggs["group_by_block"]["terms"]["field"], json!("block.integer"));
    }

    #[test]
    fn test_sort_on_value_column_orders_by_metric() {
        let group = ColumnDef::keyword("doc_type");
        let amount = ColumnDef::number("document_amt");
        let levels = [GroupLevel {
            id: "doc_type",
            def: &group,
        }];
        let values = [ValueAgg {
            id: "document_amt",
            def: &amount,
            func: AggFunc::Max,
        }];

        let aggs = build_group_aggs(
            &levels,
            &values,
            &[
                sort("document_date", SortDirection::Asc),
                sort("document_amt", SortDirection::Asc),
            ],
            0,
            100,
        );
        assert_eq!(
            aggs["group_by_doc_type"]["terms"]["order"],
            json!({ "document_amt": "asc" })
        );
    }

    #[test]
    fn test_count_uses_value_count() {
        let def = ColumnDef::keyword("document_id");
        let aggs = value_aggs(&[ValueAgg {
            id: "document_id",
            def: &def,
            func: AggFunc::Count,
        }]);
        assert_eq!(
            aggs["document_id"],
            json!({ "value_count": { "field": "document_id" } })
        );
    }
}
