//! Elasticsearch Query DSL builder.
//!
//! Translates a grid [`RowModelRequest`] into an Elasticsearch search body.

use serde_json::{Value, json};
use tracing::debug;

use crate::schema::{ColumnDef, ColumnRegistry};
use crate::types::RowModelRequest;
use crate::types::lenient::coerce_number;

use super::aggregation::{self, GroupLevel, ValueAgg};
use super::filter_handlers;

/// Default cap on `from + size`, matching the index setting of the same name.
pub const DEFAULT_MAX_RESULT_WINDOW: u64 = 10000;

/// A complete Elasticsearch query body ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct EsQuery {
    /// The complete query body.
    pub body: Value,
    /// How to read group rows back out of the response; `None` for flat pages.
    pub grouping: Option<GroupingPlan>,
}

impl EsQuery {
    /// Returns true if the query asks for group rows.
    pub fn is_grouped(&self) -> bool {
        self.grouping.is_some()
    }
}

/// Describes the group rows a grouped query produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupingPlan {
    /// Grid column id of the current grouping level.
    pub column_id: String,
    /// Name of the terms aggregation holding the buckets.
    pub agg_name: String,
    /// Grid column ids of the value aggregations inside each bucket.
    pub value_columns: Vec<String>,
    /// First row of the requested window.
    pub start_row: u64,
}

/// Builds Elasticsearch queries from row model requests.
#[derive(Debug, Clone)]
pub struct RowModelQueryBuilder<'a> {
    registry: &'a ColumnRegistry,
    scope: Vec<Value>,
    max_result_window: u64,
}

impl<'a> RowModelQueryBuilder<'a> {
    /// Creates a new query builder for a dataset's columns.
    pub fn new(registry: &'a ColumnRegistry) -> Self {
        Self {
            registry,
            scope: Vec::new(),
            max_result_window: DEFAULT_MAX_RESULT_WINDOW,
        }
    }

    /// Adds a clause every result must match, ahead of the grid's filters.
    pub fn with_scope(mut self, clause: Value) -> Self {
        self.scope.push(clause);
        self
    }

    /// Caps `from + size` for flat pages and the bucket count for grouped ones.
    pub fn with_max_result_window(mut self, max_result_window: u64) -> Self {
        self.max_result_window = max_result_window;
        self
    }

    /// Builds a complete ES query from a row model request.
    pub fn build(&self, request: &RowModelRequest) -> EsQuery {
        if request.pivot_mode || !request.pivot_cols.is_empty() {
            debug!(
                pivot_cols = request.pivot_cols.len(),
                "Pivoting is not supported; ignoring pivot columns"
            );
        }

        let mut filter_clauses = self.scope.clone();
        filter_clauses.extend(self.group_key_clauses(request));

        // One clause per filter model entry
        for (column, filter) in &request.filter_model {
            let Some(def) = self.registry.get(column) else {
                debug!(column = %column, "Skipping filter on unknown column");
                continue;
            };
            if let Some(clause) = filter_handlers::build_clause(def, filter) {
                filter_clauses.push(clause);
            }
        }

        let query = if filter_clauses.is_empty() {
            json!({ "match_all": {} })
        } else {
            json!({ "bool": { "filter": filter_clauses } })
        };

        let levels = self.remaining_levels(request);
        if levels.is_empty() {
            self.build_flat(request, query)
        } else {
            self.build_grouped(request, query, &levels)
        }
    }

    /// One equality filter per selected group key, matched to the grouping
    /// column at the same position.
    fn group_key_clauses(&self, request: &RowModelRequest) -> Vec<Value> {
        request
            .row_group_cols
            .iter()
            .zip(&request.group_keys)
            .filter_map(|(column, key)| {
                let Some(def) = self.registry.get(&column.id) else {
                    debug!(column = %column.id, "Skipping group key on unknown column");
                    return None;
                };
                Some(json!({ "term": { def.exact_field(): group_key_value(def, key) } }))
            })
            .collect()
    }

    /// Grouping columns below the selected keys that the registry knows.
    fn remaining_levels<'r>(&self, request: &'r RowModelRequest) -> Vec<GroupLevel<'r>>
    where
        'a: 'r,
    {
        request
            .row_group_cols
            .iter()
            .skip(request.group_keys.len())
            .filter_map(|column| match self.registry.get(&column.id) {
                Some(def) => Some(GroupLevel {
                    id: column.id.as_str(),
                    def,
                }),
                None => {
                    debug!(column = %column.id, "Skipping unknown grouping column");
                    None
                }
            })
            .collect()
    }

    fn build_flat(&self, request: &RowModelRequest, query: Value) -> EsQuery {
        let from = request.start_row().min(self.max_result_window);
        let size = request
            .page_size()
            .min(self.max_result_window.saturating_sub(from));

        let mut body = json!({
            "query": query,
            "from": from,
            "size": size,
            "track_total_hits": true,
        });

        let sort = self.build_sort(request);
        if !sort.is_empty() {
            body["sort"] = Value::Array(sort);
        }

        EsQuery {
            body,
            grouping: None,
        }
    }

    fn build_grouped(
        &self,
        request: &RowModelRequest,
        query: Value,
        levels: &[GroupLevel<'_>],
    ) -> EsQuery {
        let values: Vec<ValueAgg<'_>> = request
            .value_cols
            .iter()
            .filter_map(|column| {
                let func = column.aggregation()?;
                let def = self.registry.get(&column.id)?;
                Some(ValueAgg {
                    id: column.id.as_str(),
                    def,
                    func,
                })
            })
            .collect();

        let window_end = request.end_row().min(self.max_result_window);
        let window_start = request.start_row().min(window_end);
        let aggs = aggregation::build_group_aggs(
            levels,
            &values,
            &request.sort_model,
            window_start,
            window_end,
        );

        let current = levels[0];
        let body = json!({
            "query": query,
            "size": 0,
            "aggs": Value::Object(aggs),
        });

        EsQuery {
            body,
            grouping: Some(GroupingPlan {
                column_id: current.id.to_string(),
                agg_name: aggregation::group_agg_name(current.id),
                value_columns: values.iter().map(|v| v.id.to_string()).collect(),
                start_row: window_start,
            }),
        }
    }

    /// Maps the sort model 1:1 onto the columns' exact fields.
    fn build_sort(&self, request: &RowModelRequest) -> Vec<Value> {
        request
            .sort_model
            .iter()
            .filter_map(|item| {
                let Some(def) = self.registry.get(&item.col_id) else {
                    debug!(column = %item.col_id, "Skipping sort on unknown column");
                    return None;
                };
                Some(json!({ def.exact_field(): { "order": item.sort.as_str() } }))
            })
            .collect()
    }
}

/// Converts a group key to the type stored in the column's exact field.
fn group_key_value(def: &ColumnDef, key: &str) -> Value {
    if def.is_numeric() {
        coerce_number(&Value::String(key.to_string()))
            .unwrap_or_else(|| Value::String(key.to_string()))
    } else {
        Value::String(key.to_string())
    }
}

/// Translates a row model request with default settings and no scope.
///
/// The translation is pure: the same request always yields the same body.
pub fn translate(registry: &ColumnRegistry, request: &RowModelRequest) -> EsQuery {
    RowModelQueryBuilder::new(registry).build(request)
}
