//! Server-side row model request types.
//!
//! A [`RowModelRequest`] describes the next page of rows a virtualized data
//! grid wants from the server: the row window, the grouping state, value
//! aggregations, filters and sort order.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

use super::filter::{ColumnFilter, lenient_filter_model};
use super::lenient;

/// Number of rows requested when the grid omits `endRow`.
pub const DEFAULT_BLOCK_SIZE: u64 = 100;

/// A request for one page of a server-backed data grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowModelRequest {
    /// First row of the window (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_row: Option<u64>,

    /// End of the window (exclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_row: Option<u64>,

    /// Grouping columns, outermost first.
    #[serde(default)]
    pub row_group_cols: Vec<ColumnVo>,

    /// Keys already drilled into, one per grouping level above this request.
    #[serde(default, deserialize_with = "lenient::strings_or_numbers")]
    pub group_keys: Vec<String>,

    /// Columns aggregated on group rows.
    #[serde(default)]
    pub value_cols: Vec<ColumnVo>,

    /// Pivot columns. Accepted but not translated.
    #[serde(default)]
    pub pivot_cols: Vec<ColumnVo>,

    /// Pivot mode flag. Accepted but not translated.
    #[serde(default)]
    pub pivot_mode: bool,

    /// Filters keyed by column id.
    #[serde(default, deserialize_with = "lenient_filter_model")]
    pub filter_model: BTreeMap<String, ColumnFilter>,

    /// Sort order, highest priority first.
    #[serde(default)]
    pub sort_model: Vec<SortModelItem>,
}

impl RowModelRequest {
    /// Creates a request for the window `[start_row, end_row)`.
    pub fn new(start_row: u64, end_row: u64) -> Self {
        Self {
            start_row: Some(start_row),
            end_row: Some(end_row),
            ..Default::default()
        }
    }

    /// Parses a request from an untyped JSON body.
    ///
    /// Fails with [`ValidationError::InvalidRequest`] only when the JSON has
    /// the wrong shape (e.g. a string where a row index belongs). Unknown
    /// filter kinds and operators are tolerated.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        serde_json::from_value(value).map_err(|e| ValidationError::InvalidRequest {
            message: e.to_string(),
        })
    }

    /// Returns the first row of the window.
    pub fn start_row(&self) -> u64 {
        self.start_row.unwrap_or(0)
    }

    /// Returns the end of the window, defaulting to one block past the start.
    pub fn end_row(&self) -> u64 {
        self.end_row
            .unwrap_or_else(|| self.start_row().saturating_add(DEFAULT_BLOCK_SIZE))
    }

    /// Returns the number of rows in the window; zero when `end_row <= start_row`.
    pub fn page_size(&self) -> u64 {
        self.end_row().saturating_sub(self.start_row())
    }

    /// Returns the grouping level this request is for.
    pub fn group_level(&self) -> usize {
        self.group_keys.len()
    }

    /// Returns true if this request asks for group rows rather than leaf rows.
    pub fn is_grouping(&self) -> bool {
        self.row_group_cols.len() > self.group_keys.len()
    }

    /// Adds a filter for a column.
    pub fn with_filter(mut self, column: impl Into<String>, filter: ColumnFilter) -> Self {
        self.filter_model.insert(column.into(), filter);
        self
    }

    /// Appends a sort entry.
    pub fn with_sort(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_model.push(SortModelItem {
            col_id: column.into(),
            sort: direction,
        });
        self
    }

    /// Appends a grouping column.
    pub fn with_group_col(mut self, column: impl Into<String>) -> Self {
        self.row_group_cols.push(ColumnVo::new(column));
        self
    }

    /// Appends an already selected group key.
    pub fn with_group_key(mut self, key: impl Into<String>) -> Self {
        self.group_keys.push(key.into());
        self
    }

    /// Appends a value column with an aggregation function.
    pub fn with_value_col(mut self, column: impl Into<String>, agg_func: AggFunc) -> Self {
        self.value_cols
            .push(ColumnVo::new(column).with_agg_func(agg_func.as_str()));
        self
    }
}

/// A column reference as sent by the grid.
///
/// Accepted either as a bare id string or as an object with an `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawColumn", rename_all = "camelCase")]
pub struct ColumnVo {
    /// Column id.
    pub id: String,
    /// Bound field name, if different from the id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Aggregation function for value columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agg_func: Option<String>,
}

impl ColumnVo {
    /// Creates a column reference with just an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field: None,
            display_name: None,
            agg_func: None,
        }
    }

    /// Sets the aggregation function.
    pub fn with_agg_func(mut self, agg_func: impl Into<String>) -> Self {
        self.agg_func = Some(agg_func.into());
        self
    }

    /// Returns the parsed aggregation function, if it is one we translate.
    pub fn aggregation(&self) -> Option<AggFunc> {
        self.agg_func.as_deref().and_then(AggFunc::parse)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawColumn {
    Id(String),
    Column(ColumnObject),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ColumnObject {
    id: String,
    #[serde(default)]
    field: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    agg_func: Option<String>,
}

impl From<RawColumn> for ColumnVo {
    fn from(raw: RawColumn) -> Self {
        match raw {
            RawColumn::Id(id) => ColumnVo::new(id),
            RawColumn::Column(c) => ColumnVo {
                id: c.id,
                field: c.field,
                display_name: c.display_name,
                agg_func: c.agg_func,
            },
        }
    }
}

/// Aggregation functions for value columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggFunc {
    /// Sum of values.
    Sum,
    /// Mean of values.
    Avg,
    /// Minimum value.
    Min,
    /// Maximum value.
    Max,
    /// Number of values.
    Count,
}

impl AggFunc {
    /// Parses a grid aggregation function name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sum" => Some(AggFunc::Sum),
            "avg" => Some(AggFunc::Avg),
            "min" => Some(AggFunc::Min),
            "max" => Some(AggFunc::Max),
            "count" => Some(AggFunc::Count),
            _ => None,
        }
    }

    /// Returns the grid name of the function.
    pub fn as_str(&self) -> &'static str {
        match self {
            AggFunc::Sum => "sum",
            AggFunc::Avg => "avg",
            AggFunc::Min => "min",
            AggFunc::Max => "max",
            AggFunc::Count => "count",
        }
    }

    /// Returns the Elasticsearch metric aggregation implementing the function.
    pub fn es_name(&self) -> &'static str {
        match self {
            AggFunc::Count => "value_count",
            other => other.as_str(),
        }
    }
}

/// One entry of the sort model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortModelItem {
    /// Column id.
    pub col_id: String,
    /// Sort direction.
    pub sort: SortDirection,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// Returns the Elasticsearch order keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
