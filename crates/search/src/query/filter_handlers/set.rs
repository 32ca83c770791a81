//! Set filter handler for Elasticsearch.

use serde_json::{Value, json};

use crate::schema::ColumnDef;
use crate::types::SetFilter;
use crate::types::lenient::{coerce_number, scalar_to_string};

/// Builds a `terms` clause for a set filter.
///
/// Blank (`null`) entries are ignored. Numeric columns coerce each value and
/// drop the ones that are not numbers. An empty set emits nothing.
pub fn build_clause(def: &ColumnDef, filter: &SetFilter) -> Option<Value> {
    let values = filter.values.as_ref()?;

    let terms: Vec<Value> = if def.is_numeric() {
        values.iter().filter_map(coerce_number).collect()
    } else {
        values
            .iter()
            .filter_map(scalar_to_string)
            .map(Value::String)
            .collect()
    };

    if terms.is_empty() {
        return None;
    }

    Some(json!({ "terms": { def.exact_field(): terms } }))
}
