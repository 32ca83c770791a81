//! Number filter handler for Elasticsearch.

use serde_json::{Map, Value, json};

use crate::schema::ColumnDef;
use crate::types::lenient::coerce_number;
use crate::types::{NumberCondition, NumberOperator};

use super::{exists, missing, must_not};

/// Builds an ES query clause for a number condition.
///
/// Operands arriving as strings are coerced (`"013"` becomes `13`); numeric
/// identifier columns are compared on their `.integer` sub-field.
pub fn build_clause(def: &ColumnDef, condition: &NumberCondition) -> Option<Value> {
    let field = def.numeric_field();
    let operand = || condition.filter.as_ref().and_then(coerce_number);

    match condition.operator? {
        NumberOperator::Equals => Some(json!({ "term": { field: operand()? } })),
        NumberOperator::NotEqual => Some(must_not(json!({ "term": { field: operand()? } }))),
        NumberOperator::GreaterThan => range(&field, &[("gt", operand())]),
        NumberOperator::GreaterThanOrEqual => range(&field, &[("gte", operand())]),
        NumberOperator::LessThan => range(&field, &[("lt", operand())]),
        NumberOperator::LessThanOrEqual => range(&field, &[("lte", operand())]),
        NumberOperator::InRange => {
            let upper = condition.filter_to.as_ref().and_then(coerce_number);
            range(&field, &[("gte", operand()), ("lte", upper)])
        }
        NumberOperator::Blank => Some(missing(&def.field)),
        NumberOperator::NotBlank => Some(exists(&def.field)),
        NumberOperator::Unsupported => None,
    }
}

/// Builds a `range` clause from the bounds that are present.
fn range(field: &str, bounds: &[(&str, Option<Value>)]) -> Option<Value> {
    let mut conditions = Map::new();
    for (key, bound) in bounds {
        if let Some(bound) = bound {
            conditions.insert((*key).to_string(), bound.clone());
        }
    }

    if conditions.is_empty() {
        None
    } else {
        Some(json!({ "range": { field: Value::Object(conditions) } }))
    }
}
