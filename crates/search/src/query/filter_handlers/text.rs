//! Text filter handler for Elasticsearch.
//!
//! Substring, prefix and suffix matches run case-insensitively against the
//! column's exact (keyword) field. Exact matches use `term`.

use serde_json::{Value, json};

use crate::schema::ColumnDef;
use crate::types::lenient::coerce_number;
use crate::types::{TextCondition, TextOperator};

use super::{exists, missing, must_not};

/// Builds an ES query clause for a text condition.
pub fn build_clause(def: &ColumnDef, condition: &TextCondition) -> Option<Value> {
    let operator = condition.operator?;

    match operator {
        TextOperator::Blank => return Some(missing(&def.field)),
        TextOperator::NotBlank => return Some(exists(&def.field)),
        TextOperator::Unsupported => return None,
        _ => {}
    }

    let value = condition.filter.as_deref().filter(|v| !v.is_empty())?;
    let field = pattern_field(def);

    let clause = match operator {
        TextOperator::Equals => term(def, value)?,
        TextOperator::NotEqual => must_not(term(def, value)?),
        TextOperator::Contains => wildcard(&field, &format!("*{}*", escape_wildcard(value))),
        TextOperator::NotContains => {
            must_not(wildcard(&field, &format!("*{}*", escape_wildcard(value))))
        }
        TextOperator::StartsWith => json!({
            "prefix": { field: { "value": value, "case_insensitive": true } }
        }),
        TextOperator::EndsWith => wildcard(&field, &format!("*{}", escape_wildcard(value))),
        TextOperator::Blank | TextOperator::NotBlank | TextOperator::Unsupported => return None,
    };

    Some(clause)
}

/// Exact match. Numeric identifier columns compare as numbers.
fn term(def: &ColumnDef, value: &str) -> Option<Value> {
    let field = def.exact_field();
    if def.integer {
        let number = coerce_number(&Value::String(value.to_string()))?;
        Some(json!({ "term": { field: number } }))
    } else {
        Some(json!({ "term": { field: value } }))
    }
}

/// Field used for pattern queries. Integer sub-fields cannot be pattern
/// matched, so numeric identifiers fall back to their stored string.
fn pattern_field(def: &ColumnDef) -> String {
    if def.integer {
        def.field.clone()
    } else {
        def.exact_field()
    }
}

fn wildcard(field: &str, pattern: &str) -> Value {
    json!({
        "wildcard": { field: { "value": pattern, "case_insensitive": true } }
    })
}

/// Escapes wildcard metacharacters in user input.
pub(crate) fn escape_wildcard(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '*' | '?' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
