//! Filter handlers for Elasticsearch query building.
//!
//! Each module translates one filter kind of the grid's filter model into
//! Query DSL. Handlers return `None` for anything they cannot translate
//! (missing operand, unparseable value, unknown operator); the entry is then
//! simply left out of the query.

pub mod date;
pub mod number;
pub mod set;
pub mod text;

use serde_json::{Value, json};

use crate::schema::ColumnDef;
use crate::types::{ColumnFilter, Compound, JoinOperator};

/// Builds the clause for one `filterModel` entry.
pub fn build_clause(def: &ColumnDef, filter: &ColumnFilter) -> Option<Value> {
    match filter {
        ColumnFilter::Text(compound) => combine(compound, |c| text::build_clause(def, c)),
        ColumnFilter::Number(compound) => combine(compound, |c| number::build_clause(def, c)),
        ColumnFilter::Date(compound) => combine(compound, |c| date::build_clause(def, c)),
        ColumnFilter::Set(set) => set::build_clause(def, set),
        ColumnFilter::Unsupported => None,
    }
}

/// Joins the clauses of a compound filter.
///
/// Conditions that translate to nothing are dropped; a group that ends up
/// with a single clause collapses to that clause.
fn combine<C, F>(compound: &Compound<C>, build: F) -> Option<Value>
where
    F: Fn(&C) -> Option<Value>,
{
    match compound {
        Compound::Single(condition) => build(condition),
        Compound::Combined {
            operator,
            conditions,
        } => {
            let mut clauses: Vec<Value> = conditions.iter().filter_map(build).collect();
            match clauses.len() {
                0 => None,
                1 => clauses.pop(),
                _ => Some(match operator {
                    JoinOperator::And => json!({ "bool": { "must": clauses } }),
                    JoinOperator::Or => json!({
                        "bool": {
                            "should": clauses,
                            "minimum_should_match": 1
                        }
                    }),
                }),
            }
        }
    }
}

/// Matches documents that have a value for `field`.
pub(crate) fn exists(field: &str) -> Value {
    json!({ "exists": { "field": field } })
}

/// Matches documents without a value for `field`.
pub(crate) fn missing(field: &str) -> Value {
    must_not(exists(field))
}

/// Negates a clause.
pub(crate) fn must_not(clause: Value) -> Value {
    json!({ "bool": { "must_not": [clause] } })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NumberCondition, NumberOperator};

    fn lt(v: i64) -> NumberCondition {
        NumberCondition {
            operator: Some(NumberOperator::LessThan),
            filter: Some(json!(v)),
            filter_to: None,
        }
    }

    #[test]
    fn test_or_uses_should() {
        let def = ColumnDef::number("document_amt");
        let filter = ColumnFilter::Number(Compound::Combined {
            operator: JoinOperator::Or,
            conditions: vec![
                lt(1000),
                NumberCondition {
                    operator: Some(NumberOperator::GreaterThan),
                    filter: Some(json!(1_000_000)),
                    filter_to: None,
                },
            ],
        });

        let clause = build_clause(&def, &filter).unwrap();
        assert_eq!(clause["bool"]["minimum_should_match"], json!(1));
        assert_eq!(clause["bool"]["should"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_and_uses_must() {
        let def = ColumnDef::number("document_amt");
        let filter = ColumnFilter::Number(Compound::Combined {
            operator: JoinOperator::And,
            conditions: vec![lt(10), lt(20)],
        });

        let clause = build_clause(&def, &filter).unwrap();
        assert_eq!(clause["bool"]["must"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_combined_drops_empty_conditions() {
        let def = ColumnDef::number("document_amt");
        let filter = ColumnFilter::Number(Compound::Combined {
            operator: JoinOperator::And,
            conditions: vec![lt(10), NumberCondition::default()],
        });

        let clause = build_clause(&def, &filter).unwrap();
        assert_eq!(clause, json!({ "range": { "document_amt": { "lt": 10 } } }));
    }

    #[test]
    fn test_unsupported_emits_nothing() {
        let def = ColumnDef::text("name");
        assert_eq!(build_clause(&def, &ColumnFilter::Unsupported), None);
    }
}
