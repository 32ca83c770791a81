//! Column filter model types.
//!
//! The grid sends a `filterModel` keyed by column id. Each entry is tagged by
//! `filterType` and carries either a single condition or a combined
//! `{ operator, conditions }` group:
//!
//! ```json
//! {
//!   "doc_type": { "filterType": "text", "type": "equals", "filter": "DEED" },
//!   "document_amt": {
//!     "filterType": "number",
//!     "operator": "OR",
//!     "conditions": [
//!       { "filterType": "number", "type": "lessThan", "filter": 1000 },
//!       { "filterType": "number", "type": "greaterThan", "filter": 1000000 }
//!     ]
//!   }
//! }
//! ```
//!
//! Parsing is permissive: unknown filter kinds or operators, and entries that
//! do not parse at all, become [`ColumnFilter::Unsupported`] and translate to
//! nothing.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::lenient;

/// A filter on one column, tagged by filter kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "filterType", rename_all = "lowercase")]
pub enum ColumnFilter {
    /// Text filter.
    Text(Compound<TextCondition>),
    /// Number filter.
    Number(Compound<NumberCondition>),
    /// Date filter.
    Date(Compound<DateCondition>),
    /// Set (multi-value) filter.
    Set(SetFilter),
    /// Any filter kind this translator does not understand.
    #[serde(other)]
    Unsupported,
}

impl ColumnFilter {
    /// Creates a single-condition text filter.
    pub fn text(operator: TextOperator, filter: impl Into<String>) -> Self {
        ColumnFilter::Text(Compound::Single(TextCondition {
            operator: Some(operator),
            filter: Some(filter.into()),
        }))
    }

    /// Creates a single-condition number filter.
    pub fn number(operator: NumberOperator, filter: impl Into<Value>) -> Self {
        ColumnFilter::Number(Compound::Single(NumberCondition {
            operator: Some(operator),
            filter: Some(filter.into()),
            filter_to: None,
        }))
    }

    /// Creates an inclusive number range filter.
    pub fn number_range(from: impl Into<Value>, to: impl Into<Value>) -> Self {
        ColumnFilter::Number(Compound::Single(NumberCondition {
            operator: Some(NumberOperator::InRange),
            filter: Some(from.into()),
            filter_to: Some(to.into()),
        }))
    }

    /// Creates a date range filter covering both calendar days.
    pub fn date_range(from: impl Into<String>, to: impl Into<String>) -> Self {
        ColumnFilter::Date(Compound::Single(DateCondition {
            operator: Some(DateOperator::InRange),
            date_from: Some(from.into()),
            date_to: Some(to.into()),
        }))
    }

    /// Creates a set filter.
    pub fn set<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        ColumnFilter::Set(SetFilter {
            values: Some(values.into_iter().map(Into::into).collect()),
        })
    }
}

/// Either a single condition or a group of conditions joined by AND/OR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Compound<C> {
    /// Several conditions joined by an operator.
    Combined {
        /// How the conditions are joined.
        operator: JoinOperator,
        /// The individual conditions.
        conditions: Vec<C>,
    },
    /// A single condition.
    Single(C),
}

/// Operator joining combined conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JoinOperator {
    /// All conditions must match.
    And,
    /// At least one condition must match.
    Or,
}

/// A single text condition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextCondition {
    /// The comparison operator.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<TextOperator>,
    /// The operand.
    #[serde(
        default,
        deserialize_with = "lenient::string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub filter: Option<String>,
}

/// A single number condition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberCondition {
    /// The comparison operator.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<NumberOperator>,
    /// The operand (number or numeric string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    /// Upper bound for `inRange`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_to: Option<Value>,
}

/// A single date condition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateCondition {
    /// The comparison operator.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<DateOperator>,
    /// Lower (or only) date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    /// Upper date for `inRange`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
}

/// A set filter: the column must equal one of `values`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetFilter {
    /// Accepted values. `null` entries (blanks) are ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Value>>,
}

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// An operator this translator does not understand.
            Unsupported,
        }

        impl $name {
            /// Returns the wire name of the operator.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                    $name::Unsupported => "unsupported",
                }
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                match s.as_str() {
                    $($wire => $name::$variant,)+
                    _ => $name::Unsupported,
                }
            }
        }

        impl From<$name> for String {
            fn from(op: $name) -> Self {
                op.as_str().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum! {
    /// Text filter operators.
    pub enum TextOperator {
        /// Exact match.
        Equals => "equals",
        /// Not an exact match.
        NotEqual => "notEqual",
        /// Case-insensitive substring.
        Contains => "contains",
        /// Case-insensitive substring absent.
        NotContains => "notContains",
        /// Case-insensitive prefix.
        StartsWith => "startsWith",
        /// Case-insensitive suffix.
        EndsWith => "endsWith",
        /// No value.
        Blank => "blank",
        /// Any value.
        NotBlank => "notBlank",
    }
}

string_enum! {
    /// Number filter operators.
    pub enum NumberOperator {
        /// Equal to.
        Equals => "equals",
        /// Not equal to.
        NotEqual => "notEqual",
        /// Strictly greater.
        GreaterThan => "greaterThan",
        /// Greater or equal.
        GreaterThanOrEqual => "greaterThanOrEqual",
        /// Strictly less.
        LessThan => "lessThan",
        /// Less or equal.
        LessThanOrEqual => "lessThanOrEqual",
        /// Between `filter` and `filterTo`, inclusive.
        InRange => "inRange",
        /// No value.
        Blank => "blank",
        /// Any value.
        NotBlank => "notBlank",
    }
}

string_enum! {
    /// Date filter operators.
    pub enum DateOperator {
        /// On the given day.
        Equals => "equals",
        /// Not on the given day.
        NotEqual => "notEqual",
        /// After the given day.
        GreaterThan => "greaterThan",
        /// Before the given day.
        LessThan => "lessThan",
        /// From `dateFrom` through `dateTo`.
        InRange => "inRange",
        /// No value.
        Blank => "blank",
        /// Any value.
        NotBlank => "notBlank",
    }
}

/// Deserializes a `filterModel`, turning entries that fail to parse into
/// [`ColumnFilter::Unsupported`] instead of rejecting the whole request.
///
/// A `null` model is treated as empty. A model that is not an object at all
/// is still a type error.
pub(crate) fn lenient_filter_model<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, ColumnFilter>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();

    Ok(raw
        .into_iter()
        .map(|(column, value)| {
            let filter = serde_json::from_value(value).unwrap_or_else(|e| {
                tracing::debug!(column = %column, error = %e, "Ignoring unparseable filter entry");
                ColumnFilter::Unsupported
            });
            (column, filter)
        })
        .collect())
}
