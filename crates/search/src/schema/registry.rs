//! Column registry.
//!
//! Maps the grid's column ids to index fields and records how each field is
//! mapped, so the translator can pick the right clause shape: exact matches
//! go to a `.keyword` sub-field, numeric identifiers that are stored as
//! strings (block, lot) go to their `.integer` sub-field.

use std::collections::HashMap;

/// The data type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Free text or codes.
    Text,
    /// Numeric values.
    Number,
    /// Dates and timestamps.
    Date,
}

/// How one grid column maps onto the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    /// Field name in the index.
    pub field: String,
    /// Data type.
    pub kind: ColumnKind,
    /// Text field with a `.keyword` sub-field for exact matching and sorting.
    pub keyword: bool,
    /// Numeric identifier stored as a string, with an `.integer` sub-field.
    pub integer: bool,
}

impl ColumnDef {
    /// Analyzed text with a `.keyword` sub-field.
    pub fn text(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: ColumnKind::Text,
            keyword: true,
            integer: false,
        }
    }

    /// A field mapped directly as `keyword` (codes, ids).
    pub fn keyword(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: ColumnKind::Text,
            keyword: false,
            integer: false,
        }
    }

    /// A numeric field.
    pub fn number(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: ColumnKind::Number,
            keyword: false,
            integer: false,
        }
    }

    /// A numeric identifier stored as a string with an `.integer` sub-field.
    pub fn integer_id(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: ColumnKind::Number,
            keyword: false,
            integer: true,
        }
    }

    /// A date field.
    pub fn date(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: ColumnKind::Date,
            keyword: false,
            integer: false,
        }
    }

    /// Returns the field used for exact matches, terms aggregations and sorting.
    pub fn exact_field(&self) -> String {
        if self.integer {
            format!("{}.integer", self.field)
        } else if self.keyword {
            format!("{}.keyword", self.field)
        } else {
            self.field.clone()
        }
    }

    /// Returns the field used for numeric comparisons and metric aggregations.
    pub fn numeric_field(&self) -> String {
        if self.integer {
            format!("{}.integer", self.field)
        } else {
            self.field.clone()
        }
    }

    /// Returns true if exact matches should be coerced to numbers.
    pub fn is_numeric(&self) -> bool {
        self.integer || self.kind == ColumnKind::Number
    }
}

/// Column definitions for one dataset, keyed by grid column id.
#[derive(Debug, Clone, Default)]
pub struct ColumnRegistry {
    columns: HashMap<String, ColumnDef>,
}

impl ColumnRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column, builder style.
    pub fn with_column(mut self, id: impl Into<String>, def: ColumnDef) -> Self {
        self.register(id, def);
        self
    }

    /// Adds or replaces a column.
    pub fn register(&mut self, id: impl Into<String>, def: ColumnDef) {
        self.columns.insert(id.into(), def);
    }

    /// Looks up a column by id.
    pub fn get(&self, id: &str) -> Option<&ColumnDef> {
        self.columns.get(id)
    }

    /// Returns true if the column is known.
    pub fn contains(&self, id: &str) -> bool {
        self.columns.contains_key(id)
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the registry has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns the known column ids, sorted.
    pub fn column_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.columns.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_field_variants() {
        assert_eq!(ColumnDef::text("name").exact_field(), "name.keyword");
        assert_eq!(ColumnDef::keyword("doc_type").exact_field(), "doc_type");
        assert_eq!(ColumnDef::integer_id("block").exact_field(), "block.integer");
        assert_eq!(ColumnDef::number("document_amt").exact_field(), "document_amt");
    }

    #[test]
    fn test_numeric_field() {
        assert_eq!(ColumnDef::integer_id("lot").numeric_field(), "lot.integer");
        assert_eq!(ColumnDef::text("name").numeric_field(), "name");
        assert!(ColumnDef::integer_id("lot").is_numeric());
        assert!(!ColumnDef::keyword("borough").is_numeric());
    }

    #[test]
    fn test_registry_lookup() {
        let registry = ColumnRegistry::new()
            .with_column("block", ColumnDef::integer_id("block"))
            .with_column("name", ColumnDef::text("name"));

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("block"));
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.column_ids(), vec!["block", "name"]);
    }
}
