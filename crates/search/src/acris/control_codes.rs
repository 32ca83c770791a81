//! ACRIS document control codes.
//!
//! The control-code table maps a document's `(record type, doc type)` pair to
//! its descriptions and party roles. It ships with the crate as JSON and is
//! parsed and indexed once, on first use.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::types::PartyPosition;

static EMBEDDED_CONTROL_CODES: &str = include_str!("../../data/acris_control_codes.json");

static EMBEDDED_TABLE: LazyLock<ControlCodeTable> = LazyLock::new(|| {
    match ControlCodeTable::from_json(EMBEDDED_CONTROL_CODES) {
        Ok(table) => {
            tracing::debug!(entries = table.len(), "Loaded ACRIS control codes");
            table
        }
        Err(e) => {
            tracing::error!("Failed to load embedded ACRIS control codes: {}", e);
            ControlCodeTable::default()
        }
    }
});

/// One row of the control-code table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlCodeEntry {
    /// Record type, `D` for document control codes.
    #[serde(rename = "RECORD TYPE", alias = "record_type")]
    pub record_type: String,

    /// Document type code, e.g. `DEED`.
    #[serde(rename = "DOC. TYPE", alias = "doc_type")]
    pub doc_type: String,

    /// Human-readable document type.
    #[serde(
        rename = "DOC. TYPE DESCRIPTION",
        alias = "doc_type_description",
        default
    )]
    pub doc_type_description: Option<String>,

    /// Document class, e.g. `DEEDS AND OTHER CONVEYANCES`.
    #[serde(
        rename = "CLASS CODE DESCRIPTION",
        alias = "class_code_description",
        default
    )]
    pub class_code_description: Option<String>,

    /// Role label(s) of party 1, slash-separated.
    #[serde(rename = "PARTY1 TYPE", alias = "party1_type", default)]
    pub party1_type: Option<String>,

    /// Role label(s) of party 2, slash-separated.
    #[serde(rename = "PARTY2 TYPE", alias = "party2_type", default)]
    pub party2_type: Option<String>,

    /// Role label(s) of party 3, slash-separated.
    #[serde(rename = "PARTY3 TYPE", alias = "party3_type", default)]
    pub party3_type: Option<String>,
}

impl ControlCodeEntry {
    /// Returns the canonical role of the party at `position`.
    pub fn party_role(&self, position: PartyPosition) -> Option<&str> {
        let label = match position {
            PartyPosition::First => &self.party1_type,
            PartyPosition::Second => &self.party2_type,
            PartyPosition::Third => &self.party3_type,
        };
        label.as_deref().and_then(canonical_role)
    }
}

/// Returns the canonical label of a possibly slash-separated role list:
/// the last segment. `"SELLER/GRANTOR"` becomes `"GRANTOR"`.
pub fn canonical_role(label: &str) -> Option<&str> {
    label
        .rsplit('/')
        .next()
        .map(str::trim)
        .filter(|role| !role.is_empty())
}

/// The control-code table, indexed for constant-time lookup.
#[derive(Debug, Clone, Default)]
pub struct ControlCodeTable {
    entries: Vec<ControlCodeEntry>,
    by_key: HashMap<(String, String), usize>,
    by_doc_type: HashMap<String, usize>,
}

impl ControlCodeTable {
    /// Indexes a list of entries. The first entry for a key wins.
    pub fn from_entries(entries: Vec<ControlCodeEntry>) -> Self {
        let mut by_key = HashMap::with_capacity(entries.len());
        let mut by_doc_type = HashMap::with_capacity(entries.len());

        for (i, entry) in entries.iter().enumerate() {
            let record_type = entry.record_type.trim().to_string();
            let doc_type = entry.doc_type.trim().to_string();
            by_doc_type.entry(doc_type.clone()).or_insert(i);
            by_key.entry((record_type, doc_type)).or_insert(i);
        }

        Self {
            entries,
            by_key,
            by_doc_type,
        }
    }

    /// Parses a JSON array of entries.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<ControlCodeEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries))
    }

    /// Returns the table bundled with the crate.
    pub fn embedded() -> &'static ControlCodeTable {
        &EMBEDDED_TABLE
    }

    /// Looks up the entry for a document.
    ///
    /// Tries the exact `(record type, doc type)` pair first. Master records
    /// carry their own record type, so the lookup falls back to the doc type
    /// alone.
    pub fn lookup(&self, record_type: Option<&str>, doc_type: &str) -> Option<&ControlCodeEntry> {
        let doc_type = doc_type.trim();
        record_type
            .and_then(|rt| {
                self.by_key
                    .get(&(rt.trim().to_string(), doc_type.to_string()))
            })
            .or_else(|| self.by_doc_type.get(doc_type))
            .map(|&i| &self.entries[i])
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Category flags derived from a document's class code description.
///
/// The flags are independent; a class description may set more than one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentCategory {
    /// Deeds and other conveyances.
    pub is_deed: bool,
    /// Mortgages and instruments.
    pub is_mortgage: bool,
    /// UCC filings and liens.
    pub is_ucc_lien: bool,
    /// Other documents, including those without a control code.
    pub is_other_document: bool,
}

impl DocumentCategory {
    /// Classifies a document by its class code description. `None` means the
    /// document type has no control-code entry.
    pub fn classify(class_code_description: Option<&str>) -> Self {
        let Some(class) = class_code_description else {
            return Self {
                is_other_document: true,
                ..Default::default()
            };
        };

        let class = class.to_uppercase();
        Self {
            is_deed: class.contains("DEED"),
            is_mortgage: class.contains("MORTGAGE"),
            is_ucc_lien: class.contains("UCC") || class.contains("LIEN"),
            is_other_document: class.contains("OTHER DOCUMENTS"),
        }
    }
}
