//! Index configuration.
//!
//! Names the index behind each dataset and bounds the size of the queries
//! issued against them.

use serde::{Deserialize, Serialize};

use crate::schema::Dataset;

/// Index names and query limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// ACRIS master documents (default: `"acris-documents"`).
    #[serde(default = "default_documents_index")]
    pub documents_index: String,

    /// ACRIS parties (default: `"acris-parties"`).
    #[serde(default = "default_parties_index")]
    pub parties_index: String,

    /// PLUTO (default: `"pluto"`).
    #[serde(default = "default_pluto_index")]
    pub pluto_index: String,

    /// Tax valuations (default: `"valuations"`).
    #[serde(default = "default_valuations_index")]
    pub valuations_index: String,

    /// Owner contacts (default: `"contacts"`).
    #[serde(default = "default_contacts_index")]
    pub contacts_index: String,

    /// Maximum documents fetched per property (default: 1000).
    #[serde(default = "default_document_fetch_limit")]
    pub document_fetch_limit: u64,

    /// Maximum parties fetched per property (default: 10000).
    #[serde(default = "default_party_fetch_limit")]
    pub party_fetch_limit: u64,

    /// Largest `from + size` a grid page may reach (default: 10000).
    #[serde(default = "default_max_result_window")]
    pub max_result_window: u64,
}

fn default_documents_index() -> String {
    "acris-documents".to_string()
}

fn default_parties_index() -> String {
    "acris-parties".to_string()
}

fn default_pluto_index() -> String {
    "pluto".to_string()
}

fn default_valuations_index() -> String {
    "valuations".to_string()
}

fn default_contacts_index() -> String {
    "contacts".to_string()
}

fn default_document_fetch_limit() -> u64 {
    1000
}

fn default_party_fetch_limit() -> u64 {
    10000
}

fn default_max_result_window() -> u64 {
    10000
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            documents_index: default_documents_index(),
            parties_index: default_parties_index(),
            pluto_index: default_pluto_index(),
            valuations_index: default_valuations_index(),
            contacts_index: default_contacts_index(),
            document_fetch_limit: default_document_fetch_limit(),
            party_fetch_limit: default_party_fetch_limit(),
            max_result_window: default_max_result_window(),
        }
    }
}

impl IndexConfig {
    /// Returns the index that backs a dataset.
    pub fn index_for(&self, dataset: Dataset) -> &str {
        match dataset {
            Dataset::AcrisDocuments => &self.documents_index,
            Dataset::AcrisParties => &self.parties_index,
            Dataset::Pluto => &self.pluto_index,
            Dataset::Valuations => &self.valuations_index,
            Dataset::Contacts => &self.contacts_index,
        }
    }
}
