//! ACRIS record types.
//!
//! [`AcrisDoc`] and [`AcrisParty`] mirror the `_source` of the documents and
//! parties indexes. Both are read-only views of externally sourced data.
//! [`TransactionWithParties`] is the joined, denormalized view handed to
//! callers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;

/// A recorded ACRIS document (deed, mortgage, UCC lien, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AcrisDoc {
    /// Unique document id. Documents without one poison the whole result.
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub document_id: Option<String>,
    /// Record type (`A` for master records).
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub record_type: Option<String>,
    /// City register file number.
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub crfn: Option<String>,
    /// Document type code, e.g. `DEED`, `MTGE`, `UCC1`.
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub doc_type: Option<String>,
    /// Date on the document.
    #[serde(default)]
    pub document_date: Option<String>,
    /// Amount on the document.
    #[serde(default, deserialize_with = "lenient::number_or_string")]
    pub document_amt: Option<f64>,
    /// When the document was recorded.
    #[serde(default)]
    pub recorded_datetime: Option<String>,
    /// Percentage of the property transferred.
    #[serde(default, deserialize_with = "lenient::number_or_string")]
    pub percent_trans: Option<f64>,
    /// Borough code.
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub borough: Option<String>,
    /// Tax block, as stored.
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub block: Option<String>,
    /// Tax lot, as stored.
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub lot: Option<String>,
    /// Any other source fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Position of a party on a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartyPosition {
    /// Party 1 (seller, borrower, debtor, ...).
    First,
    /// Party 2 (buyer, lender, secured party, ...).
    Second,
    /// Party 3, where a document type defines one.
    Third,
}

impl PartyPosition {
    /// Parses the ACRIS party type code (`1`, `2` or `3`).
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim() {
            "1" => Some(PartyPosition::First),
            "2" => Some(PartyPosition::Second),
            "3" => Some(PartyPosition::Third),
            _ => None,
        }
    }
}

/// A person or entity named on an ACRIS document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AcrisParty {
    /// Document this party belongs to.
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub document_id: Option<String>,
    /// Record type (`P` for party records).
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub record_type: Option<String>,
    /// Party position code on the document.
    #[serde(
        default,
        alias = "party_party_type",
        deserialize_with = "lenient::string_or_number"
    )]
    pub party_type: Option<String>,
    /// Party name.
    #[serde(default)]
    pub name: Option<String>,
    /// Address line 1.
    #[serde(default)]
    pub address_1: Option<String>,
    /// Address line 2.
    #[serde(default)]
    pub address_2: Option<String>,
    /// Country.
    #[serde(default)]
    pub country: Option<String>,
    /// City.
    #[serde(default)]
    pub city: Option<String>,
    /// State.
    #[serde(default)]
    pub state: Option<String>,
    /// ZIP code.
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub zip: Option<String>,
}

impl AcrisParty {
    /// Returns the party's position on its document, if recognised.
    pub fn position(&self) -> Option<PartyPosition> {
        self.party_type.as_deref().and_then(PartyPosition::parse)
    }
}

/// An ACRIS document joined with its parties and control-code metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionWithParties {
    /// The underlying document.
    #[serde(flatten)]
    pub document: AcrisDoc,
    /// Human-readable document type.
    pub doc_type_description: Option<String>,
    /// Document class, the category discriminator.
    pub class_code_description: Option<String>,
    /// Names of position-1 parties, or `["Unknown"]`.
    pub from_party: Vec<String>,
    /// Names of position-2 parties, or `["Unknown"]`.
    pub to_party: Vec<String>,
    /// Canonical role of position 1 (e.g. `GRANTOR`).
    pub party1_type: String,
    /// Canonical role of position 2 (e.g. `GRANTEE`).
    pub party2_type: String,
    /// Deeds and other conveyances.
    pub is_deed: bool,
    /// Mortgages and instruments.
    pub is_mortgage: bool,
    /// UCC filings and federal liens.
    pub is_ucc_lien: bool,
    /// Everything else.
    pub is_other_document: bool,
}
