//! Joins ACRIS documents with their parties.
//!
//! For one tax lot, [`TransactionJoiner`] fetches the recorded documents
//! (newest first), then every party on those documents, and merges them
//! into [`TransactionWithParties`] records classified with the control-code
//! table.

use std::collections::HashMap;

use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::config::IndexConfig;
use crate::core::SearchBackend;
use crate::error::{BackendError, BackendResult, ClubResult, FetchError};
use crate::types::{AcrisDoc, AcrisParty, Bbl, PartyPosition, TransactionWithParties};

use super::control_codes::{ControlCodeTable, DocumentCategory};

/// Placeholder used when no party or role is known.
pub const UNKNOWN_PARTY: &str = "Unknown";

/// Fetches and joins the transaction history of a property.
pub struct TransactionJoiner<B> {
    backend: B,
    documents_index: String,
    parties_index: String,
    document_fetch_limit: u64,
    party_fetch_limit: u64,
    control_codes: &'static ControlCodeTable,
}

impl<B: SearchBackend> TransactionJoiner<B> {
    /// Creates a joiner over `backend` using the embedded control codes.
    pub fn new(backend: B, config: &IndexConfig) -> Self {
        Self {
            backend,
            documents_index: config.documents_index.clone(),
            parties_index: config.parties_index.clone(),
            document_fetch_limit: config.document_fetch_limit,
            party_fetch_limit: config.party_fetch_limit,
            control_codes: ControlCodeTable::embedded(),
        }
    }

    /// Returns the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the transactions recorded against `property_id`
    /// (`borough-block-lot`), newest first.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::InvalidIdentifier`](crate::error::ValidationError::InvalidIdentifier)
    ///   if the identifier is malformed; the backend is not called.
    /// - [`FetchError::Documents`] if the documents cannot be fetched.
    ///
    /// A failure fetching parties is logged and the documents are returned
    /// with unknown parties.
    pub async fn fetch_transactions_with_parties(
        &self,
        property_id: &str,
    ) -> ClubResult<Vec<TransactionWithParties>> {
        let bbl: Bbl = property_id.parse()?;
        self.fetch_transactions(&bbl).await
    }

    /// Returns the transactions recorded against a parsed identifier.
    pub async fn fetch_transactions(&self, bbl: &Bbl) -> ClubResult<Vec<TransactionWithParties>> {
        let documents = self
            .fetch_documents(bbl)
            .await
            .map_err(|source| FetchError::Documents {
                property_id: bbl.to_string(),
                source,
            })?;

        if documents.is_empty() {
            debug!(bbl = %bbl, "No ACRIS documents found");
            return Ok(Vec::new());
        }

        // A single document without an id discards the whole result
        let Some(document_ids) = documents
            .iter()
            .map(|doc| doc.document_id.clone())
            .collect::<Option<Vec<String>>>()
        else {
            warn!(
                bbl = %bbl,
                documents = documents.len(),
                "ACRIS document without document_id; discarding result"
            );
            return Ok(Vec::new());
        };

        let parties = match self.fetch_parties(&document_ids).await {
            Ok(parties) => parties,
            Err(source) => {
                let err = FetchError::Parties {
                    property_id: bbl.to_string(),
                    source,
                };
                warn!(error = %err, "Continuing without party data");
                Vec::new()
            }
        };

        debug!(
            bbl = %bbl,
            documents = documents.len(),
            parties = parties.len(),
            "Joining ACRIS documents with parties"
        );

        Ok(join_transactions(documents, &parties, self.control_codes))
    }

    async fn fetch_documents(&self, bbl: &Bbl) -> BackendResult<Vec<AcrisDoc>> {
        let body = json!({
            "query": {
                "bool": {
                    "filter": bbl.scope_clauses()
                }
            },
            "sort": [{ "document_date": { "order": "desc" } }],
            "size": self.document_fetch_limit,
        });

        let response = self.backend.search(&self.documents_index, body).await?;
        response
            .sources()
            .map(|source| {
                serde_json::from_value::<AcrisDoc>(source.clone()).map_err(|e| {
                    BackendError::InvalidResponse {
                        backend_name: self.backend.backend_name().to_string(),
                        message: format!("unreadable ACRIS document: {}", e),
                    }
                })
            })
            .collect()
    }

    async fn fetch_parties(&self, document_ids: &[String]) -> BackendResult<Vec<AcrisParty>> {
        let body = json!({
            "query": {
                "bool": {
                    "filter": [{ "terms": { "document_id": document_ids } }]
                }
            },
            "size": self.party_fetch_limit,
        });

        let response = self.backend.search(&self.parties_index, body).await?;
        Ok(response.sources().filter_map(parse_party).collect())
    }
}

fn parse_party(source: &Value) -> Option<AcrisParty> {
    match serde_json::from_value(source.clone()) {
        Ok(party) => Some(party),
        Err(e) => {
            debug!(error = %e, "Skipping unreadable ACRIS party");
            None
        }
    }
}

#[derive(Default)]
struct PartyNames<'a> {
    first: Vec<&'a str>,
    second: Vec<&'a str>,
}

/// Merges documents with their parties, keeping document order.
///
/// Parties are matched on `document_id` and split by position; positions
/// other than 1 and 2 are ignored. A side with no parties, or a role with
/// no control code, reads `"Unknown"`.
pub fn join_transactions(
    documents: Vec<AcrisDoc>,
    parties: &[AcrisParty],
    control_codes: &ControlCodeTable,
) -> Vec<TransactionWithParties> {
    let mut by_document: HashMap<&str, PartyNames<'_>> = HashMap::new();
    for party in parties {
        let (Some(document_id), Some(name)) = (party.document_id.as_deref(), party.name.as_deref())
        else {
            continue;
        };
        let names = by_document.entry(document_id).or_default();
        match party.position() {
            Some(PartyPosition::First) => names.first.push(name),
            Some(PartyPosition::Second) => names.second.push(name),
            _ => {}
        }
    }

    documents
        .into_iter()
        .map(|document| {
            let entry = document
                .doc_type
                .as_deref()
                .and_then(|doc_type| control_codes.lookup(document.record_type.as_deref(), doc_type));

            let role = |position| {
                entry
                    .and_then(|e| e.party_role(position))
                    .unwrap_or(UNKNOWN_PARTY)
                    .to_string()
            };
            let party1_type = role(PartyPosition::First);
            let party2_type = role(PartyPosition::Second);

            let category = DocumentCategory::classify(
                entry.and_then(|e| e.class_code_description.as_deref()),
            );

            let names = document
                .document_id
                .as_deref()
                .and_then(|id| by_document.get(id));
            let from_party = names_or_unknown(names.map(|n| n.first.as_slice()));
            let to_party = names_or_unknown(names.map(|n| n.second.as_slice()));

            TransactionWithParties {
                doc_type_description: entry.and_then(|e| e.doc_type_description.clone()),
                class_code_description: entry.and_then(|e| e.class_code_description.clone()),
                from_party,
                to_party,
                party1_type,
                party2_type,
                is_deed: category.is_deed,
                is_mortgage: category.is_mortgage,
                is_ucc_lien: category.is_ucc_lien,
                is_other_document: category.is_other_document,
                document,
            }
        })
        .collect()
}

fn names_or_unknown(names: Option<&[&str]>) -> Vec<String> {
    match names {
        Some(names) if !names.is_empty() => names.iter().map(|n| n.to_string()).collect(),
        _ => vec![UNKNOWN_PARTY.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, doc_type: &str) -> AcrisDoc {
        AcrisDoc {
            document_id: Some(id.to_string()),
            record_type: Some("A".to_string()),
            doc_type: Some(doc_type.to_string()),
            ..Default::default()
        }
    }

    fn party(document_id: &str, position: &str, name: &str) -> AcrisParty {
        AcrisParty {
            document_id: Some(document_id.to_string()),
            party_type: Some(position.to_string()),
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_deed_join() {
        let parties = [
            party("DOC123", "1", "JANE SELLER"),
            party("DOC123", "2", "JOHN BUYER"),
        ];
        let joined = join_transactions(
            vec![doc("DOC123", "DEED")],
            &parties,
            ControlCodeTable::embedded(),
        );

        assert_eq!(joined.len(), 1);
        let tx = &joined[0];
        assert_eq!(tx.from_party, vec!["JANE SELLER".to_string()]);
        assert_eq!(tx.to_party, vec!["JOHN BUYER".to_string()]);
        assert_eq!(tx.party1_type, "GRANTOR");
        assert_eq!(tx.party2_type, "GRANTEE");
        assert!(tx.is_deed);
        assert!(!tx.is_mortgage && !tx.is_ucc_lien && !tx.is_other_document);
    }

    #[test]
    fn test_party_order_preserved() {
        let parties = [
            party("DOC1", "1", "FIRST"),
            party("DOC1", "2", "LENDER BANK"),
            party("DOC1", "1", "SECOND"),
            party("DOC1", "3", "IGNORED"),
        ];
        let joined = join_transactions(
            vec![doc("DOC1", "MTGE")],
            &parties,
            ControlCodeTable::embedded(),
        );

        assert_eq!(
            joined[0].from_party,
            vec!["FIRST".to_string(), "SECOND".to_string()]
        );
        assert!(joined[0].is_mortgage);
        assert_eq!(joined[0].party1_type, "BORROWER");
    }

    #[test]
    fn test_missing_parties_are_unknown() {
        let joined = join_transactions(
            vec![doc("DOC1", "UCC1")],
            &[party("OTHER", "1", "NOT MINE")],
            ControlCodeTable::embedded(),
        );

        assert_eq!(joined[0].from_party, vec![UNKNOWN_PARTY.to_string()]);
        assert_eq!(joined[0].to_party, vec![UNKNOWN_PARTY.to_string()]);
        assert!(joined[0].is_ucc_lien);
    }

    #[test]
    fn test_unknown_doc_type() {
        let joined = join_transactions(
            vec![doc("DOC1", "ZZZZ")],
            &[],
            ControlCodeTable::embedded(),
        );

        let tx = &joined[0];
        assert!(tx.is_other_document);
        assert!(!tx.is_deed);
        assert_eq!(tx.party1_type, UNKNOWN_PARTY);
        assert_eq!(tx.doc_type_description, None);
    }

    #[test]
    fn test_document_order_preserved() {
        let joined = join_transactions(
            vec![doc("B", "DEED"), doc("A", "SAT"), doc("C", "LP")],
            &[],
            ControlCodeTable::embedded(),
        );
        let ids: Vec<&str> = joined
            .iter()
            .map(|tx| tx.document.document_id.as_deref().unwrap())
            .collect();
        assert_eq!(ids, vec!["B", "A", "C"]);
        assert!(joined[2].is_other_document);
    }
}
