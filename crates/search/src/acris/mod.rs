//! ACRIS transaction history.
//!
//! - [`ControlCodeTable`] - document type descriptions and party roles
//! - [`TransactionJoiner`] - fetches a lot's documents and parties and joins them

mod control_codes;
mod joiner;

pub use control_codes::{ControlCodeEntry, ControlCodeTable, DocumentCategory, canonical_role};
pub use joiner::{TransactionJoiner, UNKNOWN_PARTY, join_transactions};
