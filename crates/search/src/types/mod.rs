//! Core types for the search layer.
//!
//! - [`RowModelRequest`] and the [`ColumnFilter`] tagged union - what the data
//!   grid asks for
//! - [`Bbl`] - property identifiers
//! - [`AcrisDoc`], [`AcrisParty`], [`TransactionWithParties`] - ACRIS records
//!   and their joined view
//!
//! # Building a request
//!
//! ```
//! use bblclub_search::types::{
//!     ColumnFilter, NumberOperator, RowModelRequest, SortDirection, TextOperator,
//! };
//!
//! let request = RowModelRequest::new(0, 100)
//!     .with_filter("doc_type", ColumnFilter::text(TextOperator::Equals, "DEED"))
//!     .with_filter("block", ColumnFilter::number(NumberOperator::Equals, "013"))
//!     .with_sort("document_date", SortDirection::Desc);
//!
//! assert_eq!(request.page_size(), 100);
//! ```

mod acris;
mod bbl;
mod filter;
pub(crate) mod lenient;
mod row_model;

pub use acris::{AcrisDoc, AcrisParty, PartyPosition, TransactionWithParties};
pub use bbl::Bbl;
pub use filter::{
    ColumnFilter, Compound, DateCondition, DateOperator, JoinOperator, NumberCondition,
    NumberOperator, SetFilter, TextCondition, TextOperator,
};
pub use row_model::{
    AggFunc, ColumnVo, DEFAULT_BLOCK_SIZE, RowModelRequest, SortDirection, SortModelItem,
};
