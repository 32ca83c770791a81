//! HTTP request handlers.
//!
//! - [`grid`] - Server-side row model pages
//! - [`transactions`] - Per-property ACRIS transaction histories
//! - [`health`] - Health and liveness probes

pub mod grid;
pub mod health;
pub mod transactions;

pub use grid::grid_handler;
pub use health::{health_handler, liveness_handler};
pub use transactions::transactions_handler;
