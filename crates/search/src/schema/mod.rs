//! Dataset schemas.
//!
//! Which grid columns exist for each dataset and how they are mapped in the
//! index. The query translator consults these to choose field names and to
//! skip columns it does not know.

mod datasets;
mod registry;

pub use datasets::Dataset;
pub use registry::{ColumnDef, ColumnKind, ColumnRegistry};
