//! Borough-Block-Lot property identifiers.

use std::fmt;
use std::str::FromStr;

use serde_json::{Value, json};

use crate::error::ValidationError;

/// A NYC tax lot identifier.
///
/// Parsed from the dash-separated form `borough-block-lot`, e.g. `1-13-1`.
/// Each segment must be a non-negative decimal integer; leading zeros are
/// accepted and dropped (`1-0013-0001` is the same lot as `1-13-1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bbl {
    /// Borough code (1 Manhattan, 2 Bronx, 3 Brooklyn, 4 Queens, 5 Staten Island).
    pub borough: u32,
    /// Tax block.
    pub block: u32,
    /// Tax lot.
    pub lot: u32,
}

impl Bbl {
    /// Creates an identifier from its parts.
    pub fn new(borough: u32, block: u32, lot: u32) -> Self {
        Self {
            borough,
            block,
            lot,
        }
    }

    /// Filter clauses restricting a lot-keyed index to this lot.
    ///
    /// The borough is matched as its canonical string; block and lot are
    /// matched numerically on their `.integer` sub-fields so that zero-padded
    /// stored values still match.
    pub fn scope_clauses(&self) -> Vec<Value> {
        vec![
            json!({ "term": { "borough": self.borough.to_string() } }),
            json!({ "term": { "block.integer": self.block } }),
            json!({ "term": { "lot.integer": self.lot } }),
        ]
    }
}

impl FromStr for Bbl {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: String| ValidationError::InvalidIdentifier {
            input: s.to_string(),
            message,
        };

        let segments: Vec<&str> = s.split('-').collect();
        if segments.len() != 3 {
            return Err(invalid(format!(
                "expected borough-block-lot, found {} segment(s)",
                segments.len()
            )));
        }

        let mut parts = [0u32; 3];
        for (slot, (name, segment)) in parts
            .iter_mut()
            .zip(["borough", "block", "lot"].into_iter().zip(segments))
        {
            if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid(format!("{} must be a non-negative integer", name)));
            }
            *slot = segment
                .parse()
                .map_err(|_| invalid(format!("{} is out of range", name)))?;
        }

        Ok(Bbl::new(parts[0], parts[1], parts[2]))
    }
}

impl fmt::Display for Bbl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.borough, self.block, self.lot)
    }
}
