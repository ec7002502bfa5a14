// src/types/position.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the book a holding lot sits on.
///
/// A long and a short lot of the same symbol are separate entries; a short
/// never nets against a long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionType {
    /// Shares owned outright ("bought").
    Long,
    /// Shares borrowed and sold, to be covered later ("sold-short").
    Short,
}

impl fmt::Display for PositionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionType::Long => write!(f, "long"),
            PositionType::Short => write!(f, "short"),
        }
    }
}
