//! Segment condition field
//!
//! Customer attribute a condition constrains.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Customer attribute referenced by a condition.
///
/// Unknown keys coming back from the backend are preserved in `Other` so
/// a newer server never breaks listing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Field {
    TotalSpending,
    Visits,
    LastVisit,
    Other(String),
}

impl Field {
    /// Fields offered when building a segment, in display order.
    pub const KNOWN: [Field; 3] = [Field::TotalSpending, Field::Visits, Field::LastVisit];

    /// Wire key of the field
    pub fn as_str(&self) -> &str {
        match self {
            Self::TotalSpending => "totalSpending",
            Self::Visits => "visits",
            Self::LastVisit => "lastVisit",
            Self::Other(key) => key,
        }
    }

    /// Human-readable label, `None` for fields this client does not know
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::TotalSpending => Some("Total Spending"),
            Self::Visits => Some("Number of Visits"),
            Self::LastVisit => Some("Last Visit"),
            Self::Other(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::TotalSpending
    }
}

impl From<String> for Field {
    fn from(key: String) -> Self {
        match key.as_str() {
            "totalSpending" => Self::TotalSpending,
            "visits" => Self::Visits,
            "lastVisit" => Self::LastVisit,
            _ => Self::Other(key),
        }
    }
}

impl From<Field> for String {
    fn from(field: Field) -> Self {
        match field {
            Field::Other(key) => key,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Field {
    type Err = FieldError;

    /// Strict parse: only the known wire keys are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Field::from(s.trim().to_string()) {
            Field::Other(key) => Err(FieldError::Unknown(key)),
            field => Ok(field),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("unknown field '{0}', expected one of totalSpending, visits, lastVisit")]
    Unknown(String),
}
