//! Segment Aggregate
//!
//! Named audience definition. Membership is resolved by the backend and
//! held here only as the snapshot returned by the last fetch.

use serde::{Deserialize, Serialize};

use super::condition::ConditionGroup;

/// Customer record as embedded in segments and orders
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub total_spending: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Audience segment, in the shape the backend accepts on create and size requests
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: u64,
    pub name: String,
    pub conditions: ConditionGroup,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub customers: Vec<Customer>,
}

impl Segment {
    /// Unsaved segment seeded with one default condition
    pub fn draft() -> Self {
        Self {
            id: 0,
            name: String::new(),
            conditions: ConditionGroup::default(),
            created_at: String::new(),
            updated_at: String::new(),
            customers: vec![],
        }
    }

    pub fn is_draft(&self) -> bool {
        self.id == 0
    }

    pub fn member_count(&self) -> usize {
        self.customers.len()
    }
}

impl Default for Segment {
    fn default() -> Self {
        Self::draft()
    }
}

/// Segment reference used to pick a campaign audience
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentSummary {
    pub id: u64,
    pub name: String,
}
