//! Data Transfer Objects (DTOs)
//!
//! Request and response bodies of the Xeno backend.

use serde::{Deserialize, Serialize};

use crate::domain::aggregates::condition::{self, ParseError};
use crate::domain::aggregates::{Campaign, Customer, Message, Order, Segment, SegmentSummary};

// =============================================================================
// Audience
// =============================================================================

/// Segment as listed by the backend, conditions still JSON-encoded
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentRecord {
    pub id: u64,
    pub name: String,
    pub conditions: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub customers: Vec<Customer>,
}

impl TryFrom<SegmentRecord> for Segment {
    type Error = ParseError;

    fn try_from(record: SegmentRecord) -> Result<Self, Self::Error> {
        Ok(Segment {
            id: record.id,
            name: record.name,
            conditions: condition::deserialize(&record.conditions)?,
            created_at: record.created_at,
            updated_at: record.updated_at,
            customers: record.customers,
        })
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct SegmentListResponse {
    #[serde(default)]
    pub message: String,
    pub segments: Vec<SegmentRecord>,
}

/// Same endpoint as [`SegmentListResponse`], keeping only id and name
#[derive(Clone, Debug, Deserialize)]
pub struct SegmentOptionsResponse {
    pub segments: Vec<SegmentSummary>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudienceSize {
    pub audience_size: u64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AudienceSizeResponse {
    pub size: AudienceSize,
}

// =============================================================================
// Campaigns
// =============================================================================

#[derive(Clone, Debug, Deserialize)]
pub struct CampaignListResponse {
    pub campaigns: Vec<Campaign>,
}

// =============================================================================
// Orders
// =============================================================================

/// Orders endpoint answers with either the list or an error object.
///
/// The error object needs both `error` and `message`; any other body fails
/// to decode.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OrdersResponse {
    Orders(Vec<Order>),
    Failure {
        error: serde_json::Value,
        message: String,
    },
}

// =============================================================================
// Messages
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub data: Option<Vec<Message>>,
    #[serde(default)]
    pub error: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// Customers
// =============================================================================

#[derive(Clone, Debug, Serialize)]
pub struct RegisterCustomerRequest<'a> {
    pub email: &'a str,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CustomerResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Customer>,
}
