//! Outbound ports (Backend gateway traits)
//!
//! Hexagonal architecture: the HTTP SDK implements these against the Xeno
//! backend, the in-memory gateway implements them for tests.

use async_trait::async_trait;

use crate::application::dto::{
    CustomerResponse, MessagesResponse, OrdersResponse, SegmentRecord,
};
use crate::domain::aggregates::{Campaign, CampaignDraft, OrderDraft, Segment, SegmentSummary};

/// Audience segment endpoints
#[async_trait]
pub trait AudienceGateway: Send + Sync {
    /// `GET /audience/all`; conditions arrive JSON-encoded
    async fn list_segments(&self) -> Result<Vec<SegmentRecord>, GatewayError>;

    /// `POST /audience`
    async fn create_segment(&self, segment: &Segment) -> Result<(), GatewayError>;

    /// `POST /audience/size`
    async fn estimate_size(&self, segment: &Segment) -> Result<u64, GatewayError>;
}

/// Campaign endpoints
#[async_trait]
pub trait CampaignGateway: Send + Sync {
    /// Segment id/name pairs offered as campaign audiences
    async fn list_segment_options(&self) -> Result<Vec<SegmentSummary>, GatewayError>;

    async fn list_campaigns(&self, segment_id: u64) -> Result<Vec<Campaign>, GatewayError>;

    async fn create_campaign(&self, draft: &CampaignDraft) -> Result<(), GatewayError>;
}

/// Order endpoints
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn list_orders(&self, customer_id: u64) -> Result<OrdersResponse, GatewayError>;

    async fn create_order(&self, draft: &OrderDraft) -> Result<(), GatewayError>;
}

/// Customer message log endpoint
#[async_trait]
pub trait MessageGateway: Send + Sync {
    async fn list_messages(&self, customer_id: u64) -> Result<MessagesResponse, GatewayError>;
}

/// Customer registration performed on sign-in
#[async_trait]
pub trait CustomerGateway: Send + Sync {
    async fn register(&self, email: &str) -> Result<CustomerResponse, GatewayError>;
}

/// Gateway error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// Request never produced a response
    #[error("transport error: {0}")]
    Transport(String),

    /// Backend answered with a non-success status
    #[error("backend rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("malformed response: {0}")]
    Malformed(String),
}
