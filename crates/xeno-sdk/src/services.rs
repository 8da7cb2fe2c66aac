//! Endpoint groups of the Xeno backend

use serde::de::IgnoredAny;

use xeno_crm::application::dto::{
    AudienceSizeResponse, CampaignListResponse, CustomerResponse, MessagesResponse, OrdersResponse,
    RegisterCustomerRequest, SegmentListResponse, SegmentOptionsResponse, SegmentRecord,
};
use xeno_crm::{Campaign, CampaignDraft, OrderDraft, Segment, SegmentSummary};

use crate::{Client, Result};

/// Audience segment operations
pub struct AudienceService {
    client: Client,
}

impl AudienceService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List segments with their conditions decoded.
    ///
    /// One malformed conditions string fails the whole call.
    pub async fn list(&self) -> Result<Vec<Segment>> {
        let records = self.list_records().await?;
        records
            .into_iter()
            .map(|record| Ok(Segment::try_from(record)?))
            .collect()
    }

    /// List segments as the backend stores them
    pub async fn list_records(&self) -> Result<Vec<SegmentRecord>> {
        let response: SegmentListResponse = self.client.get("/audience/all").await?;
        tracing::debug!(count = response.segments.len(), "Listed segments");
        Ok(response.segments)
    }

    /// Persist a new segment
    pub async fn create(&self, segment: &Segment) -> Result<()> {
        let _: IgnoredAny = self.client.post("/audience", segment).await?;
        Ok(())
    }

    /// Number of customers the backend would put in `segment`
    pub async fn size(&self, segment: &Segment) -> Result<u64> {
        let response: AudienceSizeResponse = self.client.post("/audience/size", segment).await?;
        Ok(response.size.audience_size)
    }
}

/// Campaign operations
pub struct CampaignsService {
    client: Client,
}

impl CampaignsService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Segment id/name pairs, read from the same listing as [`AudienceService::list`]
    pub async fn segment_options(&self) -> Result<Vec<SegmentSummary>> {
        let response: SegmentOptionsResponse = self.client.get("/audience/all").await?;
        Ok(response.segments)
    }

    pub async fn list(&self, segment_id: u64) -> Result<Vec<Campaign>> {
        let response: CampaignListResponse =
            self.client.get(&format!("/campaign/{}", segment_id)).await?;
        Ok(response.campaigns)
    }

    /// Schedule a campaign. The draft is sent as-is; callers validate it first.
    pub async fn create(&self, draft: &CampaignDraft) -> Result<()> {
        let _: IgnoredAny = self.client.post("/campaign", draft).await?;
        Ok(())
    }
}

/// Order operations
pub struct OrdersService {
    client: Client,
}

impl OrdersService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Orders of one customer, or the backend's error object
    pub async fn list(&self, customer_id: u64) -> Result<OrdersResponse> {
        self.client
            .get(&format!("/orders/customer/{}", customer_id))
            .await
    }

    pub async fn create(&self, draft: &OrderDraft) -> Result<()> {
        let _: IgnoredAny = self.client.post("/orders", draft).await?;
        Ok(())
    }
}

/// Message log operations
pub struct MessagesService {
    client: Client,
}

impl MessagesService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn list(&self, customer_id: u64) -> Result<MessagesResponse> {
        self.client
            .get(&format!("/customers/messages/{}", customer_id))
            .await
    }
}

/// Customer operations
pub struct CustomersService {
    client: Client,
}

impl CustomersService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Register (or look up) the customer behind a signed-in email
    pub async fn register(&self, email: &str) -> Result<CustomerResponse> {
        self.client
            .post("/customers", &RegisterCustomerRequest { email })
            .await
    }
}
