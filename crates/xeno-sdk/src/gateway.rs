//! Gateway port implementations backed by the HTTP client

use async_trait::async_trait;

use xeno_crm::application::dto::{CustomerResponse, MessagesResponse, OrdersResponse, SegmentRecord};
use xeno_crm::{
    AudienceGateway, Campaign, CampaignDraft, CampaignGateway, CustomerGateway, GatewayError,
    MessageGateway, OrderDraft, OrderGateway, Segment, SegmentSummary,
};

use crate::Client;

#[async_trait]
impl AudienceGateway for Client {
    async fn list_segments(&self) -> Result<Vec<SegmentRecord>, GatewayError> {
        Ok(self.audience().list_records().await?)
    }

    async fn create_segment(&self, segment: &Segment) -> Result<(), GatewayError> {
        Ok(self.audience().create(segment).await?)
    }

    async fn estimate_size(&self, segment: &Segment) -> Result<u64, GatewayError> {
        Ok(self.audience().size(segment).await?)
    }
}

#[async_trait]
impl CampaignGateway for Client {
    async fn list_segment_options(&self) -> Result<Vec<SegmentSummary>, GatewayError> {
        Ok(self.campaigns().segment_options().await?)
    }

    async fn list_campaigns(&self, segment_id: u64) -> Result<Vec<Campaign>, GatewayError> {
        Ok(self.campaigns().list(segment_id).await?)
    }

    async fn create_campaign(&self, draft: &CampaignDraft) -> Result<(), GatewayError> {
        Ok(self.campaigns().create(draft).await?)
    }
}

#[async_trait]
impl OrderGateway for Client {
    async fn list_orders(&self, customer_id: u64) -> Result<OrdersResponse, GatewayError> {
        Ok(self.orders().list(customer_id).await?)
    }

    async fn create_order(&self, draft: &OrderDraft) -> Result<(), GatewayError> {
        Ok(self.orders().create(draft).await?)
    }
}

#[async_trait]
impl MessageGateway for Client {
    async fn list_messages(&self, customer_id: u64) -> Result<MessagesResponse, GatewayError> {
        Ok(self.messages().list(customer_id).await?)
    }
}

#[async_trait]
impl CustomerGateway for Client {
    async fn register(&self, email: &str) -> Result<CustomerResponse, GatewayError> {
        Ok(self.customers().register(email).await?)
    }
}
