//! In-memory backend (for testing)
//!
//! Implements every outbound port with canned data. It never evaluates
//! segment conditions; the audience size it reports is whatever was set.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::application::dto::{CustomerResponse, MessagesResponse, OrdersResponse, SegmentRecord};
use crate::domain::aggregates::condition;
use crate::domain::aggregates::{
    Campaign, CampaignDraft, CampaignSegment, Customer, Order, OrderDraft, Segment, SegmentSummary,
};
use crate::ports::outbound::{
    AudienceGateway, CampaignGateway, CustomerGateway, GatewayError, MessageGateway, OrderGateway,
};

#[derive(Default)]
struct State {
    segments: Vec<SegmentRecord>,
    created_segments: Vec<Segment>,
    audience_size: u64,
    campaigns: Vec<Campaign>,
    orders: HashMap<u64, OrdersResponse>,
    messages: HashMap<u64, MessagesResponse>,
    customers: Vec<Customer>,
    next_id: u64,
}

impl State {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct InMemoryBackend {
    state: RwLock<State>,
    failing: AtomicBool,
    failing_reads: AtomicBool,
    calls: AtomicUsize,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of gateway calls served so far, failed ones included
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent call fail with a transport error
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Make listing calls fail while creates keep working
    pub fn set_failing_reads(&self, failing: bool) {
        self.failing_reads.store(failing, Ordering::SeqCst);
    }

    pub fn set_audience_size(&self, size: u64) {
        self.state.write().unwrap().audience_size = size;
    }

    /// Add a raw segment record, conditions string included as-is
    pub fn push_segment_record(&self, record: SegmentRecord) {
        let mut state = self.state.write().unwrap();
        state.next_id = state.next_id.max(record.id);
        state.segments.push(record);
    }

    pub fn created_segments(&self) -> Vec<Segment> {
        self.state.read().unwrap().created_segments.clone()
    }

    pub fn set_orders_response(&self, customer_id: u64, response: OrdersResponse) {
        self.state.write().unwrap().orders.insert(customer_id, response);
    }

    pub fn set_messages_response(&self, customer_id: u64, response: MessagesResponse) {
        self.state.write().unwrap().messages.insert(customer_id, response);
    }

    pub fn add_customer(&self, customer: Customer) {
        let mut state = self.state.write().unwrap();
        state.next_id = state.next_id.max(customer.id);
        state.customers.push(customer);
    }

    fn enter(&self) -> Result<(), GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(GatewayError::Transport("connection refused".into()));
        }
        Ok(())
    }

    fn enter_read(&self) -> Result<(), GatewayError> {
        self.enter()?;
        if self.failing_reads.load(Ordering::SeqCst) {
            return Err(GatewayError::Rejected {
                status: 500,
                message: "Internal Server Error".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl AudienceGateway for InMemoryBackend {
    async fn list_segments(&self) -> Result<Vec<SegmentRecord>, GatewayError> {
        self.enter_read()?;
        Ok(self.state.read().unwrap().segments.clone())
    }

    async fn create_segment(&self, segment: &Segment) -> Result<(), GatewayError> {
        self.enter()?;
        let conditions = condition::serialize(&segment.conditions)
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;
        let mut state = self.state.write().unwrap();
        let id = state.next_id();
        state.segments.push(SegmentRecord {
            id,
            name: segment.name.clone(),
            conditions,
            created_at: String::new(),
            updated_at: String::new(),
            customers: vec![],
        });
        state.created_segments.push(segment.clone());
        Ok(())
    }

    async fn estimate_size(&self, _segment: &Segment) -> Result<u64, GatewayError> {
        self.enter()?;
        Ok(self.state.read().unwrap().audience_size)
    }
}

#[async_trait]
impl CampaignGateway for InMemoryBackend {
    async fn list_segment_options(&self) -> Result<Vec<SegmentSummary>, GatewayError> {
        self.enter_read()?;
        let state = self.state.read().unwrap();
        Ok(state
            .segments
            .iter()
            .map(|s| SegmentSummary { id: s.id, name: s.name.clone() })
            .collect())
    }

    async fn list_campaigns(&self, segment_id: u64) -> Result<Vec<Campaign>, GatewayError> {
        self.enter_read()?;
        let state = self.state.read().unwrap();
        Ok(state
            .campaigns
            .iter()
            .filter(|c| c.audience_segment_id == segment_id)
            .cloned()
            .collect())
    }

    async fn create_campaign(&self, draft: &CampaignDraft) -> Result<(), GatewayError> {
        self.enter()?;
        let mut state = self.state.write().unwrap();
        let segment = state
            .segments
            .iter()
            .find(|s| s.id == draft.audience_segment_id)
            .map(|s| CampaignSegment {
                id: s.id,
                name: s.name.clone(),
                conditions: s.conditions.clone(),
            })
            .ok_or_else(|| GatewayError::Rejected {
                status: 404,
                message: "Audience segment not found".into(),
            })?;
        let id = state.next_id();
        state.campaigns.push(Campaign {
            id,
            audience_segment_id: draft.audience_segment_id,
            message: draft.message.clone(),
            scheduled_at: draft.scheduled_at.clone(),
            sent_at: None,
            audience_segment: segment,
        });
        Ok(())
    }
}

#[async_trait]
impl OrderGateway for InMemoryBackend {
    async fn list_orders(&self, customer_id: u64) -> Result<OrdersResponse, GatewayError> {
        self.enter_read()?;
        let state = self.state.read().unwrap();
        Ok(state
            .orders
            .get(&customer_id)
            .cloned()
            .unwrap_or(OrdersResponse::Orders(vec![])))
    }

    async fn create_order(&self, draft: &OrderDraft) -> Result<(), GatewayError> {
        self.enter()?;
        let mut state = self.state.write().unwrap();
        let id = state.next_id();
        let customer = state
            .customers
            .iter()
            .find(|c| c.id == draft.customer_id)
            .cloned()
            .unwrap_or_else(|| Customer { id: draft.customer_id, ..Default::default() });
        let order = Order {
            id,
            customer_id: draft.customer_id,
            order_date: draft.order_date.format("%Y-%m-%d").to_string(),
            revenue: draft.revenue,
            cost: draft.cost,
            customer,
        };
        match state
            .orders
            .entry(draft.customer_id)
            .or_insert_with(|| OrdersResponse::Orders(vec![]))
        {
            OrdersResponse::Orders(orders) => orders.push(order),
            OrdersResponse::Failure { .. } => {
                return Err(GatewayError::Rejected {
                    status: 400,
                    message: "Failed to create order".into(),
                })
            }
        }
        Ok(())
    }
}

#[async_trait]
impl MessageGateway for InMemoryBackend {
    async fn list_messages(&self, customer_id: u64) -> Result<MessagesResponse, GatewayError> {
        self.enter_read()?;
        let state = self.state.read().unwrap();
        Ok(state.messages.get(&customer_id).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl CustomerGateway for InMemoryBackend {
    async fn register(&self, email: &str) -> Result<CustomerResponse, GatewayError> {
        self.enter()?;
        let mut state = self.state.write().unwrap();
        if let Some(customer) = state.customers.iter().find(|c| c.email == email) {
            return Ok(CustomerResponse {
                success: true,
                message: None,
                data: Some(customer.clone()),
            });
        }
        let id = state.next_id();
        let customer = Customer {
            id,
            name: email.split('@').next().unwrap_or(email).to_string(),
            email: email.to_string(),
            total_spending: "0".into(),
            ..Default::default()
        };
        state.customers.push(customer.clone());
        Ok(CustomerResponse {
            success: true,
            message: Some("Customer created".into()),
            data: Some(customer),
        })
    }
}
