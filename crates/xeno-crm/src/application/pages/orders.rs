//! Orders page

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{ErrorSlot, PageResult, NOT_AUTHENTICATED};
use crate::application::dto::OrdersResponse;
use crate::domain::aggregates::{Order, OrderDraft};
use crate::domain::value_objects::Session;
use crate::ports::outbound::OrderGateway;

pub const FETCH_FAILED: &str = "An error occurred while fetching orders. Please try again later.";
pub const UNKNOWN_ERROR: &str = "An unknown error occurred.";
pub const LOGIN_REQUIRED: &str = "You need to be logged in to create an order.";
pub const CREATE_FAILED: &str = "An error occurred while creating the order. Please try again.";

pub struct OrdersPage {
    gateway: Arc<dyn OrderGateway>,
    orders: Vec<Order>,
    error: ErrorSlot,
}

impl OrdersPage {
    pub fn new(gateway: Arc<dyn OrderGateway>) -> Self {
        Self {
            gateway,
            orders: vec![],
            error: ErrorSlot::default(),
        }
    }

    pub fn orders(&self) -> &[Order] { &self.orders }
    pub fn error(&self) -> Option<&str> { self.error.get() }

    /// Load the signed-in customer's orders
    pub async fn load(&mut self, session: Option<&Session>) -> PageResult {
        let Some(session) = session else {
            return Err(self.error.set(NOT_AUTHENTICATED));
        };

        match self.gateway.list_orders(session.customer_id).await {
            Ok(OrdersResponse::Orders(orders)) => {
                tracing::debug!(count = orders.len(), "Fetched orders");
                self.orders = orders;
                self.error.clear();
                Ok(())
            }
            Ok(OrdersResponse::Failure { error, message }) => {
                tracing::error!(%error, %message, "Error response from API");
                self.orders.clear();
                if message.is_empty() {
                    return Err(self.error.set(UNKNOWN_ERROR));
                }
                Err(self.error.set(message))
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching orders");
                self.orders.clear();
                Err(self.error.set(FETCH_FAILED))
            }
        }
    }

    /// Record an order for the signed-in customer
    pub async fn create(
        &mut self,
        session: Option<&Session>,
        order_date: NaiveDate,
        revenue: Decimal,
        cost: Decimal,
    ) -> PageResult {
        let Some(session) = session else {
            return Err(self.error.set(LOGIN_REQUIRED));
        };
        self.error.clear();

        let draft = OrderDraft::for_session(session, order_date, revenue, cost);
        match self.gateway.create_order(&draft).await {
            Ok(()) => {
                tracing::info!(customer_id = session.customer_id, "Order created");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Error creating order");
                Err(self.error.set(CREATE_FAILED))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryBackend;
    use std::str::FromStr;

    fn session() -> Session {
        Session::new(3, "Ana", "ana@example.com")
    }

    #[tokio::test]
    async fn test_requires_session() {
        let backend = Arc::new(InMemoryBackend::new());
        let mut page = OrdersPage::new(backend.clone());

        assert_eq!(page.load(None).await.unwrap_err().0, NOT_AUTHENTICATED);
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let err = page.create(None, date, Decimal::ONE, Decimal::ZERO).await.unwrap_err();
        assert_eq!(err.0, LOGIN_REQUIRED);
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let backend = Arc::new(InMemoryBackend::new());
        let mut page = OrdersPage::new(backend);
        let session = session();
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        page.create(Some(&session), date, Decimal::from_str("120.50").unwrap(), Decimal::from(80))
            .await
            .unwrap();
        page.load(Some(&session)).await.unwrap();

        assert_eq!(page.orders().len(), 1);
        assert_eq!(page.orders()[0].customer_id, 3);
        assert_eq!(page.orders()[0].profit(), Decimal::from_str("40.50").unwrap());
    }

    #[tokio::test]
    async fn test_error_body_message_is_shown() {
        let backend = Arc::new(InMemoryBackend::new());
        backend.set_orders_response(
            3,
            OrdersResponse::Failure {
                error: serde_json::json!("NotFound"),
                message: "Customer not found".into(),
            },
        );
        let mut page = OrdersPage::new(backend);

        let err = page.load(Some(&session())).await.unwrap_err();

        assert_eq!(err.0, "Customer not found");
        assert!(page.orders().is_empty());
    }

    #[tokio::test]
    async fn test_error_body_with_empty_message() {
        let backend = Arc::new(InMemoryBackend::new());
        backend.set_orders_response(
            3,
            OrdersResponse::Failure { error: serde_json::json!(true), message: String::new() },
        );
        let mut page = OrdersPage::new(backend);

        assert_eq!(page.load(Some(&session())).await.unwrap_err().0, UNKNOWN_ERROR);
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let backend = Arc::new(InMemoryBackend::new());
        backend.set_failing(true);
        let mut page = OrdersPage::new(backend);

        assert_eq!(page.load(Some(&session())).await.unwrap_err().0, FETCH_FAILED);
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let err = page
            .create(Some(&session()), date, Decimal::ONE, Decimal::ONE)
            .await
            .unwrap_err();
        assert_eq!(err.0, CREATE_FAILED);
    }
}
