//! Customer message log page

use std::sync::Arc;

use super::{ErrorSlot, PageResult, NOT_AUTHENTICATED};
use crate::domain::aggregates::Message;
use crate::domain::value_objects::Session;
use crate::ports::outbound::MessageGateway;

pub const NO_MESSAGES: &str = "No messages found for this customer.";
pub const FETCH_FAILED: &str = "Failed to fetch messages. Please try again later.";

pub struct MessagesPage {
    gateway: Arc<dyn MessageGateway>,
    messages: Vec<Message>,
    error: ErrorSlot,
}

impl MessagesPage {
    pub fn new(gateway: Arc<dyn MessageGateway>) -> Self {
        Self {
            gateway,
            messages: vec![],
            error: ErrorSlot::default(),
        }
    }

    pub fn messages(&self) -> &[Message] { &self.messages }
    pub fn error(&self) -> Option<&str> { self.error.get() }

    pub async fn load(&mut self, session: Option<&Session>) -> PageResult {
        let Some(session) = session else {
            return Err(self.error.set(NOT_AUTHENTICATED));
        };

        let response = match self.gateway.list_messages(session.customer_id).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Error fetching messages");
                return Err(self.error.set(FETCH_FAILED));
            }
        };

        match response.data {
            Some(messages) if response.error != Some(true) => {
                self.messages = messages;
                self.error.clear();
                Ok(())
            }
            _ => {
                self.messages.clear();
                Err(self.error.set(response.message.unwrap_or_else(|| NO_MESSAGES.to_string())))
            }
        }
    }
}
