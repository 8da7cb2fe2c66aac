//! Messages commands

use tabled::Tabled;

use xeno_crm::{DeliveryStatus, Message, MessagesPage};

use super::Context;
use crate::output::truncate;
use crate::MessageCommands;

#[derive(Tabled)]
struct MessageRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Message")]
    message: String,
    #[tabled(rename = "Sent")]
    sent_at: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Message> for MessageRow {
    fn from(message: &Message) -> Self {
        let status = match (&message.status, &message.error_message) {
            (DeliveryStatus::Failed, Some(reason)) => format!("FAILED ({})", reason),
            (DeliveryStatus::Failed, None) => "FAILED".to_string(),
            (DeliveryStatus::Completed, _) => "COMPLETED".to_string(),
        };
        Self {
            id: message.id,
            message: truncate(&message.message, 60),
            sent_at: message.sent_at.clone(),
            status,
        }
    }
}

pub async fn handle(action: MessageCommands, ctx: &Context<'_>) -> Result<(), String> {
    match action {
        MessageCommands::List => {
            let mut page = MessagesPage::new(ctx.gateway());
            page.load(ctx.session()).await.map_err(|e| e.to_string())?;
            ctx.format.print_list(page.messages(), |m| MessageRow::from(m));
        }
    }
    Ok(())
}
