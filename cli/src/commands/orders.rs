//! Orders commands

use rust_decimal::Decimal;
use tabled::Tabled;

use xeno_crm::domain::aggregates::format_money;
use xeno_crm::{Order, OrdersPage};

use super::Context;
use crate::output::OutputFormat;
use crate::OrderCommands;

#[derive(Tabled)]
struct OrderRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Revenue")]
    revenue: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Profit")]
    profit: String,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            date: order
                .order_day()
                .map(|d| d.to_string())
                .unwrap_or_else(|| order.order_date.clone()),
            revenue: format_money(order.revenue),
            cost: format_money(order.cost),
            profit: format_money(order.profit()),
        }
    }
}

pub async fn handle(action: OrderCommands, ctx: &Context<'_>) -> Result<(), String> {
    let mut page = OrdersPage::new(ctx.gateway());
    match action {
        OrderCommands::List => {
            page.load(ctx.session()).await.map_err(|e| e.to_string())?;
            ctx.format.print_list(page.orders(), |o| OrderRow::from(o));
            if matches!(ctx.format, OutputFormat::Table) && !page.orders().is_empty() {
                let total: Decimal = page.orders().iter().map(Order::profit).sum();
                println!("Total profit: {}", format_money(total));
            }
        }
        OrderCommands::Create { date, revenue, cost } => {
            page.create(ctx.session(), date, revenue, cost)
                .await
                .map_err(|e| e.to_string())?;
            println!(
                "Order recorded for {}: revenue {}, cost {}",
                date,
                format_money(revenue),
                format_money(cost)
            );
        }
    }
    Ok(())
}
