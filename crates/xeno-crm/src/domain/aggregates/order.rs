//! Order Aggregate

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::segment::Customer;
use crate::domain::value_objects::Session;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: u64,
    pub customer_id: u64,
    pub order_date: String,
    pub revenue: Decimal,
    pub cost: Decimal,
    #[serde(default)]
    pub customer: Customer,
}

impl Order {
    pub fn profit(&self) -> Decimal {
        self.revenue - self.cost
    }

    /// Calendar day of the order; the backend may send a bare date or a
    /// full timestamp
    pub fn order_day(&self) -> Option<NaiveDate> {
        let day = self.order_date.get(..10)?;
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }
}

/// Order entry form, submitted on behalf of the signed-in customer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub customer_id: u64,
    pub order_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost: Decimal,
}

impl OrderDraft {
    pub fn for_session(session: &Session, order_date: NaiveDate, revenue: Decimal, cost: Decimal) -> Self {
        Self {
            customer_id: session.customer_id,
            order_date,
            revenue,
            cost,
        }
    }
}

/// Dollar amount with two decimals, e.g. `$12.50` or `$-3.00`
pub fn format_money(amount: Decimal) -> String {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    format!("${}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_order_from_wire() {
        let raw = r#"{
            "id": 7,
            "customerId": 3,
            "orderDate": "2024-05-01T00:00:00.000Z",
            "revenue": "120.50",
            "cost": "80",
            "customer": { "id": 3, "name": "Ana", "email": "ana@example.com", "totalSpending": "1200" }
        }"#;
        let order: Order = serde_json::from_str(raw).unwrap();
        assert_eq!(order.profit(), dec("40.50"));
        assert_eq!(order.order_day(), NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(order.customer.name, "Ana");
    }

    #[test]
    fn test_draft_sends_numbers() {
        let session = Session::new(3, "Ana", "ana@example.com");
        let draft = OrderDraft::for_session(
            &session,
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            dec("99.99"),
            dec("10"),
        );
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["customerId"], 3);
        assert_eq!(value["orderDate"], "2024-05-01");
        assert_eq!(value["revenue"].as_f64(), Some(99.99));
        assert_eq!(value["cost"].as_f64(), Some(10.0));
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(dec("12.5")), "$12.50");
        assert_eq!(format_money(dec("3.456")), "$3.46");
        assert_eq!(format_money(dec("-3")), "$-3.00");
    }
}
