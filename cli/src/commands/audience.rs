//! Audience commands

use serde::Serialize;
use tabled::Tabled;

use xeno_crm::domain::value_objects::operator_options;
use xeno_crm::{
    AudiencePage, Combinator, Condition, ConditionGroup, ConditionPatch, Customer, Field, Segment,
};

use super::Context;
use crate::output::{thousands, truncate, OutputFormat};
use crate::AudienceCommands;

#[derive(Tabled)]
struct SegmentRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Conditions")]
    conditions: String,
    #[tabled(rename = "Customers")]
    customers: String,
}

impl From<&Segment> for SegmentRow {
    fn from(segment: &Segment) -> Self {
        Self {
            id: segment.id,
            name: segment.name.clone(),
            conditions: truncate(&describe(&segment.conditions), 60),
            customers: thousands(segment.member_count() as u64),
        }
    }
}

#[derive(Tabled)]
struct CustomerRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Total Spending")]
    total_spending: String,
}

impl From<&Customer> for CustomerRow {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name.clone(),
            email: customer.email.clone(),
            total_spending: customer.total_spending.clone(),
        }
    }
}

#[derive(Clone, Serialize, Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Operators")]
    operators: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SizeOutput {
    audience_size: u64,
}

/// One line per group, e.g. `Total Spending > 100 AND Number of Visits >= 3`
pub fn describe(group: &ConditionGroup) -> String {
    group
        .conditions()
        .iter()
        .map(Condition::format)
        .collect::<Vec<_>>()
        .join(&format!(" {} ", group.combinator()))
}

pub async fn handle(action: AudienceCommands, ctx: &Context<'_>) -> Result<(), String> {
    match action {
        AudienceCommands::List { customers } => {
            let mut page = AudiencePage::new(ctx.gateway());
            page.fetch_segments().await.map_err(|e| e.to_string())?;
            ctx.format.print_list(page.segments(), |s| SegmentRow::from(s));

            if customers && matches!(ctx.format, OutputFormat::Table) {
                for segment in page.segments() {
                    println!("\n{} ({})", segment.name, thousands(segment.member_count() as u64));
                    ctx.format.print_list(&segment.customers, |c| CustomerRow::from(c));
                }
            }
        }
        AudienceCommands::Create { name, combinator, conditions } => {
            let mut page = AudiencePage::new(ctx.gateway());
            page.set_name(name.clone());
            fill_draft(&mut page, combinator, conditions)?;
            let summary = describe(&page.draft().conditions);
            page.submit().await.map_err(|e| e.to_string())?;
            println!("Created segment '{}': {}", name, summary);
        }
        AudienceCommands::Size { combinator, conditions } => {
            let mut page = AudiencePage::new(ctx.gateway());
            fill_draft(&mut page, combinator, conditions)?;
            let size = page
                .calculate_audience_size()
                .await
                .map_err(|e| e.to_string())?;
            ctx.format.print_value(
                &SizeOutput { audience_size: size },
                format!("Estimated audience: {} customers", thousands(size)),
            );
        }
        AudienceCommands::Fields => {
            let rows: Vec<FieldRow> = Field::KNOWN
                .iter()
                .map(|field| FieldRow {
                    field: field.as_str().to_string(),
                    label: field.label().unwrap_or_default().to_string(),
                    operators: operator_options(field)
                        .iter()
                        .map(|o| {
                            if o.label == o.operator.symbol() {
                                o.label.to_string()
                            } else {
                                format!("{} ({})", o.operator.symbol(), o.label)
                            }
                        })
                        .collect::<Vec<_>>()
                        .join(", "),
                })
                .collect();
            ctx.format.print_list(&rows, FieldRow::clone);
        }
    }
    Ok(())
}

/// Load parsed conditions into the page draft, first one replacing the default row
fn fill_draft(page: &mut AudiencePage, combinator: Combinator, conditions: Vec<Condition>) -> Result<(), String> {
    page.set_combinator(combinator);
    for (index, condition) in conditions.into_iter().enumerate() {
        if index > 0 {
            page.add_condition();
        }
        page.update_condition(index, ConditionPatch::replace(condition))
            .map_err(|e| e.to_string())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_group() {
        let group = ConditionGroup::new(
            Combinator::Or,
            vec!["totalSpending>10000".parse().unwrap(), "lastVisit<30".parse().unwrap()],
        )
        .unwrap();
        assert_eq!(describe(&group), "Total Spending > 10000 OR Last Visit Less than 30");
    }

    #[test]
    fn test_segment_row() {
        let mut segment = Segment {
            name: "Big spenders".into(),
            ..Segment::draft()
        };
        segment
            .conditions
            .update_condition(0, ConditionPatch::value("10000"))
            .unwrap();
        let row = SegmentRow::from(&segment);
        assert_eq!(row.customers, "0");
        assert_eq!(row.conditions, "Total Spending > 10000");
    }

    #[test]
    fn test_customer_row() {
        let customer = Customer {
            id: 5,
            name: "Ana".into(),
            email: "ana@example.com".into(),
            total_spending: "1250.00".into(),
            ..Default::default()
        };
        let row = CustomerRow::from(&customer);
        assert_eq!(row.email, "ana@example.com");
        assert_eq!(row.total_spending, "1250.00");
    }
}
