//! Campaign commands

use tabled::Tabled;

use xeno_crm::{Campaign, CampaignPage, SegmentSummary};

use super::Context;
use crate::output::truncate;
use crate::CampaignCommands;

#[derive(Tabled)]
struct CampaignRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Segment")]
    segment: String,
    #[tabled(rename = "Message")]
    message: String,
    #[tabled(rename = "Scheduled")]
    scheduled_at: String,
    #[tabled(rename = "Sent")]
    sent_at: String,
}

impl From<&Campaign> for CampaignRow {
    fn from(campaign: &Campaign) -> Self {
        Self {
            id: campaign.id,
            segment: campaign.audience_segment.name.clone(),
            message: truncate(&campaign.message, 50),
            scheduled_at: campaign.scheduled_at.clone(),
            sent_at: campaign.sent_at.clone().unwrap_or_else(|| "pending".into()),
        }
    }
}

#[derive(Tabled)]
struct SegmentOptionRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
}

pub async fn handle(action: CampaignCommands, ctx: &Context<'_>) -> Result<(), String> {
    let mut page = CampaignPage::new(ctx.gateway());
    match action {
        CampaignCommands::Segments => {
            page.load_segments().await.map_err(|e| e.to_string())?;
            ctx.format.print_list(page.segments(), |s: &SegmentSummary| SegmentOptionRow {
                id: s.id,
                name: s.name.clone(),
            });
        }
        CampaignCommands::List { segment_id } => {
            page.fetch_campaigns(segment_id).await.map_err(|e| e.to_string())?;
            let campaigns: Vec<Campaign> = page.campaigns_for(segment_id).into_iter().cloned().collect();
            ctx.format.print_list(&campaigns, |c| CampaignRow::from(c));
        }
        CampaignCommands::Create { segment, message, scheduled_at } => {
            page.select_segment(segment);
            page.set_message(message);
            page.set_scheduled_at(scheduled_at);
            page.submit().await.map_err(|e| e.to_string())?;
            println!(
                "Campaign scheduled for segment {} ({} campaign(s) on record)",
                segment,
                page.campaigns_for(segment).len()
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use xeno_crm::domain::aggregates::CampaignSegment;

    #[test]
    fn test_campaign_row() {
        let campaign = Campaign {
            id: 4,
            audience_segment_id: 1,
            message: "Hi [Name], 10% off everything this weekend only, don't miss it".into(),
            scheduled_at: "2025-03-01T10:00".into(),
            sent_at: None,
            audience_segment: CampaignSegment {
                id: 1,
                name: "Big spenders".into(),
                conditions: "{}".into(),
            },
        };
        let row = CampaignRow::from(&campaign);
        assert_eq!(row.segment, "Big spenders");
        assert_eq!(row.sent_at, "pending");
        assert_eq!(row.message.chars().count(), 50);
    }
}
