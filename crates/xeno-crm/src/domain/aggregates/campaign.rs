//! Campaign Aggregate

use serde::{Deserialize, Serialize};

/// Placeholder every campaign message must carry for personalization
pub const NAME_PLACEHOLDER: &str = "[Name]";

/// Campaign as entered in the composer
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDraft {
    pub audience_segment_id: u64,
    pub message: String,
    /// Local date-time as typed (`YYYY-MM-DDTHH:MM`), passed through untouched
    pub scheduled_at: String,
}

impl CampaignDraft {
    pub fn new(audience_segment_id: u64, message: impl Into<String>, scheduled_at: impl Into<String>) -> Self {
        Self {
            audience_segment_id,
            message: message.into(),
            scheduled_at: scheduled_at.into(),
        }
    }

    /// Client-side checks run before anything is sent
    pub fn validate(&self) -> Result<(), CampaignError> {
        if !self.message.contains(NAME_PLACEHOLDER) {
            return Err(CampaignError::MissingPlaceholder);
        }
        Ok(())
    }
}

/// Audience segment embedded in a campaign record
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignSegment {
    pub id: u64,
    pub name: String,
    /// Raw condition JSON; not parsed on the campaign screens
    #[serde(default)]
    pub conditions: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: u64,
    pub audience_segment_id: u64,
    pub message: String,
    pub scheduled_at: String,
    #[serde(default)]
    pub sent_at: Option<String>,
    #[serde(default)]
    pub audience_segment: CampaignSegment,
}

impl Campaign {
    pub fn is_sent(&self) -> bool {
        self.sent_at.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CampaignError {
    #[error("The message must include the placeholder \"[Name]\" for personalization.")]
    MissingPlaceholder,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_required() {
        let draft = CampaignDraft::new(1, "Hello there", "2025-01-01T10:00");
        assert_eq!(draft.validate(), Err(CampaignError::MissingPlaceholder));

        let draft = CampaignDraft::new(1, "Hi [Name], 10% off today", "2025-01-01T10:00");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_placeholder_is_case_sensitive() {
        let draft = CampaignDraft::new(1, "Hi [name]", "");
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_campaign_record() {
        let raw = r#"{
            "id": 4,
            "audienceSegmentId": 2,
            "message": "Hi [Name]",
            "scheduledAt": "2025-01-01T10:00:00.000Z",
            "sentAt": null,
            "audienceSegment": { "id": 2, "name": "Big spenders", "conditions": "{}" }
        }"#;
        let campaign: Campaign = serde_json::from_str(raw).unwrap();
        assert_eq!(campaign.audience_segment.name, "Big spenders");
        assert!(!campaign.is_sent());
    }
}
