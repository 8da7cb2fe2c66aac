//! Campaign composer page

use std::sync::Arc;

use super::{ErrorSlot, PageResult};
use crate::domain::aggregates::{Campaign, CampaignDraft, SegmentSummary};
use crate::ports::outbound::CampaignGateway;

pub const FETCH_CAMPAIGNS_FAILED: &str = "Failed to fetch campaigns. Please try again.";
pub const FETCH_SEGMENTS_FAILED: &str = "Failed to fetch audience segments. Please try again.";
pub const CREATE_FAILED: &str = "Failed to create campaign. Please try again.";

pub struct CampaignPage {
    gateway: Arc<dyn CampaignGateway>,
    segments: Vec<SegmentSummary>,
    campaigns: Vec<Campaign>,
    draft: CampaignDraft,
    error: ErrorSlot,
}

impl CampaignPage {
    pub fn new(gateway: Arc<dyn CampaignGateway>) -> Self {
        Self {
            gateway,
            segments: vec![],
            campaigns: vec![],
            draft: CampaignDraft::default(),
            error: ErrorSlot::default(),
        }
    }

    pub fn segments(&self) -> &[SegmentSummary] { &self.segments }
    pub fn campaigns(&self) -> &[Campaign] { &self.campaigns }
    pub fn draft(&self) -> &CampaignDraft { &self.draft }
    pub fn error(&self) -> Option<&str> { self.error.get() }

    pub fn select_segment(&mut self, segment_id: u64) {
        self.draft.audience_segment_id = segment_id;
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.draft.message = message.into();
    }

    pub fn set_scheduled_at(&mut self, scheduled_at: impl Into<String>) {
        self.draft.scheduled_at = scheduled_at.into();
    }

    /// Load the segments a campaign can target
    pub async fn load_segments(&mut self) -> PageResult {
        match self.gateway.list_segment_options().await {
            Ok(segments) => {
                self.segments = segments;
                self.error.clear();
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching audience segments");
                Err(self.error.set(FETCH_SEGMENTS_FAILED))
            }
        }
    }

    /// Replace the cached campaigns with those of one segment
    pub async fn fetch_campaigns(&mut self, segment_id: u64) -> PageResult {
        match self.gateway.list_campaigns(segment_id).await {
            Ok(campaigns) => {
                self.campaigns = campaigns;
                self.error.clear();
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, segment_id, "Error fetching campaigns");
                Err(self.error.set(FETCH_CAMPAIGNS_FAILED))
            }
        }
    }

    /// Validate and send the draft.
    ///
    /// A message without the `[Name]` placeholder is rejected before any
    /// request goes out. Once the campaign is created the call succeeds; a
    /// failed refresh only shows up in the error slot.
    pub async fn submit(&mut self) -> PageResult {
        if let Err(e) = self.draft.validate() {
            return Err(self.error.set(e.to_string()));
        }

        if let Err(e) = self.gateway.create_campaign(&self.draft).await {
            tracing::error!(error = %e, "Error creating campaign");
            return Err(self.error.set(CREATE_FAILED));
        }

        let segment_id = self.draft.audience_segment_id;
        tracing::info!(segment_id, "Campaign created");
        self.draft = CampaignDraft::default();
        self.error.clear();
        if self.fetch_campaigns(segment_id).await.is_err() {
            tracing::warn!(segment_id, "Campaign list is stale after create");
        }
        Ok(())
    }

    /// Cached campaigns addressed to `segment_id`
    pub fn campaigns_for(&self, segment_id: u64) -> Vec<&Campaign> {
        self.campaigns
            .iter()
            .filter(|c| c.audience_segment_id == segment_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::campaign::NAME_PLACEHOLDER;
    use crate::infrastructure::memory::InMemoryBackend;

    fn backend_with_segment() -> Arc<InMemoryBackend> {
        let backend = Arc::new(InMemoryBackend::new());
        backend.push_segment_record(crate::application::dto::SegmentRecord {
            id: 2,
            name: "Big spenders".into(),
            conditions: "{}".into(),
            created_at: String::new(),
            updated_at: String::new(),
            customers: vec![],
        });
        backend
    }

    #[tokio::test]
    async fn test_missing_placeholder_rejected_without_network() {
        let backend = backend_with_segment();
        let mut page = CampaignPage::new(backend.clone());
        page.select_segment(2);
        page.set_message("Hello, 20% off today!");

        let err = page.submit().await.unwrap_err();

        assert!(err.0.contains(NAME_PLACEHOLDER));
        assert_eq!(page.error(), Some(err.0.as_str()));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_submit_refreshes_segment_campaigns() {
        let backend = backend_with_segment();
        let mut page = CampaignPage::new(backend.clone());
        page.load_segments().await.unwrap();
        assert_eq!(page.segments()[0].name, "Big spenders");

        page.select_segment(2);
        page.set_message("Hi [Name], 20% off today!");
        page.set_scheduled_at("2025-03-01T09:30");
        page.submit().await.unwrap();

        assert_eq!(page.draft(), &CampaignDraft::default());
        let campaigns = page.campaigns_for(2);
        assert_eq!(campaigns.len(), 1);
        assert_eq!(campaigns[0].audience_segment.name, "Big spenders");
        assert_eq!(campaigns[0].scheduled_at, "2025-03-01T09:30");
        assert!(page.campaigns_for(3).is_empty());
    }

    #[tokio::test]
    async fn test_submit_succeeds_when_refresh_fails() {
        let backend = backend_with_segment();
        let mut page = CampaignPage::new(backend.clone());
        page.select_segment(2);
        page.set_message("Hi [Name], 20% off today!");

        backend.set_failing_reads(true);
        assert_eq!(page.submit().await, Ok(()));

        assert_eq!(page.draft(), &CampaignDraft::default());
        assert_eq!(page.error(), Some(FETCH_CAMPAIGNS_FAILED));

        backend.set_failing_reads(false);
        page.fetch_campaigns(2).await.unwrap();
        assert_eq!(page.campaigns_for(2).len(), 1);
    }

    #[tokio::test]
    async fn test_create_failure() {
        let backend = backend_with_segment();
        let mut page = CampaignPage::new(backend.clone());
        page.select_segment(2);
        page.set_message("Hi [Name]");
        backend.set_failing(true);

        let err = page.submit().await.unwrap_err();

        assert_eq!(err.0, CREATE_FAILED);
        assert_eq!(page.draft().message, "Hi [Name]");
    }

    #[tokio::test]
    async fn test_segment_options_failure() {
        let backend = backend_with_segment();
        backend.set_failing(true);
        let mut page = CampaignPage::new(backend);

        assert!(page.load_segments().await.is_err());
        assert_eq!(page.error(), Some(FETCH_SEGMENTS_FAILED));
        assert!(page.segments().is_empty());
    }
}
