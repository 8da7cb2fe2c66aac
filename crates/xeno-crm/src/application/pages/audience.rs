//! Audience segments page

use std::collections::HashSet;
use std::sync::Arc;

use super::{ErrorSlot, PageResult};
use crate::domain::aggregates::{ConditionError, ConditionPatch, Segment};
use crate::domain::value_objects::Combinator;
use crate::ports::outbound::{AudienceGateway, GatewayError};

pub const FETCH_FAILED: &str = "Failed to fetch existing segments. Please try again.";
pub const CREATE_FAILED: &str = "Failed to create segment. Please try again.";
pub const SIZE_FAILED: &str = "Failed to calculate audience size. Please try again.";
pub const NAME_REQUIRED: &str = "Segment name is required.";

/// Segment builder plus the cached list of existing segments.
///
/// Every operation borrows the page mutably, so size estimates are applied
/// strictly in the order they were requested.
pub struct AudiencePage {
    gateway: Arc<dyn AudienceGateway>,
    segments: Vec<Segment>,
    draft: Segment,
    audience_size: Option<u64>,
    error: ErrorSlot,
    expanded: HashSet<u64>,
}

impl AudiencePage {
    pub fn new(gateway: Arc<dyn AudienceGateway>) -> Self {
        Self {
            gateway,
            segments: vec![],
            draft: Segment::draft(),
            audience_size: None,
            error: ErrorSlot::default(),
            expanded: HashSet::new(),
        }
    }

    pub fn segments(&self) -> &[Segment] { &self.segments }
    pub fn draft(&self) -> &Segment { &self.draft }
    pub fn audience_size(&self) -> Option<u64> { self.audience_size }
    pub fn error(&self) -> Option<&str> { self.error.get() }

    // =========================================================================
    // Draft editing
    // =========================================================================

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_combinator(&mut self, combinator: Combinator) {
        self.draft.conditions.set_combinator(combinator);
    }

    pub fn add_condition(&mut self) {
        self.draft.conditions.add_condition();
    }

    pub fn update_condition(&mut self, index: usize, patch: ConditionPatch) -> Result<(), ConditionError> {
        self.draft.conditions.update_condition(index, patch)
    }

    // =========================================================================
    // Backend calls
    // =========================================================================

    /// Replace the cached list with the backend's.
    ///
    /// One undecodable segment fails the whole fetch; the previous list is
    /// kept in that case.
    pub async fn fetch_segments(&mut self) -> PageResult {
        let result = match self.gateway.list_segments().await {
            Ok(records) => records
                .into_iter()
                .map(Segment::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| GatewayError::Malformed(e.to_string())),
            Err(e) => Err(e),
        };

        match result {
            Ok(segments) => {
                self.segments = segments;
                self.error.clear();
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching segments");
                Err(self.error.set(FETCH_FAILED))
            }
        }
    }

    /// Send the draft, then reset it and refresh the list.
    ///
    /// Once the segment is created the call succeeds; a failed refresh only
    /// shows up in the error slot.
    pub async fn submit(&mut self) -> PageResult {
        if self.draft.name.trim().is_empty() {
            return Err(self.error.set(NAME_REQUIRED));
        }
        if let Err(e) = self.draft.conditions.validate() {
            return Err(self.error.set(e.to_string()));
        }

        if let Err(e) = self.gateway.create_segment(&self.draft).await {
            tracing::error!(error = %e, "Error creating segment");
            return Err(self.error.set(CREATE_FAILED));
        }

        tracing::info!(name = %self.draft.name, "Segment created");
        self.draft = Segment::draft();
        self.audience_size = None;
        self.error.clear();
        if self.fetch_segments().await.is_err() {
            tracing::warn!("Segment list is stale after create");
        }
        Ok(())
    }

    /// Ask the backend how many customers match the draft
    pub async fn calculate_audience_size(&mut self) -> PageResult<u64> {
        match self.gateway.estimate_size(&self.draft).await {
            Ok(size) => {
                self.audience_size = Some(size);
                self.error.clear();
                Ok(size)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error calculating audience size");
                Err(self.error.set(SIZE_FAILED))
            }
        }
    }

    // =========================================================================
    // Listing state
    // =========================================================================

    /// Flip the customer list of a segment between shown and hidden
    pub fn toggle_customers(&mut self, segment_id: u64) -> bool {
        if self.expanded.remove(&segment_id) {
            false
        } else {
            self.expanded.insert(segment_id);
            true
        }
    }

    pub fn is_expanded(&self, segment_id: u64) -> bool {
        self.expanded.contains(&segment_id)
    }
}

impl std::fmt::Debug for AudiencePage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudiencePage")
            .field("segments", &self.segments.len())
            .field("draft", &self.draft)
            .field("audience_size", &self.audience_size)
            .field("error", &self.error)
            .finish()
    }
}
