//! Page view-models

pub mod audience;
pub mod campaign;
pub mod orders;
pub mod messages;

pub use audience::AudiencePage;
pub use campaign::CampaignPage;
pub use orders::OrdersPage;
pub use messages::MessagesPage;

/// Message surfaced to the user after a failed page operation.
///
/// The same text is stored in the page's error slot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct PageError(pub String);

pub type PageResult<T = ()> = Result<T, PageError>;

pub const NOT_AUTHENTICATED: &str = "User not authenticated or customer ID not found.";

/// Single-slot error holder shared by every page
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorSlot(Option<String>);

impl ErrorSlot {
    pub(crate) fn get(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Replace the current error and hand back the matching [`PageError`]
    pub(crate) fn set(&mut self, message: impl Into<String>) -> PageError {
        let message = message.into();
        self.0 = Some(message.clone());
        PageError(message)
    }

    pub(crate) fn clear(&mut self) {
        self.0 = None;
    }
}
