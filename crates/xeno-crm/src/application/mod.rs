//! Application layer
//!
//! Page view-models: each holds the state one screen renders and a single
//! error slot that the latest failure overwrites.

pub mod dto;
pub mod pages;
pub mod sign_in;

pub use dto::*;
pub use pages::{AudiencePage, CampaignPage, MessagesPage, OrdersPage, PageError, PageResult};
pub use sign_in::{Identity, SignInError, SignInService};
