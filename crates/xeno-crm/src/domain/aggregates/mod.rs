pub mod condition;
pub mod segment;
pub mod campaign;
pub mod order;
pub mod message;

pub use condition::{Condition, ConditionError, ConditionGroup, ConditionPatch, ParseError};
pub use segment::{Customer, Segment, SegmentSummary};
pub use campaign::{Campaign, CampaignDraft, CampaignError, CampaignSegment, NAME_PLACEHOLDER};
pub use order::{format_money, Order, OrderDraft};
pub use message::{DeliveryStatus, Message};
