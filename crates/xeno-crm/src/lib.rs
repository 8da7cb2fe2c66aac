//! Xeno CRM
//!
//! Client-side domain for the Xeno CRM product, following the same layered
//! layout as the rest of the platform crates.
//!
//! ## Architecture
//!
//! - **Domain Layer**: segment conditions, segments, campaigns, orders, messages
//! - **Application Layer**: page view-models and wire DTOs
//! - **Ports Layer**: outbound gateway traits implemented by the HTTP SDK
//! - **Infrastructure Layer**: in-memory gateway used by tests and demos
//!
//! Audience evaluation is owned by the backend. Nothing in this crate
//! evaluates a condition against a customer.

pub mod domain;
pub mod application;
pub mod ports;
pub mod infrastructure;

pub use domain::aggregates::{
    Campaign, CampaignDraft, CampaignError, Condition, ConditionError, ConditionGroup,
    ConditionPatch, Customer, DeliveryStatus, Message, Order, OrderDraft, ParseError, Segment,
    SegmentSummary,
};
pub use domain::value_objects::{
    validate_operator_table, Combinator, Field, Operator, OperatorOption, Session,
};
pub use application::{
    AudiencePage, CampaignPage, Identity, MessagesPage, OrdersPage, PageError, PageResult,
    SignInError, SignInService,
};
pub use ports::outbound::{
    AudienceGateway, CampaignGateway, CustomerGateway, GatewayError, MessageGateway, OrderGateway,
};
