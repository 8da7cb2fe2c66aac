//! Value Objects module
//!
//! Immutable domain primitives.

pub mod field;
pub mod operator;
pub mod session;

pub use field::{Field, FieldError};
pub use operator::{
    default_operator, is_operator_allowed, operator_label, operator_options,
    validate_operator_table, Combinator, Operator, OperatorError, OperatorOption,
    OperatorTableError,
};
pub use session::Session;
