//! Domain module
//!
//! Contains the client-side domain model.

pub mod aggregates;
pub mod value_objects;

pub use aggregates::*;
pub use value_objects::*;
