//! Ports module
//!
//! Interfaces between the application layer and the backend.

pub mod outbound;
