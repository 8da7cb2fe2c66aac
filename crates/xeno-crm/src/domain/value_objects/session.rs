//! Signed-in customer session
//!
//! Passed explicitly to every operation that needs the current customer id.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub customer_id: u64,
    pub name: String,
    pub email: String,
}

impl Session {
    pub fn new(customer_id: u64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            customer_id,
            name: name.into(),
            email: email.into(),
        }
    }
}
