//! CLI Commands

pub mod audience;
pub mod campaign;
pub mod config;
pub mod messages;
pub mod orders;
pub mod session;

use std::sync::Arc;

use xeno_crm::Session;
use xeno_sdk::Client;

use crate::config::Config;
use crate::output::OutputFormat;

/// Everything a backend command needs
pub struct Context<'a> {
    pub client: Client,
    pub config: Config,
    pub profile: Option<&'a str>,
    pub format: OutputFormat,
}

impl Context<'_> {
    pub fn session(&self) -> Option<&Session> {
        self.config.session.as_ref()
    }

    /// Shared handle for the page view-models
    pub fn gateway(&self) -> Arc<Client> {
        Arc::new(self.client.clone())
    }
}
