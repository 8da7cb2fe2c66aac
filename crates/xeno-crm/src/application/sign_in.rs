//! Sign-in registration
//!
//! The identity provider hands over a verified identity; before a session
//! exists the customer is registered with (or looked up by) the backend,
//! which assigns the numeric customer id every other screen relies on.

use std::sync::Arc;

use crate::domain::value_objects::Session;
use crate::ports::outbound::{CustomerGateway, GatewayError};

/// Identity as returned by the identity provider
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Identity {
    pub email: Option<String>,
    pub name: Option<String>,
}

impl Identity {
    pub fn new(email: impl Into<String>, name: Option<String>) -> Self {
        Self {
            email: Some(email.into()),
            name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignInError {
    #[error("User email is required but missing.")]
    MissingEmail,

    #[error("Sign-in rejected: {0}")]
    Rejected(String),

    #[error("Sign-in failed: {0}")]
    Gateway(#[from] GatewayError),
}

pub struct SignInService {
    gateway: Arc<dyn CustomerGateway>,
}

impl SignInService {
    pub fn new(gateway: Arc<dyn CustomerGateway>) -> Self {
        Self { gateway }
    }

    /// Register the identity with the backend and open a session
    pub async fn sign_in(&self, identity: &Identity) -> Result<Session, SignInError> {
        let email = identity
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| {
                tracing::error!("User email is required but missing.");
                SignInError::MissingEmail
            })?;

        let response = self.gateway.register(email).await.map_err(|e| {
            tracing::error!(error = %e, "Error during backend sign-in callback");
            SignInError::from(e)
        })?;

        match response.data {
            Some(customer) if response.success => {
                let name = identity.name.clone().unwrap_or(customer.name);
                tracing::info!(customer_id = customer.id, "Signed in");
                Ok(Session::new(customer.id, name, email))
            }
            _ => {
                let message = response.message.unwrap_or_else(|| "no customer returned".into());
                tracing::error!(%message, "Backend rejected sign-in");
                Err(SignInError::Rejected(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::Customer;
    use crate::infrastructure::memory::InMemoryBackend;

    #[tokio::test]
    async fn test_sign_in_opens_session_with_customer_id() {
        let backend = Arc::new(InMemoryBackend::new());
        backend.add_customer(Customer {
            id: 12,
            name: "Ana Lima".into(),
            email: "ana@example.com".into(),
            ..Default::default()
        });
        let service = SignInService::new(backend);

        let session = service
            .sign_in(&Identity::new("ana@example.com", None))
            .await
            .unwrap();

        assert_eq!(session, Session::new(12, "Ana Lima", "ana@example.com"));
    }

    #[tokio::test]
    async fn test_new_email_is_registered() {
        let backend = Arc::new(InMemoryBackend::new());
        let service = SignInService::new(backend.clone());

        let first = service
            .sign_in(&Identity::new("new@example.com", Some("New".into())))
            .await
            .unwrap();
        let second = service.sign_in(&Identity::new("new@example.com", None)).await.unwrap();

        assert_eq!(first.name, "New");
        assert_eq!(first.customer_id, second.customer_id);
    }

    #[tokio::test]
    async fn test_missing_email() {
        let service = SignInService::new(Arc::new(InMemoryBackend::new()));
        let err = service.sign_in(&Identity::default()).await.unwrap_err();
        assert_eq!(err, SignInError::MissingEmail);
    }

    #[tokio::test]
    async fn test_transport_failure_rejects_sign_in() {
        let backend = Arc::new(InMemoryBackend::new());
        backend.set_failing(true);
        let service = SignInService::new(backend);

        let err = service.sign_in(&Identity::new("ana@example.com", None)).await.unwrap_err();
        assert!(matches!(err, SignInError::Gateway(GatewayError::Transport(_))));
    }
}
