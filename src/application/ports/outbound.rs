//! Outbound ports: announcing this charger to the registry
//!
//! [`RegistryClient`] decouples the registration loop from the transport.
//! The production implementation is
//! [`HttpRegistryClient`](crate::infrastructure::registry::HttpRegistryClient).

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ChargerDescriptor;

/// Why a registration attempt did not succeed. Every variant is retryable.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Connection refused, DNS failure, timeout or any other transport fault
    #[error("Registry unreachable: {0}")]
    Transport(String),

    /// The registry answered with a non-success status
    #[error("Registry rejected registration with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Sends the charger descriptor to the central registry.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Perform one registration attempt. `Ok` means the registry accepted it.
    async fn register(&self, descriptor: &ChargerDescriptor) -> Result<(), RegistrationError>;
}
