//! Application ports (hexagonal architecture boundaries)

pub mod outbound;

pub use outbound::{RegistrationError, RegistryClient};
