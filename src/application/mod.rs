pub mod ports;
pub mod services;

pub use ports::{RegistrationError, RegistryClient};
pub use services::{RegistrationAgent, RegistrationOutcome};
