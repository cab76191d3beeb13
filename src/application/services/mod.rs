//! Application services

mod registration;

pub use registration::{RegistrationAgent, RegistrationOutcome, DEFAULT_RETRY_DELAY};
