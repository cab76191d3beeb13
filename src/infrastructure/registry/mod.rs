//! Charger registry client

pub mod http;

pub use http::{HttpRegistryClient, DEFAULT_REGISTRY_URL, DEFAULT_REQUEST_TIMEOUT};
