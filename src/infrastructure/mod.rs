//! Infrastructure layer
//!
//! Concrete adapters: the in-memory reservation store and the HTTP client
//! for the charger registry.

pub mod registry;
pub mod storage;

pub use registry::HttpRegistryClient;
pub use storage::InMemoryReservationRepository;
