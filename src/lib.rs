//! # Charger Edge Agent
//!
//! Edge agent for a single EV charger: a small REST API for reservation
//! lifecycle management, plus self-registration of the charger's reachable
//! endpoint with a central registry.
//!
//! ## Architecture
//!
//! - **domain**: Reservation and charger descriptor entities, repository trait
//! - **application**: Registration agent and its outbound registry port
//! - **infrastructure**: In-memory reservation store, HTTP registry client
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: Bootstrap wiring and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig, ConfigError};

// Re-export API router
pub use interfaces::http::create_api_router;

pub use server::{init_tracing, AgentHandle, AgentOptions, ServerError};
