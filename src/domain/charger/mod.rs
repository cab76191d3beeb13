//! Charger identity
//!
//! Static information loaded from configuration and the descriptor that
//! combines it with the bound listening port.

pub mod model;

pub use model::{ChargerDescriptor, ChargerInfo, Location};
