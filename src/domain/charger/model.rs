//! Charger descriptor entity

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Geographic position of the charger.
///
/// Serialized as `{"lat", "lng"}`. Configuration files spell the keys out
/// (`latitude`, `longitude`); the historical `longtitude` key is accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Location {
    #[serde(rename = "lat", alias = "latitude")]
    pub latitude: f64,
    #[serde(rename = "lng", alias = "longitude", alias = "longtitude")]
    pub longitude: f64,
}

/// Static charger information, fixed at configuration load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargerInfo {
    pub location: Location,
    /// Stable identity of this charger instance
    pub uuid: String,
}

/// Record describing where this charger can be reached.
///
/// Only constructible from a bound socket address, so a descriptor handed
/// to the registration agent always carries the real listening port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChargerDescriptor {
    pub location: Location,
    pub uuid: String,
    /// Port the API listener is bound to
    pub port: u16,
}

impl ChargerDescriptor {
    pub fn bound(info: ChargerInfo, local_addr: SocketAddr) -> Self {
        Self {
            location: info.location,
            uuid: info.uuid,
            port: local_addr.port(),
        }
    }
}
