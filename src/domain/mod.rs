pub mod charger;
pub mod error;
pub mod reservation;

pub use charger::{ChargerDescriptor, ChargerInfo, Location};
pub use error::{DomainError, DomainResult};
pub use reservation::{Reservation, ReservationRepository};
