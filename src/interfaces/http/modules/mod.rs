pub mod charger;
pub mod reservations;
