pub mod dto;
pub mod handlers;

pub use dto::{DeleteReservationRequest, ReservationMap};
pub use handlers::{create_reservation, delete_reservation, list_reservations, ReservationAppState};
