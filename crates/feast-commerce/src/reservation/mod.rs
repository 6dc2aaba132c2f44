//! Table reservations.

mod book;
mod request;

pub use book::{Reservation, ReservationBook, ReservationStatus};
pub use request::{
    is_offered_slot, time_slots, ReservationContact, ReservationRequest, MAX_PARTY_SIZE,
    MIN_PARTY_SIZE,
};
