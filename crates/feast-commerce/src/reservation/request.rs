//! Table reservation requests and slot rules.

use crate::error::CommerceError;
use crate::ids::RestaurantId;
use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Smallest bookable party.
pub const MIN_PARTY_SIZE: u8 = 1;
/// Largest bookable party.
pub const MAX_PARTY_SIZE: u8 = 10;

const FIRST_SLOT: (u32, u32) = (17, 0);
const LAST_SLOT: (u32, u32) = (22, 0);
const SLOT_MINUTES: i64 = 30;

/// Bookable start times, every half hour from 17:00 to 22:00.
pub fn time_slots() -> Vec<NaiveTime> {
    let (Some(first), Some(last)) = (
        NaiveTime::from_hms_opt(FIRST_SLOT.0, FIRST_SLOT.1, 0),
        NaiveTime::from_hms_opt(LAST_SLOT.0, LAST_SLOT.1, 0),
    ) else {
        return Vec::new();
    };

    let mut slots = Vec::new();
    let mut slot = first;
    while slot <= last {
        slots.push(slot);
        slot += Duration::minutes(SLOT_MINUTES);
    }
    slots
}

/// Check whether a time is one of the offered slots.
pub fn is_offered_slot(time: NaiveTime) -> bool {
    time_slots().contains(&time)
}

/// Guest contact details for a reservation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReservationContact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ReservationContact {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }
}

/// A request to book a table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReservationRequest {
    pub restaurant_id: RestaurantId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub party_size: u8,
    pub contact: ReservationContact,
    pub notes: Option<String>,
}

impl ReservationRequest {
    pub fn new(
        restaurant_id: RestaurantId,
        date: NaiveDate,
        time: NaiveTime,
        party_size: u8,
        contact: ReservationContact,
    ) -> Self {
        Self {
            restaurant_id,
            date,
            time,
            party_size,
            contact,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Validate against the booking rules as of `today`.
    pub fn validate(&self, today: NaiveDate) -> Result<(), CommerceError> {
        if self.date < today {
            return Err(CommerceError::InvalidReservation(format!(
                "date {} is in the past",
                self.date
            )));
        }
        if !is_offered_slot(self.time) {
            return Err(CommerceError::InvalidReservation(format!(
                "{} is not an available time slot",
                self.time.format("%H:%M")
            )));
        }
        if !(MIN_PARTY_SIZE..=MAX_PARTY_SIZE).contains(&self.party_size) {
            return Err(CommerceError::InvalidReservation(format!(
                "party size must be between {} and {}, got {}",
                MIN_PARTY_SIZE, MAX_PARTY_SIZE, self.party_size
            )));
        }

        let mut missing = Vec::new();
        if self.contact.name.trim().is_empty() {
            missing.push("name");
        }
        if !self.contact.email.contains('@') {
            missing.push("email");
        }
        if self.contact.phone.trim().is_empty() {
            missing.push("phone");
        }
        if !missing.is_empty() {
            return Err(CommerceError::InvalidReservation(format!(
                "missing contact details: {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn request() -> ReservationRequest {
        ReservationRequest::new(
            RestaurantId::new("bella-vista"),
            date(2024, 6, 14),
            time(19, 30),
            4,
            ReservationContact::new("Lena Huber", "lena@example.com", "0151 2345678"),
        )
    }

    #[test]
    fn test_time_slots() {
        let slots = time_slots();
        assert_eq!(slots.len(), 11);
        assert_eq!(slots[0], time(17, 0));
        assert_eq!(slots[10], time(22, 0));
        assert!(is_offered_slot(time(20, 30)));
        assert!(!is_offered_slot(time(20, 15)));
        assert!(!is_offered_slot(time(22, 30)));
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate(date(2024, 6, 14)).is_ok());
        assert!(request().validate(date(2024, 6, 1)).is_ok());
    }

    #[test]
    fn test_past_date_rejected() {
        assert!(matches!(
            request().validate(date(2024, 6, 15)),
            Err(CommerceError::InvalidReservation(_))
        ));
    }

    #[test]
    fn test_party_size_bounds() {
        let mut req = request();
        req.party_size = 0;
        assert!(req.validate(date(2024, 6, 1)).is_err());
        req.party_size = 11;
        assert!(req.validate(date(2024, 6, 1)).is_err());
        req.party_size = 10;
        assert!(req.validate(date(2024, 6, 1)).is_ok());
    }

    #[test]
    fn test_missing_contact() {
        let mut req = request();
        req.contact = ReservationContact::new("", "lena", "");
        let err = req.validate(date(2024, 6, 1)).unwrap_err();
        assert_eq!(
            err,
            CommerceError::InvalidReservation(
                "missing contact details: name, email, phone".to_string()
            )
        );
    }
}
