//! Reservation book: booked tables and their status.

use crate::catalog::initials;
use crate::error::CommerceError;
use crate::ids::{ReservationId, RestaurantId};
use crate::reservation::{ReservationContact, ReservationRequest};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reservation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// Awaiting confirmation by the restaurant.
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    /// Check if a transition to `next` is allowed.
    pub fn can_transition_to(&self, next: ReservationStatus) -> bool {
        matches!(
            (self, next),
            (ReservationStatus::Pending, ReservationStatus::Confirmed)
                | (ReservationStatus::Pending, ReservationStatus::Cancelled)
                | (ReservationStatus::Confirmed, ReservationStatus::Cancelled)
        )
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A booked table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reservation {
    pub id: ReservationId,
    /// Human-readable number, e.g. "BV-2024-001".
    pub number: String,
    pub restaurant_id: RestaurantId,
    pub restaurant_name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub party_size: u8,
    pub contact: ReservationContact,
    pub notes: Option<String>,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    pub fn is_active(&self) -> bool {
        self.status != ReservationStatus::Cancelled
    }

    /// "14.06.2024 19:30".
    pub fn when(&self) -> String {
        format!("{} {}", self.date.format("%d.%m.%Y"), self.time.format("%H:%M"))
    }
}

/// All reservations taken, with per-book numbering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationBook {
    reservations: Vec<Reservation>,
    sequence: u32,
}

impl ReservationBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and record a request as a pending reservation.
    pub fn book(
        &mut self,
        request: ReservationRequest,
        restaurant_name: &str,
        today: NaiveDate,
    ) -> Result<&Reservation, CommerceError> {
        request.validate(today)?;

        self.sequence += 1;
        let number = format!(
            "{}-{}-{:03}",
            initials(restaurant_name),
            request.date.year(),
            self.sequence
        );

        let reservation = Reservation {
            id: ReservationId::generate(),
            number,
            restaurant_id: request.restaurant_id,
            restaurant_name: restaurant_name.to_string(),
            date: request.date,
            time: request.time,
            party_size: request.party_size,
            contact: request.contact,
            notes: request.notes,
            status: ReservationStatus::Pending,
            created_at: Utc::now(),
        };

        tracing::info!(
            reservation = %reservation.number,
            restaurant = %reservation.restaurant_id,
            date = %reservation.date,
            guests = reservation.party_size,
            "reservation booked"
        );

        self.reservations.push(reservation);
        let index = self.reservations.len() - 1;
        Ok(&self.reservations[index])
    }

    /// Confirm a pending reservation.
    pub fn confirm(&mut self, id: &ReservationId) -> Result<&Reservation, CommerceError> {
        self.transition(id, ReservationStatus::Confirmed)
    }

    /// Cancel a pending or confirmed reservation.
    pub fn cancel(&mut self, id: &ReservationId) -> Result<&Reservation, CommerceError> {
        self.transition(id, ReservationStatus::Cancelled)
    }

    fn transition(
        &mut self,
        id: &ReservationId,
        next: ReservationStatus,
    ) -> Result<&Reservation, CommerceError> {
        let reservation = self
            .reservations
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| CommerceError::ReservationNotFound(id.to_string()))?;

        if !reservation.status.can_transition_to(next) {
            return Err(CommerceError::InvalidReservationTransition {
                from: reservation.status.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }

        tracing::info!(
            reservation = %reservation.number,
            from = reservation.status.as_str(),
            to = next.as_str(),
            "reservation status changed"
        );
        reservation.status = next;
        Ok(&*reservation)
    }

    pub fn get(&self, id: &ReservationId) -> Option<&Reservation> {
        self.reservations.iter().find(|r| &r.id == id)
    }

    pub fn find_by_number(&self, number: &str) -> Option<&Reservation> {
        self.reservations
            .iter()
            .find(|r| r.number.eq_ignore_ascii_case(number.trim()))
    }

    pub fn all(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }

    /// Active reservations from today on, soonest first.
    pub fn upcoming(&self, today: NaiveDate) -> Vec<&Reservation> {
        let mut upcoming: Vec<_> = self
            .reservations
            .iter()
            .filter(|r| r.is_active() && r.date >= today)
            .collect();
        upcoming.sort_by_key(|r| (r.date, r.time));
        upcoming
    }

    /// Reservations before today, most recent first.
    pub fn past(&self, today: NaiveDate) -> Vec<&Reservation> {
        let mut past: Vec<_> = self.reservations.iter().filter(|r| r.date < today).collect();
        past.sort_by_key(|r| std::cmp::Reverse((r.date, r.time)));
        past
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request(day: u32, hour: u32) -> ReservationRequest {
        ReservationRequest::new(
            RestaurantId::new("bella-vista"),
            date(2024, 6, day),
            NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            2,
            ReservationContact::new("Lena Huber", "lena@example.com", "0151 2345678"),
        )
    }

    #[test]
    fn test_book_assigns_number() {
        let mut book = ReservationBook::new();
        let today = date(2024, 6, 1);

        let first = book.book(request(14, 19), "Bella Vista", today).unwrap();
        assert_eq!(first.number, "BV-2024-001");
        assert_eq!(first.status, ReservationStatus::Pending);

        let second = book.book(request(15, 20), "Bella Vista", today).unwrap();
        assert_eq!(second.number, "BV-2024-002");
        assert_eq!(book.len(), 2);
        assert!(book.find_by_number("bv-2024-002").is_some());
    }

    #[test]
    fn test_invalid_request_not_booked() {
        let mut book = ReservationBook::new();
        let result = book.book(request(14, 16), "Bella Vista", date(2024, 6, 1));
        assert!(matches!(result, Err(CommerceError::InvalidReservation(_))));
        assert!(book.is_empty());
    }

    #[test]
    fn test_status_machine() {
        let mut book = ReservationBook::new();
        let id = book
            .book(request(14, 19), "Bella Vista", date(2024, 6, 1))
            .unwrap()
            .id
            .clone();

        assert_eq!(book.confirm(&id).unwrap().status, ReservationStatus::Confirmed);
        assert!(matches!(
            book.confirm(&id),
            Err(CommerceError::InvalidReservationTransition { .. })
        ));
        assert_eq!(book.cancel(&id).unwrap().status, ReservationStatus::Cancelled);
        assert!(book.cancel(&id).is_err());
        assert!(matches!(
            book.confirm(&ReservationId::new("missing")),
            Err(CommerceError::ReservationNotFound(_))
        ));
    }

    #[test]
    fn test_upcoming_and_past() {
        let mut book = ReservationBook::new();
        let booked_on = date(2024, 6, 1);
        book.book(request(20, 19), "Bella Vista", booked_on).unwrap();
        book.book(request(10, 18), "Bella Vista", booked_on).unwrap();
        let cancelled = book
            .book(request(12, 18), "Bella Vista", booked_on)
            .unwrap()
            .id
            .clone();
        book.book(request(5, 20), "Bella Vista", booked_on).unwrap();
        book.cancel(&cancelled).unwrap();

        let today = date(2024, 6, 10);
        let upcoming: Vec<_> = book.upcoming(today).iter().map(|r| r.date.day()).collect();
        assert_eq!(upcoming, vec![10, 20]);

        let past: Vec<_> = book.past(today).iter().map(|r| r.date.day()).collect();
        assert_eq!(past, vec![5]);
    }
}
