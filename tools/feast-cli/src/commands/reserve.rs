//! Book a table.

use anyhow::{Context as _, Result};
use chrono::{Local, NaiveDate, NaiveTime};
use feast_commerce::reservation::{
    time_slots, ReservationBook, ReservationContact, ReservationRequest,
};

use super::ReserveArgs;
use crate::context::{find_restaurant, Context};
use crate::output::status_badge;

/// Run the reserve command.
pub async fn run(args: ReserveArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let restaurant = find_restaurant(&catalog, &args.restaurant)?;
    let (date, time) = parse_date_time(&args.date, &args.time)?;

    let mut request = ReservationRequest::new(
        restaurant.id.clone(),
        date,
        time,
        args.guests,
        ReservationContact::new(args.name.clone(), args.email.clone(), args.phone.clone()),
    );
    if let Some(notes) = &args.notes {
        request = request.with_notes(notes.clone());
    }

    let today = Local::now().date_naive();
    let mut book = ReservationBook::new();
    let reservation = match book.book(request, &restaurant.name, today) {
        Ok(reservation) => reservation,
        Err(e) => {
            ctx.output.info(&format!("Available times: {}", slot_list()));
            return Err(e.into());
        }
    };

    if ctx.output.is_json() {
        ctx.output.json(reservation);
        return Ok(());
    }

    ctx.output.success(&format!(
        "Table requested at {} ({})",
        reservation.restaurant_name, reservation.number
    ));
    ctx.output.kv("When", &reservation.when());
    ctx.output.kv("Guests", &reservation.party_size.to_string());
    ctx.output.kv("Status", &status_badge(reservation.status.as_str()));
    if let Some(phone) = &restaurant.phone {
        ctx.output.kv("Restaurant phone", phone);
    }

    Ok(())
}

/// Parse `YYYY-MM-DD` and `HH:MM`.
pub fn parse_date_time(date: &str, time: &str) -> Result<(NaiveDate, NaiveTime)> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", date))?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .with_context(|| format!("Invalid time '{}', expected HH:MM", time))?;
    Ok((date, time))
}

fn slot_list() -> String {
    time_slots()
        .iter()
        .map(|slot| slot.format("%H:%M").to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_time() {
        let (date, time) = parse_date_time("2024-06-14", "19:30").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 14).unwrap());
        assert_eq!(time, NaiveTime::from_hms_opt(19, 30, 0).unwrap());

        assert!(parse_date_time("14.06.2024", "19:30").is_err());
        assert!(parse_date_time("2024-06-14", "7pm").is_err());
    }

    #[test]
    fn test_slot_list() {
        let slots = slot_list();
        assert!(slots.starts_with("17:00, 17:30"));
        assert!(slots.ends_with("22:00"));
    }
}
