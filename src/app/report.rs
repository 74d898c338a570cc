use crate::core::engine::CarPark;
use crate::domain::model::{Elapsed, Slot};
use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Write;

pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Staff before visitor, each ascending by numeric suffix. Ids without a
/// numeric suffix go last within their kind.
pub fn display_order<'a, I>(slots: I) -> Vec<&'a Slot>
where
    I: IntoIterator<Item = &'a Slot>,
{
    let mut ordered: Vec<&Slot> = slots.into_iter().collect();
    ordered.sort_by_key(|slot| {
        (
            slot.kind(),
            slot.number().unwrap_or(u32::MAX),
            slot.id().to_ascii_uppercase(),
        )
    });
    ordered
}

pub fn format_elapsed(elapsed: &Elapsed) -> String {
    format!(
        "{} hours {} minutes {} seconds",
        elapsed.hours, elapsed.minutes, elapsed.seconds
    )
}

pub fn format_fee(fee: u64) -> String {
    format!("${}", fee)
}

pub fn format_timestamp_in<Tz>(at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string()
}

/// `dd/MM/yyyy HH:mm:ss` in local time.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    format_timestamp_in(at, &Local)
}

pub fn render_listing(car_park: &CarPark, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let occupancy = car_park.occupancy();

    let _ = writeln!(out, "Listing all slots:");
    if occupancy.total() == 0 {
        let _ = writeln!(out, "No parking slots.");
        return out;
    }
    let _ = writeln!(
        out,
        "Staff: {}/{} occupied, Visitor: {}/{} occupied",
        occupancy.staff_occupied,
        occupancy.staff_total,
        occupancy.visitor_occupied,
        occupancy.visitor_total
    );

    for slot in display_order(car_park.list_all()) {
        match slot.occupant() {
            Some(car) => {
                let _ = writeln!(
                    out,
                    "Slot ID: {}, Type: {}, Status: Occupied by {} (Owner: {})",
                    slot.id(),
                    slot.kind(),
                    car.registration,
                    car.owner_name
                );
                let elapsed = crate::core::fee::elapsed(car.parked_at, now);
                let _ = writeln!(out, "Parked Time: {}", format_elapsed(&elapsed));
                let fee = car_park.fee_schedule().fee(car.parked_at, now);
                let _ = writeln!(out, "Parking Fee: {}", format_fee(fee));
            }
            None => {
                let _ = writeln!(
                    out,
                    "Slot ID: {}, Type: {}, Status: Unoccupied",
                    slot.id(),
                    slot.kind()
                );
            }
        }
    }
    out
}
