use anyhow::Result;
use carpark::core::Clock;
use carpark::{CarPark, FeeSchedule, ManualClock, MenuSession, SlotKind};
use chrono::{Duration, TimeZone, Utc};
use std::io::Cursor;

fn start_clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2024, 9, 4, 8, 0, 0).unwrap())
}

#[test]
fn test_full_session() -> Result<()> {
    let clock = start_clock();
    let script = [
        "1", "s03", "staff", // add S03
        "5", "V01", "T2345", "Alice Smith", "no", // park visitor
        "5", "V01", // occupied, rejected before car details
        "2", "v01", // occupied slot cannot be deleted
        "7", "Q0000", // unknown car
        "3", // list
        "4", // sweep
        "3", // list again
        "8",
    ]
    .join("\n");

    let mut output = Vec::new();
    let mut session = MenuSession::new(
        Cursor::new(script),
        &mut output,
        &clock,
        CarPark::with_counts(2, 2, FeeSchedule::default()),
    );
    session.run()?;
    let car_park = session.into_car_park();
    let out = String::from_utf8(output)?;

    assert!(out.contains("Parking slot added successfully."));
    assert!(out.contains("Car T2345 parked successfully in slot V01 at "));
    assert!(out.contains("Slot V01 is already occupied."));
    assert!(out.contains("Slot V01 is currently occupied and cannot be deleted."));
    assert!(out.contains("Car not found."));
    assert!(out.contains("Staff: 0/3 occupied, Visitor: 1/2 occupied"));
    assert!(out.contains("Slot ID: S03, Type: staff, Status: Unoccupied"));
    assert!(out.contains("Slot ID: V01, Type: visitor, Status: Occupied by T2345 (Owner: Alice Smith)"));
    assert!(out.contains("All unoccupied parking slots have been deleted (4 removed)."));
    assert!(out.contains("Staff: 0/0 occupied, Visitor: 1/1 occupied"));
    assert!(out.ends_with("Program end!\n"));

    let ids: Vec<&str> = car_park.list_all().map(|slot| slot.id()).collect();
    assert_eq!(ids, vec!["V01"]);
    Ok(())
}

#[test]
fn test_fee_grows_with_the_clock() -> Result<()> {
    let clock = start_clock();
    let mut car_park = CarPark::with_counts(1, 0, FeeSchedule::default());
    car_park.park("S01", "B7777", "Sam", SlotKind::Staff, clock.now())?;

    clock.advance(Duration::minutes(150));
    let mut output = Vec::new();
    let mut session = MenuSession::new(Cursor::new("6\nb7777\n7\nB7777\n6\nB7777\n"), &mut output, &clock, car_park);
    session.run()?;
    drop(session);
    let out = String::from_utf8(output)?;

    assert!(out.contains("Car found in slot: S01, Owner: Sam"));
    assert!(out.contains("Parked Time: 2 hours 30 minutes 0 seconds"));
    assert!(out.contains("Parking Fee: $15"));
    assert!(out.contains("Car removed successfully from slot S01."));
    assert_eq!(out.matches("Car not found.").count(), 1);
    Ok(())
}

#[test]
fn test_invalid_input_reprompts() -> Result<()> {
    let clock = start_clock();
    let script = "7\n12345\nT23\nt2345\n5\nV1\nV01\nT1111\n   \nR2D2\nVic\nno\n8\n";
    let mut output = Vec::new();
    let mut session = MenuSession::new(
        Cursor::new(script),
        &mut output,
        &clock,
        CarPark::with_counts(0, 1, FeeSchedule::default()),
    );
    session.run()?;
    let car_park = session.into_car_park();
    let out = String::from_utf8(output)?;

    assert_eq!(out.matches("Invalid registration number").count(), 2);
    assert_eq!(out.matches("Invalid slot ID").count(), 1);
    assert_eq!(out.matches("Invalid owner name").count(), 2);
    assert!(out.contains("Car T1111 parked successfully in slot V01"));
    assert_eq!(
        car_park.registry().find_by_id("V01")?.occupant().map(|car| car.owner_name.as_str()),
        Some("Vic")
    );
    Ok(())
}
