use carpark::{CarPark, FeeSchedule, ParkingError, SharedCarPark, SlotKind};
use chrono::Utc;
use std::collections::HashSet;
use std::thread;

#[test]
fn test_concurrent_parking_keeps_registrations_unique() {
    let shared = SharedCarPark::new(CarPark::with_counts(0, 40, FeeSchedule::default()));

    // Eight callers race for the same four registrations across all slots.
    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let shared = shared.clone();
            thread::spawn(move || {
                let mut parked = 0;
                for n in 0..40 {
                    let slot = format!("V{:02}", (n + worker * 5) % 40 + 1);
                    let registration = format!("C{:04}", n % 4);
                    match shared.park(&slot, &registration, "Racer", SlotKind::Visitor, Utc::now()) {
                        Ok(_) => parked += 1,
                        Err(ParkingError::DuplicateRegistration { .. })
                        | Err(ParkingError::SlotOccupied { .. }) => {}
                        Err(other) => panic!("unexpected error: {other}"),
                    }
                }
                parked
            })
        })
        .collect();

    let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(total, 4);

    let registrations: Vec<String> = shared
        .list_all()
        .iter()
        .filter_map(|slot| slot.occupant().map(|car| car.registration.clone()))
        .collect();
    let unique: HashSet<&String> = registrations.iter().collect();
    assert_eq!(registrations.len(), 4);
    assert_eq!(unique.len(), 4);
    assert_eq!(shared.occupancy().visitor_occupied, 4);
}

#[test]
fn test_readers_see_whole_mutations() {
    let shared = SharedCarPark::new(CarPark::with_counts(1, 0, FeeSchedule::default()));

    let writer = {
        let shared = shared.clone();
        thread::spawn(move || {
            for _ in 0..200 {
                shared
                    .park("S01", "W1000", "Wes", SlotKind::Staff, Utc::now())
                    .unwrap();
                shared.remove("W1000").unwrap();
            }
        })
    };

    for _ in 0..200 {
        shared.with_view(|car_park| {
            let occupancy = car_park.occupancy();
            let by_lookup = car_park.registry().find_by_car_registration("W1000").is_ok();
            assert_eq!(occupancy.staff_occupied == 1, by_lookup);
        });
    }

    writer.join().unwrap();
    assert!(matches!(
        shared.find("W1000", Utc::now()),
        Err(ParkingError::CarNotFound { .. })
    ));
}
