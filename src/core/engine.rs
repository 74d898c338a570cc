use crate::core::fee::{self, FeeSchedule};
use crate::core::registry::SlotRegistry;
use crate::domain::model::{Car, CarLocation, Occupancy, ParkReceipt, Slot, SlotKind};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ParkingError, Result};
use chrono::{DateTime, Utc};

/// Parking rules and pricing on top of a [`SlotRegistry`].
///
/// Every operation runs to completion against in-memory state and reports
/// rule violations as [`ParkingError`]s; nothing here prints or formats.
#[derive(Debug, Clone, Default)]
pub struct CarPark {
    registry: SlotRegistry,
    fees: FeeSchedule,
}

impl CarPark {
    pub fn new(registry: SlotRegistry, fees: FeeSchedule) -> Self {
        Self { registry, fees }
    }

    pub fn with_counts(staff: usize, visitor: usize, fees: FeeSchedule) -> Self {
        Self::new(SlotRegistry::with_counts(staff, visitor), fees)
    }

    /// Builds from configuration; unknown counts seed no slots of that kind.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::with_counts(
            config.staff_slots().unwrap_or(0),
            config.visitor_slots().unwrap_or(0),
            config.fee_schedule(),
        )
    }

    pub fn registry(&self) -> &SlotRegistry {
        &self.registry
    }

    pub fn fee_schedule(&self) -> &FeeSchedule {
        &self.fees
    }

    pub fn add_slot(&mut self, id: &str, kind: SlotKind) -> Result<()> {
        self.registry.add_slot(id, kind)?;
        tracing::info!("Added {} slot {}", kind, id);
        Ok(())
    }

    pub fn remove_slot(&mut self, id: &str) -> Result<()> {
        let slot = self.registry.remove_slot(id)?;
        tracing::info!("Removed slot {}", slot.id());
        Ok(())
    }

    /// Returns the number of slots swept.
    pub fn remove_all_unoccupied(&mut self) -> usize {
        let removed = self.registry.remove_all_unoccupied();
        tracing::info!("Removed {} unoccupied slots", removed);
        removed
    }

    pub fn list_all(&self) -> std::slice::Iter<'_, Slot> {
        self.registry.iter()
    }

    pub fn park(
        &mut self,
        slot_id: &str,
        registration: &str,
        owner_name: &str,
        owner_kind: SlotKind,
        now: DateTime<Utc>,
    ) -> Result<ParkReceipt> {
        let slot = self.registry.find_by_id(slot_id)?;

        if slot.is_occupied() {
            tracing::debug!("Park rejected: slot {} occupied", slot.id());
            return Err(ParkingError::SlotOccupied {
                id: slot.id().to_string(),
            });
        }

        if slot.kind() != owner_kind {
            tracing::debug!(
                "Park rejected: {} owner for {} slot {}",
                owner_kind,
                slot.kind(),
                slot.id()
            );
            return Err(ParkingError::TypeMismatch {
                slot_id: slot.id().to_string(),
                slot_kind: slot.kind(),
                owner_kind,
            });
        }

        if let Ok(holder) = self.registry.find_by_car_registration(registration) {
            tracing::debug!(
                "Park rejected: {} already in slot {}",
                registration,
                holder.id()
            );
            return Err(ParkingError::DuplicateRegistration {
                registration: registration.to_string(),
                slot_id: holder.id().to_string(),
            });
        }

        let car = Car {
            registration: registration.to_string(),
            owner_name: owner_name.to_string(),
            kind: owner_kind,
            parked_at: now,
        };
        let slot = self.registry.occupy(slot_id, car)?;
        tracing::info!("Parked {} in slot {}", registration, slot.id());

        Ok(ParkReceipt {
            slot_id: slot.id().to_string(),
            parked_at: now,
        })
    }

    /// Takes the car out and returns the slot id it vacated.
    pub fn remove(&mut self, registration: &str) -> Result<String> {
        let (slot_id, car) = self.registry.vacate(registration)?;
        tracing::info!("Removed {} from slot {}", car.registration, slot_id);
        Ok(slot_id)
    }

    pub fn find(&self, registration: &str, now: DateTime<Utc>) -> Result<CarLocation> {
        let slot = self.registry.find_by_car_registration(registration)?;
        tracing::debug!("Found {} in slot {}", registration, slot.id());
        let car = slot.occupant().ok_or_else(|| ParkingError::CarNotFound {
            registration: registration.to_string(),
        })?;
        Ok(CarLocation {
            slot_id: slot.id().to_string(),
            registration: car.registration.clone(),
            owner_name: car.owner_name.clone(),
            parked_at: car.parked_at,
            elapsed: fee::elapsed(car.parked_at, now),
            fee: self.fees.fee(car.parked_at, now),
        })
    }

    /// Fee owed right now by whoever occupies `slot`, if anyone.
    pub fn fee_for(&self, slot: &Slot, now: DateTime<Utc>) -> Option<u64> {
        slot.occupant().map(|car| self.fees.fee(car.parked_at, now))
    }

    pub fn occupancy(&self) -> Occupancy {
        self.registry
            .iter()
            .fold(Occupancy::default(), |mut acc, slot| {
                let occupied = usize::from(slot.is_occupied());
                match slot.kind() {
                    SlotKind::Staff => {
                        acc.staff_total += 1;
                        acc.staff_occupied += occupied;
                    }
                    SlotKind::Visitor => {
                        acc.visitor_total += 1;
                        acc.visitor_occupied += occupied;
                    }
                }
                acc
            })
    }
}
