use crate::domain::model::{Car, Slot, SlotKind};
use crate::utils::error::{ParkingError, Result};

/// Authoritative store of the facility's slots. Insertion order is kept;
/// display ordering is left to front ends.
#[derive(Debug, Clone, Default)]
pub struct SlotRegistry {
    slots: Vec<Slot>,
}

impl SlotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `S01..Snn` followed by `V01..Vnn`.
    pub fn with_counts(staff: usize, visitor: usize) -> Self {
        let mut slots = Vec::with_capacity(staff + visitor);
        for (kind, count) in [(SlotKind::Staff, staff), (SlotKind::Visitor, visitor)] {
            for n in 1..=count {
                slots.push(Slot::new(format!("{}{:02}", kind.id_prefix(), n), kind));
            }
        }
        tracing::debug!("Seeded {} staff and {} visitor slots", staff, visitor);
        Self { slots }
    }

    pub fn add_slot(&mut self, id: &str, kind: SlotKind) -> Result<()> {
        if self.position(id).is_some() {
            return Err(ParkingError::DuplicateSlotId { id: id.to_string() });
        }
        self.slots.push(Slot::new(id.to_string(), kind));
        Ok(())
    }

    pub fn remove_slot(&mut self, id: &str) -> Result<Slot> {
        let index = self.position(id).ok_or_else(|| ParkingError::SlotNotFound {
            id: id.to_string(),
        })?;
        if self.slots[index].is_occupied() {
            return Err(ParkingError::SlotOccupied {
                id: self.slots[index].id().to_string(),
            });
        }
        Ok(self.slots.remove(index))
    }

    /// Drops every empty slot and returns how many went.
    pub fn remove_all_unoccupied(&mut self) -> usize {
        let before = self.slots.len();
        self.slots.retain(Slot::is_occupied);
        before - self.slots.len()
    }

    pub fn find_by_id(&self, id: &str) -> Result<&Slot> {
        self.slots
            .iter()
            .find(|slot| slot.has_id(id))
            .ok_or_else(|| ParkingError::SlotNotFound { id: id.to_string() })
    }

    pub fn find_by_car_registration(&self, registration: &str) -> Result<&Slot> {
        self.slots
            .iter()
            .find(|slot| {
                slot.occupant()
                    .is_some_and(|car| car.matches_registration(registration))
            })
            .ok_or_else(|| ParkingError::CarNotFound {
                registration: registration.to_string(),
            })
    }

    /// All slots in insertion order. Call again to restart.
    pub fn iter(&self) -> std::slice::Iter<'_, Slot> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Seats `car` in slot `id`. Rule checks belong to the engine; this only
    /// refuses to overwrite an occupant.
    pub(crate) fn occupy(&mut self, id: &str, car: Car) -> Result<&Slot> {
        let slot = self
            .slots
            .iter_mut()
            .find(|slot| slot.has_id(id))
            .ok_or_else(|| ParkingError::SlotNotFound { id: id.to_string() })?;
        if slot.is_occupied() {
            return Err(ParkingError::SlotOccupied {
                id: slot.id().to_string(),
            });
        }
        slot.set_occupant(car);
        Ok(slot)
    }

    /// Empties the slot holding `registration`, returning the slot id and the car.
    pub(crate) fn vacate(&mut self, registration: &str) -> Result<(String, Car)> {
        self.slots
            .iter_mut()
            .find_map(|slot| {
                if slot
                    .occupant()
                    .is_some_and(|car| car.matches_registration(registration))
                {
                    let id = slot.id().to_string();
                    slot.take_occupant().map(|car| (id, car))
                } else {
                    None
                }
            })
            .ok_or_else(|| ParkingError::CarNotFound {
                registration: registration.to_string(),
            })
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.has_id(id))
    }
}

impl<'a> IntoIterator for &'a SlotRegistry {
    type Item = &'a Slot;
    type IntoIter = std::slice::Iter<'a, Slot>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
