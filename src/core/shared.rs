use crate::core::engine::CarPark;
use crate::domain::model::{CarLocation, Occupancy, ParkReceipt, Slot, SlotKind};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// [`CarPark`] behind a single lock for callers on several threads.
///
/// Mutations hold the write lock for their whole check-then-write sequence;
/// lookups share the read lock.
#[derive(Debug, Clone, Default)]
pub struct SharedCarPark {
    inner: Arc<RwLock<CarPark>>,
}

impl SharedCarPark {
    pub fn new(car_park: CarPark) -> Self {
        Self {
            inner: Arc::new(RwLock::new(car_park)),
        }
    }

    // The engine validates before it writes, so a panicking holder never
    // leaves a half-applied change behind.
    fn read(&self) -> RwLockReadGuard<'_, CarPark> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CarPark> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_slot(&self, id: &str, kind: SlotKind) -> Result<()> {
        self.write().add_slot(id, kind)
    }

    pub fn remove_slot(&self, id: &str) -> Result<()> {
        self.write().remove_slot(id)
    }

    pub fn remove_all_unoccupied(&self) -> usize {
        self.write().remove_all_unoccupied()
    }

    /// Snapshot of every slot taken under one read lock.
    pub fn list_all(&self) -> Vec<Slot> {
        self.read().list_all().cloned().collect()
    }

    pub fn find_slot(&self, id: &str) -> Result<Slot> {
        self.read().registry().find_by_id(id).cloned()
    }

    pub fn park(
        &self,
        slot_id: &str,
        registration: &str,
        owner_name: &str,
        owner_kind: SlotKind,
        now: DateTime<Utc>,
    ) -> Result<ParkReceipt> {
        self.write()
            .park(slot_id, registration, owner_name, owner_kind, now)
    }

    pub fn remove(&self, registration: &str) -> Result<String> {
        self.write().remove(registration)
    }

    pub fn find(&self, registration: &str, now: DateTime<Utc>) -> Result<CarLocation> {
        self.read().find(registration, now)
    }

    pub fn occupancy(&self) -> Occupancy {
        self.read().occupancy()
    }

    /// Runs `f` against a consistent view of the whole car park.
    pub fn with_view<T>(&self, f: impl FnOnce(&CarPark) -> T) -> T {
        f(&self.read())
    }
}
