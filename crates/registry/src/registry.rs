use std::collections::HashSet;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use eyre::{Result, ensure};
use slotbook_core::{
    errors::{SlotError, SlotResult},
    models::slot::{Availability, Slot, SlotId},
};
use tracing::debug;

/// Owns the slot collection and serializes every state transition.
///
/// Lookups share a read lock. `book` and `cancel` hold the write lock across
/// the whole check-then-set, so two concurrent bookings of the same slot can
/// never both succeed.
#[derive(Debug)]
pub struct SlotRegistry {
    slots: RwLock<Vec<Slot>>,
}

impl SlotRegistry {
    /// Creates a registry over `slots`, kept in the given order.
    ///
    /// # Errors
    ///
    /// Fails if two slots share an id. Duplicate date/time pairs are allowed;
    /// lookups resolve them to the first one.
    pub fn new(slots: Vec<Slot>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(slots.len());
        for slot in &slots {
            ensure!(seen.insert(slot.id), "duplicate slot id {}", slot.id);
        }

        Ok(Self {
            slots: RwLock::new(slots),
        })
    }

    // A panic while holding the lock cannot leave a slot half-updated, so a
    // poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Slot>> {
        self.slots.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Slot>> {
        self.slots.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// First slot in insertion order matching `date` and `time`, booked or not.
    pub fn find_by_date_time(&self, date: &str, time: &str) -> SlotResult<Slot> {
        self.read()
            .iter()
            .find(|slot| slot.matches(date, time))
            .cloned()
            .ok_or(SlotError::NotFound)
    }

    pub fn find_by_id(&self, id: SlotId) -> SlotResult<Slot> {
        self.read()
            .iter()
            .find(|slot| slot.id == id)
            .cloned()
            .ok_or(SlotError::NotFound)
    }

    /// Books the slot at `date`/`time` and returns its id.
    pub fn book(&self, date: &str, time: &str) -> SlotResult<SlotId> {
        let mut slots = self.write();
        let slot = slots
            .iter_mut()
            .find(|slot| slot.matches(date, time))
            .ok_or(SlotError::NotFound)?;

        if !slot.available {
            return Err(SlotError::Unavailable);
        }

        slot.available = false;
        Ok(slot.id)
    }

    /// Releases a booked slot.
    ///
    /// An id that is unknown and an id whose slot is not booked both yield
    /// [`SlotError::NotFound`].
    pub fn cancel(&self, id: SlotId) -> SlotResult<()> {
        let mut slots = self.write();
        match slots.iter_mut().find(|slot| slot.id == id) {
            Some(slot) if !slot.available => {
                slot.available = true;
                Ok(())
            }
            Some(_) => {
                debug!(slot_id = id, "cancel requested for a slot that is not booked");
                Err(SlotError::NotFound)
            }
            None => Err(SlotError::NotFound),
        }
    }

    pub fn check_availability(&self, date: &str, time: &str) -> SlotResult<Availability> {
        let slot = self.find_by_date_time(date, time)?;

        Ok(if slot.available {
            Availability::Available
        } else {
            Availability::Unavailable
        })
    }

    /// Snapshot of every slot in insertion order.
    pub fn list_all(&self) -> Vec<Slot> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
