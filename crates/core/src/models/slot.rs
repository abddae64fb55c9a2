use serde::{Deserialize, Serialize};

pub type SlotId = u32;

/// A bookable appointment unit.
///
/// Only `available` ever changes after the slot is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    pub date: String,
    pub time: String,
    pub available: bool,
}

impl Slot {
    pub fn new(id: SlotId, date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            id,
            date: date.into(),
            time: time.into(),
            available: true,
        }
    }

    pub fn matches(&self, date: &str, time: &str) -> bool {
        self.date == date && self.time == time
    }
}

/// Outcome of an availability check on an existing slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    Unavailable,
}
