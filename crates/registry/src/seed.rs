//! Initial slot sets.

use std::{fs, path::Path};

use eyre::{Result, WrapErr};
use serde::Deserialize;
use slotbook_core::models::slot::{Slot, SlotId};
use tracing::info;

use crate::SlotRegistry;

/// The built-in slot list used when no seed file is configured.
pub fn default_slots() -> Vec<Slot> {
    [
        (1, "2023-09-15", "10:00 AM"),
        (2, "2023-09-15", "11:00 AM"),
        (3, "2023-09-14", "10:00 AM"),
        (4, "2023-09-13", "10:00 AM"),
        (5, "2023-09-12", "10:00 AM"),
        (6, "2023-09-11", "10:00 AM"),
        (7, "2023-09-10", "10:00 AM"),
        (8, "2023-09-09", "10:00 AM"),
        (9, "2023-09-08", "10:00 AM"),
        (10, "2023-09-07", "10:00 AM"),
        (11, "2023-09-06", "10:00 AM"),
    ]
    .into_iter()
    .map(|(id, date, time)| Slot::new(id, date, time))
    .collect()
}

#[derive(Debug, Deserialize)]
struct SeedSlot {
    id: SlotId,
    date: String,
    time: String,
    #[serde(default = "default_available")]
    available: bool,
}

fn default_available() -> bool {
    true
}

impl From<SeedSlot> for Slot {
    fn from(seed: SeedSlot) -> Self {
        Slot {
            id: seed.id,
            date: seed.date,
            time: seed.time,
            available: seed.available,
        }
    }
}

/// Parses a JSON array of slots. `available` defaults to `true`.
pub fn parse_slots(json: &str) -> Result<Vec<Slot>> {
    let seeds: Vec<SeedSlot> = serde_json::from_str(json).wrap_err("Invalid slot seed JSON")?;

    Ok(seeds.into_iter().map(Slot::from).collect())
}

pub fn load_slots(path: impl AsRef<Path>) -> Result<Vec<Slot>> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read slot seed file {}", path.display()))?;

    parse_slots(&json).wrap_err_with(|| format!("Failed to load slots from {}", path.display()))
}

/// Builds the registry from `path` if given, otherwise from [`default_slots`].
pub fn build_registry(path: Option<&Path>) -> Result<SlotRegistry> {
    let slots = match path {
        Some(path) => load_slots(path)?,
        None => default_slots(),
    };

    let registry = SlotRegistry::new(slots)?;
    info!("Loaded {} appointment slots", registry.len());

    Ok(registry)
}
