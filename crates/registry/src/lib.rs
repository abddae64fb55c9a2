//! # SlotBook Registry
//!
//! In-memory store of appointment slots. The slot set is fixed at start-up,
//! either from the built-in seed or a JSON seed file; afterwards only the
//! availability flag of each slot changes.

mod registry;
pub mod seed;

pub use registry::SlotRegistry;
