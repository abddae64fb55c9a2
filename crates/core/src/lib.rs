//! # SlotBook Core
//!
//! Shared domain types for the SlotBook appointment service: the slot model,
//! request/response payloads, error kinds and the date/time validator.

pub mod errors;
pub mod models;
pub mod validation;
