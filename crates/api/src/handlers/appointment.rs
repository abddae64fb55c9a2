//! # Appointment Handlers
//!
//! Booking, cancellation, availability checks and listing over the shared
//! [`SlotRegistry`](slotbook_registry::SlotRegistry).
//!
//! Requests that carry a date and time are validated before the registry is
//! consulted; a malformed value never reaches a lookup.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use serde::Deserialize;
use slotbook_core::{
    errors::{SlotError, ValidationError},
    models::{
        appointment::{BookAppointmentRequest, MessageResponse, text_or_none},
        slot::{Availability, Slot, SlotId},
    },
};
use std::sync::Arc;
use tracing::{debug, info};

use crate::{ApiState, middleware::error_handling::AppError};

/// Query parameters for `GET /check_availability`
#[derive(Debug, Default, Deserialize)]
pub struct AvailabilityQuery {
    #[serde(default, deserialize_with = "text_or_none")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "text_or_none")]
    pub time: Option<String>,
}

/// Liveness message at `GET /`.
pub async fn home() -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello"))
}

/// Books the slot matching the requested date and time.
///
/// # Errors
///
/// * `SlotError::Validation` - Malformed date, time or request body
/// * `SlotError::NotFound` - No slot at that date and time
/// * `SlotError::Unavailable` - The slot is already booked
#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<BookAppointmentRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(payload) =
        payload.map_err(|rejection| ValidationError::Malformed(rejection.body_text()))?;
    let (date, time) = state
        .validator
        .validate(payload.date.as_deref(), payload.time.as_deref())?;

    let id = state.registry.book(date, time)?;
    info!(slot_id = id, date, time, "Appointment booked");

    Ok(Json(MessageResponse::booked(id)))
}

#[axum::debug_handler]
pub async fn check_availability(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<AvailabilityQuery>, QueryRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Query(query) =
        query.map_err(|rejection| ValidationError::Malformed(rejection.body_text()))?;
    let (date, time) = state
        .validator
        .validate(query.date.as_deref(), query.time.as_deref())?;

    match state.registry.check_availability(date, time)? {
        Availability::Available => Ok(Json(MessageResponse::available())),
        Availability::Unavailable => Err(AppError(SlotError::Unavailable)),
    }
}

/// Cancels a booked appointment by slot id.
///
/// A non-numeric id cannot name a slot and is reported as not found.
#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<ApiState>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id: SlotId = appointment_id.trim().parse().map_err(|_| {
        debug!(%appointment_id, "Cancel requested with non-numeric id");
        AppError(SlotError::NotFound)
    })?;

    state.registry.cancel(id)?;
    info!(slot_id = id, "Appointment canceled");

    Ok(Json(MessageResponse::canceled()))
}

pub async fn list_appointments(State(state): State<Arc<ApiState>>) -> Json<Vec<Slot>> {
    Json(state.registry.list_all())
}
