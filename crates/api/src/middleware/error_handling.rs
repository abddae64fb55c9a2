//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and `{"message": ...}` bodies so
//! every endpoint reports failures the same way.
//!
//! An unavailable slot is reported as `404`, like a missing one; only the
//! message tells the two apart.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use slotbook_core::{
    errors::{SlotError, ValidationError},
    models::appointment::MessageResponse,
};

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use slotbook_api::middleware::error_handling::AppError;
/// use slotbook_core::{errors::SlotError, models::appointment::MessageResponse};
///
/// async fn handler(found: bool) -> Result<Json<MessageResponse>, AppError> {
///     if !found {
///         return Err(AppError(SlotError::NotFound));
///     }
///     Ok(Json(MessageResponse::available()))
/// }
/// ```
#[derive(Debug)]
pub struct AppError(pub SlotError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            SlotError::Validation(_) => StatusCode::BAD_REQUEST,
            SlotError::NotFound | SlotError::Unavailable => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = MessageResponse::new(self.0.to_string());

        (status, Json(message)).into_response()
    }
}

/// Allows `?` on `SlotResult` inside handlers.
impl From<SlotError> for AppError {
    fn from(err: SlotError) -> Self {
        AppError(err)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError(err.into())
    }
}
