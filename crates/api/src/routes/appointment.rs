use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/", get(handlers::appointment::home))
        .route(
            "/book_appointment/",
            post(handlers::appointment::book_appointment),
        )
        .route(
            "/check_availability",
            get(handlers::appointment::check_availability),
        )
        .route(
            "/cancel_appointment/:appointment_id",
            post(handlers::appointment::cancel_appointment),
        )
        .route(
            "/list_appointments",
            get(handlers::appointment::list_appointments),
        )
}
