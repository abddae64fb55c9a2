//! # SlotBook API
//!
//! The API crate provides the web server for the SlotBook appointment service.
//! It exposes endpoints for booking, cancelling, checking and listing
//! appointment slots.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Validate input and drive the slot registry
//! - **Middleware**: Error mapping and per-client, per-route rate limiting
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework; slots live in an in-memory
//! [`SlotRegistry`].

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for error handling and rate limiting
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{net::SocketAddr, num::NonZeroU32, sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use eyre::{Result, WrapErr, eyre};
use slotbook_core::validation::DateTimeValidator;
use slotbook_registry::SlotRegistry;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use crate::middleware::rate_limit::{self, RateLimiter};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// The in-memory slot store
    pub registry: SlotRegistry,
    /// Date/time format checks applied before any registry lookup
    pub validator: DateTimeValidator,
    /// Per-client request quota
    pub limiter: RateLimiter,
}

impl ApiState {
    /// Builds the state from configuration and an already-seeded registry.
    ///
    /// # Errors
    ///
    /// Fails if the configured time pattern is not a valid regular expression
    /// or the rate limit is zero.
    pub fn new(config: &config::ApiConfig, registry: SlotRegistry) -> Result<Self> {
        let validator = DateTimeValidator::new(&config.time_pattern, config.date_format.as_str())
            .wrap_err("Invalid SLOT_TIME_PATTERN value")?;
        let limit = NonZeroU32::new(config.rate_limit_per_second)
            .ok_or_else(|| eyre!("RATE_LIMIT_PER_SECOND must be positive"))?;

        Ok(Self {
            registry,
            validator,
            limiter: RateLimiter::per_second(limit),
        })
    }
}

/// Builds the application router with rate limiting and request tracing.
///
/// The rate limiter covers the appointment routes only; `/health` and
/// `/version` stay reachable for monitoring regardless of client traffic.
pub fn app(state: Arc<ApiState>) -> Router {
    // Liveness, booking, cancellation and listing endpoints
    let appointments = routes::appointment::routes().layer(
        axum::middleware::from_fn_with_state(state.clone(), rate_limit::rate_limit),
    );

    Router::new()
        .merge(appointments)
        // Health check endpoints
        .merge(routes::health::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the API server with the provided configuration and slot registry
///
/// This function sets up logging, configures routes and middleware, spawns
/// the rate limiter cleanup task and serves HTTP until the listener fails.
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// let config = slotbook_api::config::ApiConfig::from_env()?;
/// let registry = slotbook_registry::seed::build_registry(config.seed_path.as_deref())?;
/// slotbook_api::start_server(config, registry).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, registry: SlotRegistry) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Create shared state with dependencies
    let state = Arc::new(ApiState::new(&config, registry)?);
    info!(
        slots = state.registry.len(),
        rate_limit = state.limiter.limit(),
        "Slot registry ready"
    );

    rate_limit::spawn_cleanup_task(
        state.clone(),
        Duration::from_secs(config.rate_limit_cleanup_interval),
    );

    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .wrap_err("Invalid API_CORS_ORIGINS value")?;

        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .allow_origin(origins);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        ServiceBuilder::new()
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout)))
            .into_inner(),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
