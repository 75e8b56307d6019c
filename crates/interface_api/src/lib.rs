//! HTTP API Layer
//!
//! This crate provides the REST API for the hotel point-of-sale system using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for each resource
//! - **Middleware**: Authentication, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent JSON error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState, config::AppConfig};
//! use infra_db::Storage;
//!
//! let config = AppConfig::load()?;
//! let storage = Storage::open(config.storage.backend, &config.database_config()).await?;
//! let app = create_router(AppState::new(storage, config));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
    middleware as axum_middleware,
};
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use core_kernel::{Clock, SystemClock};
use domain_billing::BillingEngine;
use domain_identity::IdentityService;
use domain_rooms::RoomCatalog;
use infra_db::Storage;

use crate::config::AppConfig;
use crate::middleware::{auth_middleware, audit_middleware};
use crate::handlers::{auth as auth_handlers, bills, health, reports, rooms, users};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub rooms: RoomCatalog,
    pub billing: BillingEngine,
    pub identity: IdentityService,
    pub storage: Storage,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Wires the services over the given storage with the wall clock
    pub fn new(storage: Storage, config: AppConfig) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock::new(config.billing.timezone));
        Self::with_clock(storage, config, clock)
    }

    /// Same as [`AppState::new`] with an explicit clock
    pub fn with_clock(storage: Storage, config: AppConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            rooms: RoomCatalog::new(storage.rooms.clone(), clock.clone()),
            billing: BillingEngine::new(
                storage.bills.clone(),
                storage.rooms.clone(),
                clock.clone(),
                config.billing_config(),
            ),
            identity: IdentityService::new(storage.users.clone(), clock, config.identity_config()),
            storage,
            config: Arc::new(config),
        }
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Services, storage and configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/api/v1/auth/login", post(auth_handlers::login));

    let auth_routes = Router::new()
        .route("/me", get(auth_handlers::current_user))
        .route("/password", put(auth_handlers::change_password));

    let room_routes = Router::new()
        .route("/", get(rooms::list_rooms).post(rooms::create_room))
        .route(
            "/:id",
            get(rooms::get_room)
                .put(rooms::update_room)
                .delete(rooms::deactivate_room),
        )
        .route("/:id/availability", get(rooms::check_availability));

    let bill_routes = Router::new()
        .route("/", get(bills::list_bills).post(bills::create_bill))
        .route("/number", post(bills::generate_bill_number))
        .route("/:id", get(bills::get_bill))
        .route("/:id/print", get(bills::print_bill));

    let report_routes = Router::new()
        .route("/revenue", get(reports::revenue_summary));

    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/:id", axum::routing::delete(users::remove_cashier));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/rooms", room_routes)
        .nest("/bills", bill_routes)
        .nest("/reports", report_routes)
        .nest("/users", user_routes)
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
