//! # Backend Module
//!
//! Contains all non-UI logic for the fee tracker application.
//!
//! This is the orchestration layer tying together:
//! - **Domain**: Business rules for students, fees, and marks
//! - **Storage**: Persistence on the file system (YAML and CSV)
//! - **IO**: The REST surface built on top of the services
//!
//! The backend is frontend-agnostic; anything that can speak HTTP and
//! JSON can drive it, including curl.
//!
//! ## Architecture
//!
//! Three layers, each depending only on the one below:
//! ```text
//! Clients (web frontend, curl)
//!     ↓
//! IO Layer (REST API, handlers, auth)
//!     ↓
//! Domain Layer (services, business rules)
//!     ↓
//! Storage Layer (File system persistence)
//! ```
//!
//! ## Key Responsibilities
//!
//! - Build the application state with all services sharing one connection
//! - Assemble the REST router with CORS and the admin token guard
//! - Keep construction and wiring out of the individual layers

pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use log::info;
use tower_http::cors::{Any, CorsLayer};

use crate::backend::domain::models::BillingCalendar;
use crate::backend::domain::{AdminService, FeeLedgerService, PaymentService, StudentService};
use crate::backend::storage::CsvConnection;

pub use domain::*;
pub use io::*;
pub use storage::*;

/// Application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub student_service: StudentService,
    pub admin_service: AdminService,
    pub fee_service: FeeLedgerService<CsvConnection>,
    pub payment_service: PaymentService,
}

/// Build the services over the default data directory
pub async fn initialize_backend() -> Result<AppState> {
    info!("Setting up data directory");
    let connection = Arc::new(CsvConnection::new_default()?);

    info!("Setting up domain services");
    let calendar = BillingCalendar::monthly();
    let fee_service = FeeLedgerService::new(connection.clone(), calendar);
    let student_service = StudentService::new(connection.clone());
    let admin_service = AdminService::new(connection.clone());
    let payment_service = PaymentService::new(connection, fee_service.clone());

    info!("Setting up application state");
    let app_state = AppState {
        student_service,
        admin_service,
        fee_service,
        payment_service,
    };

    Ok(app_state)
}

/// Assemble the router for the three API surfaces
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow the frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:3000".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    // Admin routes sit behind the token guard; login stays open. The
    // guard only wraps routes registered before it.
    let admin_routes = Router::new()
        .route(
            "/students",
            get(io::list_students).post(io::create_student),
        )
        .route(
            "/students/:student_id",
            put(io::update_student).delete(io::delete_student),
        )
        .route("/students/:student_id/fee", put(io::set_fee_status))
        .route("/students/:student_id/marks", post(io::add_mark))
        .route("/fees/reconcile", post(io::reconcile_fees))
        .route_layer(middleware::from_fn(io::require_admin))
        .route("/login", post(io::login_admin));

    let student_routes = Router::new()
        .route("/login", post(io::student_login))
        .route("/:student_id/profile", put(io::update_profile));

    let payment_routes = Router::new().route("/fee", post(io::pay_fee));

    let api_routes = Router::new()
        .nest("/admin", admin_routes)
        .nest("/students", student_routes)
        .nest("/payments", payment_routes);

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
