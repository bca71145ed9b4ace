//! # REST API Interface Layer
//!
//! The HTTP endpoints for the fee tracker, split by surface:
//! - `admin_apis`: login, student management, fee overrides, marks, and
//!   the on-demand reconciliation sweep
//! - `student_apis`: index-number login and profile editing
//! - `payment_apis`: the mock fee payment flow
//!
//! ## Key Responsibilities
//!
//! - **Routing targets**: The handler functions the router in
//!   [`crate::backend`] points at
//! - **Status codes**: Each handler decides how a domain error surfaces
//! - **Token policy**: `auth` holds the admin bearer token and its guard
//! - **Request logging**: Every handler logs method, path, and payload
//!
//! ## Design Principles
//!
//! - **Thin handlers**: Validate, delegate, translate, nothing else
//! - **Explicit errors**: Failure bodies carry the domain message
//! - **No business logic**: Rules live in the services, not here

// Module declarations
pub mod admin_apis;
pub mod auth;
pub mod mappers;
pub mod payment_apis;
pub mod student_apis;

pub use admin_apis::*;
pub use auth::*;
pub use payment_apis::*;
pub use student_apis::*;
