//! # IO Module
//!
//! The interface layer between HTTP clients and the domain services.
//!
//! Requests from the three client surfaces (admin dashboard, student
//! portal, payment page) land here, get translated into domain commands,
//! and leave again as JSON DTOs from the `shared` crate. Nothing below
//! this module knows it is being driven over HTTP.
//!
//! ## Key Responsibilities
//!
//! - **Endpoints**: The REST routes for student records, fees, marks, and logins
//! - **Translation**: Shared DTOs in, domain commands out, and back again
//! - **Status Mapping**: Domain failures become 400/401/404/500 responses
//! - **Authorization**: The admin bearer token is checked here and nowhere else
//! - **CORS**: Browser clients on a different origin are let through explicitly
//!
//! ## Current Implementation
//!
//! - **Web Framework**: Axum handlers wired to services through `AppState`
//! - **Serialization**: Serde on the `shared` crate's request/response types
//! - **Guarding**: Admin routes wrapped by middleware, applied per route group
//!
//! ## Design Patterns
//!
//! - **One handler per endpoint**: Each route maps to a single async fn
//! - **Mappers at the edge**: Domain models never serialize directly
//! - **State injection**: Services arrive via the Axum `State` extractor

pub mod rest;

pub use rest::*;
