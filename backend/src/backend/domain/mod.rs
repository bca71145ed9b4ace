//! # Domain Module
//!
//! Contains all business logic for the fee tracker application.
//!
//! The services and entities here define how students, fees, and marks
//! are modeled and managed. Nothing in this module knows about HTTP or
//! about where the records land on disk.
//!
//! ## Module Organization
//!
//! - **student_service**: Student registration, lookups, profile updates, and mark entry
//! - **fee_service**: Fee settlement lifecycle and the period reconciliation sweep
//! - **payment_service**: Mock payment gateway and the fee payment flow
//! - **admin_service**: Admin accounts and the mock login flow
//! - **commands**: Internal command and result types consumed by the services
//! - **models**: Domain entities (Student, Mark, Admin, Period)
//!
//! ## Key Responsibilities
//!
//! - **Student Management**: Registering students and maintaining their records
//! - **Fee Lifecycle**: Settling billing periods and resetting stale PAID statuses
//! - **Mark Recording**: Appending exam marks to a student's file
//! - **Business Rule Enforcement**: Validating input data before it reaches storage
//!
//! ## Business Rules
//!
//! - Index numbers are unique and immutable; they key the store and the login
//! - New students start UNPAID with no settled period on record
//! - A student is current exactly when PAID and settled for the present period
//! - Reconciliation flips stale PAID records to UNPAID but never erases the
//!   last settled period
//! - Marks carry a score between 0 and 100
//!
//! ## Design Principles
//!
//! - **Single Responsibility**: One service per area of the system
//! - **Testability**: Services run against any directory, including temp dirs
//! - **Transport Agnostic**: Business logic separate from the REST surface

pub mod admin_service;
pub mod commands;
pub mod fee_service;
pub mod models;
pub mod payment_service;
pub mod student_service;

pub use admin_service::*;
pub use fee_service::*;
pub use payment_service::*;
pub use student_service::*;
pub use commands::*;
