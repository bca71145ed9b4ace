//! # Storage Module
//!
//! Handles all data persistence operations for the fee tracker backend.
//!
//! This module abstracts away the specific storage implementation details and
//! provides a consistent interface for persisting and retrieving data. The
//! implementation can be swapped (flat files, SQL, cloud storage) without
//! affecting the domain logic or IO layers.
//!
//! ## Key Responsibilities
//!
//! - **Data Persistence**: Saving students, marks, and admins to disk
//! - **Data Retrieval**: Reading records back off disk on demand
//! - **Storage Abstraction**: A consistent API regardless of backend
//! - **Bulk Fee Reset**: The conditional sweep the fee ledger relies on
//! - **Write Safety**: Atomic replace-on-write for every record
//!
//! ## Current Implementation
//!
//! - **Primary Storage**: YAML/CSV files under a per-deployment data
//!   directory, one subdirectory per student
//! - **Future Flexibility**: Alternative backends can slot in behind
//!   the traits in [`traits`]
//!
//! ## Design Principles
//!
//! - **Repository Pattern**: Services never touch file paths themselves
//! - **Interface Segregation**: One narrow trait per kind of record
//! - **Dependency Inversion**: Domain depends on storage abstractions, not
//!   implementations
//! - **Testability**: Repositories run against temporary directories in tests

pub mod csv;
pub mod traits;

// Re-exports so callers never spell out the csv module path
pub use csv::{AdminRepository, CsvConnection, MarkRepository, StudentRepository};
pub use traits::{AdminStorage, Connection, MarkStorage, StudentStorage};
