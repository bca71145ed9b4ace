//! # CSV Storage Module
//!
//! File-based storage implementation for the fee tracker. Students are kept
//! as one YAML document per student directory, with marks alongside in a
//! CSV file; admins live in a single flat CSV at the base directory.
//!
//! ## Layout
//!
//! ```text
//! <base>/admins.csv
//! <base>/students/<safe-index>/student.yaml
//! <base>/students/<safe-index>/marks.csv
//! ```
//!
//! All writes go through a temporary file followed by an atomic rename, so
//! readers never observe a half-written record and the reconciliation sweep
//! mutates one student at a time.

pub mod admin_repository;
pub mod connection;
pub mod mark_repository;
pub mod student_repository;

pub use admin_repository::AdminRepository;
pub use connection::CsvConnection;
pub use mark_repository::MarkRepository;
pub use student_repository::StudentRepository;
