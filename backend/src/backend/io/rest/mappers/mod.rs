//! DTO mappers for the REST boundary.
//!
//! Handlers never hand domain models to serde directly; these mappers
//! convert between the `shared` crate's DTOs and the domain types.

pub mod admin_mapper;
pub mod student_mapper;

pub use admin_mapper::AdminMapper;
pub use student_mapper::StudentMapper;
