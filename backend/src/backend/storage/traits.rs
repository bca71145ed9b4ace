//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use async_trait::async_trait;

use crate::backend::domain::models::admin::Admin;
use crate::backend::domain::models::mark::Mark;
use crate::backend::domain::models::period::Period;
use crate::backend::domain::models::student::Student;

/// Trait defining the interface for student storage operations
///
/// This trait abstracts away the specific storage implementation details,
/// allowing the domain layer to work with different storage backends
/// (flat files, SQL databases, etc.) without modification.
#[async_trait]
pub trait StudentStorage: Send + Sync {
    /// Store a new student
    async fn store_student(&self, student: &Student) -> Result<()>;

    /// Retrieve a specific student by ID
    async fn get_student(&self, student_id: &str) -> Result<Option<Student>>;

    /// Retrieve a specific student by index number
    async fn get_student_by_index(&self, index: &str) -> Result<Option<Student>>;

    /// List all students ordered by index number
    async fn list_students(&self) -> Result<Vec<Student>>;

    /// Update an existing student
    async fn update_student(&self, student: &Student) -> Result<()>;

    /// Delete a student by ID, along with their marks
    async fn delete_student(&self, student_id: &str) -> Result<()>;

    /// Downgrade every student whose fee status is PAID but whose recorded
    /// paid period differs from `current_period`. The predicate is checked
    /// per record against freshly read state, so a student paid for
    /// `current_period` after the sweep began is left alone.
    /// Returns the number of students whose status changed.
    async fn reset_overdue_fee_statuses(&self, current_period: Period) -> Result<usize>;
}

/// Trait defining the interface for mark storage operations
#[async_trait]
pub trait MarkStorage: Send + Sync {
    /// Append a mark to a student's record
    async fn append_mark(&self, index: &str, mark: &Mark) -> Result<()>;

    /// List all marks for a student, oldest first
    async fn list_marks(&self, index: &str) -> Result<Vec<Mark>>;
}

/// Trait defining the interface for admin storage operations
#[async_trait]
pub trait AdminStorage: Send + Sync {
    /// Find an admin by mobile number
    async fn find_admin_by_mobile(&self, mobile: &str) -> Result<Option<Admin>>;

    /// Store a new admin
    async fn store_admin(&self, admin: &Admin) -> Result<()>;
}

/// Trait defining the interface for storage connections
///
/// This trait abstracts away the specific connection type (flat files, a
/// database, etc.) and provides factory methods for creating repositories.
/// The fee ledger is generic over it, so it can run against any backend
/// without knowing the implementation details.
pub trait Connection: Send + Sync + Clone {
    /// The type of StudentStorage this connection creates
    type StudentRepository: StudentStorage + Clone;

    /// Create a new student repository for this connection
    fn create_student_repository(&self) -> Self::StudentRepository;
}
