//! Domain models for the fee tracker backend.

pub mod admin;
pub mod mark;
pub mod period;
pub mod student;

pub use admin::Admin;
pub use mark::Mark;
pub use period::{BillingCalendar, Period};
pub use student::{FeeStatus, Student, StudentProfile};
