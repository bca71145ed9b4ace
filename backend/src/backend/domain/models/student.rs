//! backend/src/backend/domain/models/student.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::mark::Mark;
use super::period::Period;

/// Fee settlement state for the running billing period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeStatus {
    Paid,
    Unpaid,
}

impl FeeStatus {
    /// Wire/storage representation ("PAID" / "UNPAID").
    pub fn as_str(&self) -> &'static str {
        match self {
            FeeStatus::Paid => "PAID",
            FeeStatus::Unpaid => "UNPAID",
        }
    }

    /// Parse the representation used by the admin surface and the store.
    /// Returns None for anything outside {"PAID", "UNPAID"}.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PAID" => Some(FeeStatus::Paid),
            "UNPAID" => Some(FeeStatus::Unpaid),
            _ => None,
        }
    }
}

impl std::fmt::Display for FeeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Domain model representing a student in the system.
/// Carries the full record: identity, enrolment details, the editable
/// profile fields, and the fee ledger fields owned by the fee service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    /// Unique index number; login and payment key
    pub index: String,
    pub name: String,
    pub school: String,
    pub badge: String,
    pub grade: String,
    /// Examination stream: "OL" or "AL"
    pub exam_type: String,
    pub description: String,
    pub email: Option<String>,
    pub about_me: Option<String>,
    pub fee_status: FeeStatus,
    /// Period the fee was last paid in; None until the first payment
    pub last_paid_period: Option<Period>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    /// Generate a unique ID for a student
    pub fn generate_id(timestamp_millis: u64) -> String {
        format!("student::{}", timestamp_millis)
    }

    /// Whether the fee for the given period is settled.
    pub fn is_paid_for(&self, period: Period) -> bool {
        self.fee_status == FeeStatus::Paid && self.last_paid_period == Some(period)
    }
}

/// A student together with their recorded marks. Marks live in a separate
/// store, so this is assembled by the service layer for responses that
/// need both.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentProfile {
    pub student: Student,
    pub marks: Vec<Mark>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_status_parse_accepts_known_values() {
        assert_eq!(FeeStatus::parse("PAID"), Some(FeeStatus::Paid));
        assert_eq!(FeeStatus::parse("UNPAID"), Some(FeeStatus::Unpaid));
    }

    #[test]
    fn test_fee_status_parse_rejects_unknown_values() {
        assert_eq!(FeeStatus::parse("paid"), None);
        assert_eq!(FeeStatus::parse("BOGUS"), None);
        assert_eq!(FeeStatus::parse(""), None);
    }

    #[test]
    fn test_fee_status_round_trips_through_as_str() {
        for status in [FeeStatus::Paid, FeeStatus::Unpaid] {
            assert_eq!(FeeStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_generate_id_format() {
        assert_eq!(Student::generate_id(1700000000000), "student::1700000000000");
    }
}
