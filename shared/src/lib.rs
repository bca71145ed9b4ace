use serde::{Deserialize, Serialize};
use std::fmt;

/// Student record as exposed over the REST boundary.
///
/// Dates are RFC 3339 strings; the domain layer owns the typed
/// representations and converts at the IO boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Student ID in format: "student::epoch_millis"
    pub id: String,
    /// Unique index number, used for student login and fee payment
    pub index: String,
    pub name: String,
    pub school: String,
    /// Badge/house the student belongs to
    pub badge: String,
    pub grade: String,
    /// Examination stream: "OL" or "AL"
    pub exam_type: String,
    /// Free-form description, empty when not provided
    pub description: String,
    /// Contact email, editable by the student
    pub email: Option<String>,
    /// Short bio, editable by the student
    pub about_me: Option<String>,
    /// Current fee settlement state for the running period
    pub fee_status: FeeStatus,
    /// Billing period (month index under the default calendar) in which
    /// the fee was last paid; None until the first payment
    pub last_paid_period: Option<u32>,
    /// Recorded exam marks, oldest first
    pub marks: Vec<Mark>,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    /// Last modification timestamp (RFC 3339)
    pub updated_at: String,
}

/// Fee settlement state for a billing period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeStatus {
    #[serde(rename = "PAID")]
    Paid,
    #[serde(rename = "UNPAID")]
    Unpaid,
}

impl fmt::Display for FeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeeStatus::Paid => write!(f, "PAID"),
            FeeStatus::Unpaid => write!(f, "UNPAID"),
        }
    }
}

/// A single exam mark entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    /// Term the exam was sat in (e.g. "Term 1")
    pub term: String,
    pub subject: String,
    /// Score out of 100
    pub score: f64,
    /// When the mark was recorded (RFC 3339)
    pub date: String,
}

/// Admin record returned by the login endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    /// Admin ID in format: "admin::epoch_millis"
    pub id: String,
    pub mobile: String,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminLoginRequest {
    pub mobile: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminLoginResponse {
    pub admin: Admin,
    /// Bearer token expected by the guarded admin endpoints
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateStudentRequest {
    pub index: String,
    pub name: String,
    pub school: String,
    pub badge: String,
    pub grade: String,
    /// "OL" or "AL"
    pub exam_type: String,
    /// Optional description, stored empty when not provided
    pub description: Option<String>,
}

/// Partial update: absent fields keep their current values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub school: Option<String>,
    pub badge: Option<String>,
    pub grade: Option<String>,
    pub exam_type: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentResponse {
    pub student: Student,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentListResponse {
    pub students: Vec<Student>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetFeeStatusRequest {
    /// Desired status: "PAID" or "UNPAID"
    pub fee_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddMarkRequest {
    pub term: String,
    pub subject: String,
    /// Score out of 100
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkListResponse {
    pub marks: Vec<Mark>,
    pub success_message: String,
}

/// Student login: the index number is the only credential
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentLoginRequest {
    pub index: String,
}

/// Student-editable profile fields; absent fields keep their values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub about_me: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayFeeRequest {
    /// Index number of the paying student
    pub index: String,
    /// Amount in the school's billing currency
    pub amount: f64,
}

/// Summary of the student after a successful payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaidStudentSummary {
    pub index: String,
    pub fee_status: FeeStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayFeeResponse {
    pub success: bool,
    pub message: String,
    pub transaction_id: String,
    pub student: PaidStudentSummary,
}

/// Result of an on-demand reconciliation sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileResponse {
    /// Number of students downgraded to UNPAID by this sweep
    pub reset_count: usize,
}

/// Generic message envelope for deletions and error bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
