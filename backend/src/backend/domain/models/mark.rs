//! backend/src/backend/domain/models/mark.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single exam mark recorded for a student.
/// Marks are append-only; the recording date is stamped by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    pub term: String,
    pub subject: String,
    /// Score out of 100
    pub score: f64,
    pub date: DateTime<Utc>,
}
