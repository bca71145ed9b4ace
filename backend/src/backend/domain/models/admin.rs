//! backend/src/backend/domain/models/admin.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Domain model for an admin account.
/// Accounts are created implicitly on first login with a mobile number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    pub id: String,
    pub mobile: String,
    pub created_at: DateTime<Utc>,
}

impl Admin {
    /// Generate a unique ID for an admin
    pub fn generate_id(timestamp_millis: u64) -> String {
        format!("admin::{}", timestamp_millis)
    }
}
