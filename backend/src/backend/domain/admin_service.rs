//! Admin account service.
//!
//! Implements the mock login flow: an admin signs in with a mobile
//! number alone, and an account is created on first sight of a new
//! number. Token issuance is an IO-layer concern and does not live here.

use anyhow::Result;
use chrono::Utc;
use log::info;
use std::sync::Arc;

use crate::backend::domain::commands::admins::{LoginAdminCommand, LoginAdminResult};
use crate::backend::domain::models::Admin;
use crate::backend::storage::{AdminRepository, AdminStorage, CsvConnection};

/// Service for admin accounts
#[derive(Clone)]
pub struct AdminService {
    admin_repository: AdminRepository,
}

impl AdminService {
    /// Create a new AdminService
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        let admin_repository = AdminRepository::new(connection);
        Self { admin_repository }
    }

    /// Log an admin in by mobile number, creating the account if this is
    /// the first login with that number.
    pub async fn login_admin(&self, command: LoginAdminCommand) -> Result<LoginAdminResult> {
        let mobile = command.mobile.trim().to_string();

        if mobile.is_empty() {
            return Err(anyhow::anyhow!("Mobile number cannot be empty"));
        }

        info!("Admin login attempt: {}", mobile);

        if let Some(admin) = self.admin_repository.find_admin_by_mobile(&mobile).await? {
            info!("Admin login: existing account {}", admin.id);
            return Ok(LoginAdminResult { admin });
        }

        let now = Utc::now();
        let admin = Admin {
            id: Admin::generate_id(now.timestamp_millis() as u64),
            mobile,
            created_at: now,
        };

        self.admin_repository.store_admin(&admin).await?;

        info!("Admin login: created account {}", admin.id);

        Ok(LoginAdminResult { admin })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_service() -> (AdminService, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let connection = Arc::new(CsvConnection::new(temp_dir.path()).unwrap());
        (AdminService::new(connection), temp_dir)
    }

    #[tokio::test]
    async fn test_first_login_creates_account() {
        let (service, _temp) = setup_test_service();

        let result = service
            .login_admin(LoginAdminCommand {
                mobile: "0771234567".to_string(),
            })
            .await
            .expect("Failed to log in");

        assert_eq!(result.admin.mobile, "0771234567");
        assert!(result.admin.id.starts_with("admin::"));
    }

    #[tokio::test]
    async fn test_second_login_reuses_the_account() {
        let (service, _temp) = setup_test_service();

        let first = service
            .login_admin(LoginAdminCommand {
                mobile: "0771234567".to_string(),
            })
            .await
            .expect("Failed to log in");

        let second = service
            .login_admin(LoginAdminCommand {
                mobile: "0771234567".to_string(),
            })
            .await
            .expect("Failed to log in");

        assert_eq!(first.admin.id, second.admin.id);
        assert_eq!(first.admin.created_at, second.admin.created_at);
    }

    #[tokio::test]
    async fn test_login_trims_the_mobile_number() {
        let (service, _temp) = setup_test_service();

        let first = service
            .login_admin(LoginAdminCommand {
                mobile: "0771234567".to_string(),
            })
            .await
            .expect("Failed to log in");

        let second = service
            .login_admin(LoginAdminCommand {
                mobile: "  0771234567  ".to_string(),
            })
            .await
            .expect("Failed to log in");

        assert_eq!(first.admin.id, second.admin.id);
    }

    #[tokio::test]
    async fn test_login_rejects_empty_mobile() {
        let (service, _temp) = setup_test_service();

        let result = service
            .login_admin(LoginAdminCommand {
                mobile: "   ".to_string(),
            })
            .await;

        assert!(result.is_err());
    }
}
