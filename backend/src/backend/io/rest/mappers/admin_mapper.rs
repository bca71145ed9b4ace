//! backend/src/backend/io/rest/mappers/admin_mapper.rs

use crate::backend::domain::models::admin::Admin as DomainAdmin;
use shared::{Admin as SharedAdmin, AdminLoginResponse};

/// Mapper to convert domain Admin models to shared DTOs.
pub struct AdminMapper;

impl AdminMapper {
    /// Converts a domain Admin model to a shared Admin DTO.
    pub fn to_dto(domain: DomainAdmin) -> SharedAdmin {
        SharedAdmin {
            id: domain.id,
            mobile: domain.mobile,
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_login_response_dto(domain: DomainAdmin, token: &str) -> AdminLoginResponse {
        AdminLoginResponse {
            admin: Self::to_dto(domain),
            token: token.to_string(),
        }
    }
}
