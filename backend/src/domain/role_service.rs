//! Role registry service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use pagination::{Page, PageRequest};

use crate::domain::ports::{RoleRegistry, RoleRepository, RoleRepositoryError};
use crate::domain::{DomainError, Role, RoleId, RoleName};

/// Role service implementing [`RoleRegistry`].
pub struct RoleService<R> {
    roles: Arc<R>,
}

impl<R> RoleService<R> {
    /// Create a service over `roles`.
    pub fn new(roles: Arc<R>) -> Self {
        Self { roles }
    }
}

pub(crate) fn map_role_error(error: RoleRepositoryError) -> DomainError {
    match error {
        RoleRepositoryError::DuplicateName { .. } => {
            DomainError::invalid_request("Role name is already in use")
        }
        RoleRepositoryError::Connection { message } => {
            DomainError::internal(format!("role repository unavailable: {message}"))
        }
        RoleRepositoryError::Query { message } => {
            DomainError::internal(format!("role repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R> RoleRegistry for RoleService<R>
where
    R: RoleRepository,
{
    async fn create(&self, name: RoleName) -> Result<Role, DomainError> {
        let role = Role {
            id: RoleId::random(),
            name,
            created_at: Utc::now(),
        };
        self.roles.insert(&role).await.map_err(map_role_error)?;
        Ok(role)
    }

    async fn find_by_name(&self, name: &RoleName) -> Result<Option<Role>, DomainError> {
        self.roles.find_by_name(name).await.map_err(map_role_error)
    }

    async fn list(&self, page: PageRequest) -> Result<Page<Role>, DomainError> {
        self.roles.list(page).await.map_err(map_role_error)
    }
}
