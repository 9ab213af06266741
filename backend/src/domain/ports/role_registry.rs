//! Driving port for role management.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{DomainError, Role, RoleName};

/// Role use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleRegistry: Send + Sync {
    /// Create a role with a globally unique name.
    async fn create(&self, name: RoleName) -> Result<Role, DomainError>;

    /// Look a role up by exact name.
    async fn find_by_name(&self, name: &RoleName) -> Result<Option<Role>, DomainError>;

    /// List roles in creation order.
    async fn list(&self, page: PageRequest) -> Result<Page<Role>, DomainError>;
}
