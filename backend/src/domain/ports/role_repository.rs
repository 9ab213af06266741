//! Port abstraction for role persistence.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Role, RoleId, RoleName};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by role repository adapters.
    pub enum RoleRepositoryError {
        /// Repository connection could not be established.
        Connection {
            /// Adapter-supplied detail.
            message: String,
        } => "role repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query {
            /// Adapter-supplied detail.
            message: String,
        } => "role repository query failed: {message}",
        /// A role with the same name already exists.
        DuplicateName {
            /// The name already taken.
            name: String,
        } => "role name already in use: {name}",
    }
}

/// Storage for named roles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Insert a new role.
    ///
    /// Fails with [`RoleRepositoryError::DuplicateName`] when the name is
    /// taken.
    async fn insert(&self, role: &Role) -> Result<(), RoleRepositoryError>;

    /// Return the role called `name`, creating it from `candidate` when absent.
    ///
    /// Concurrent callers racing to create the same name all observe the
    /// single stored row.
    async fn ensure(&self, candidate: &Role) -> Result<Role, RoleRepositoryError>;

    /// Fetch a role by identifier.
    async fn find_by_id(&self, id: &RoleId) -> Result<Option<Role>, RoleRepositoryError>;

    /// Fetch a role by exact name.
    async fn find_by_name(&self, name: &RoleName) -> Result<Option<Role>, RoleRepositoryError>;

    /// List roles in creation order.
    async fn list(&self, page: PageRequest) -> Result<Page<Role>, RoleRepositoryError>;
}
