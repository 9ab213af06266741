//! PostgreSQL-backed [`RoleRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};

use crate::domain::ports::{RoleRepository, RoleRepositoryError};
use crate::domain::{Role, RoleId, RoleName};

use super::diesel_error_mapping::{StoreFailure, from_sql_count, to_sql_count};
use super::models::{NewRoleRow, RoleRow};
use super::pool::DbPool;
use super::schema::roles;

const NAME_CONSTRAINT: &str = "roles_name_key";

/// Diesel implementation of the role repository port.
#[derive(Clone)]
pub struct DieselRoleRepository {
    pool: DbPool,
}

impl DieselRoleRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: impl Into<StoreFailure>) -> RoleRepositoryError {
    match failure.into() {
        StoreFailure::Connection(message) => RoleRepositoryError::connection(message),
        other => RoleRepositoryError::query(other.into_message()),
    }
}

fn into_roles(rows: Vec<RoleRow>) -> Result<Vec<Role>, RoleRepositoryError> {
    rows.into_iter()
        .map(|row| Role::try_from(row).map_err(map_failure))
        .collect()
}

#[async_trait]
impl RoleRepository for DieselRoleRepository {
    async fn insert(&self, role: &Role) -> Result<(), RoleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        diesel::insert_into(roles::table)
            .values(NewRoleRow::from(role))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                let failure = StoreFailure::from(err);
                if failure.violates(NAME_CONSTRAINT) {
                    RoleRepositoryError::duplicate_name(role.name.as_str())
                } else {
                    map_failure(failure)
                }
            })
    }

    async fn ensure(&self, candidate: &Role) -> Result<Role, RoleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        diesel::insert_into(roles::table)
            .values(NewRoleRow::from(candidate))
            .on_conflict(roles::name)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_failure)?;
        let row: RoleRow = roles::table
            .filter(roles::name.eq(candidate.name.as_str()))
            .select(RoleRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_failure)?;
        Role::try_from(row).map_err(map_failure)
    }

    async fn find_by_id(&self, id: &RoleId) -> Result<Option<Role>, RoleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let row: Option<RoleRow> = roles::table
            .find(*id.as_uuid())
            .select(RoleRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_failure)?;
        row.map(Role::try_from).transpose().map_err(map_failure)
    }

    async fn find_by_name(&self, name: &RoleName) -> Result<Option<Role>, RoleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let row: Option<RoleRow> = roles::table
            .filter(roles::name.eq(name.as_str()))
            .select(RoleRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_failure)?;
        row.map(Role::try_from).transpose().map_err(map_failure)
    }

    async fn list(&self, page: PageRequest) -> Result<Page<Role>, RoleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let rows: Vec<RoleRow> = roles::table
            .order((roles::created_at.asc(), roles::id.asc()))
            .offset(to_sql_count(page.offset()))
            .limit(i64::from(page.limit()))
            .select(RoleRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_failure)?;
        let total: i64 = roles::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_failure)?;
        Ok(Page::new(into_roles(rows)?, from_sql_count(total)))
    }
}
