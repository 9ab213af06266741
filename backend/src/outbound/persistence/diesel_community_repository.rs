//! PostgreSQL-backed [`CommunityRepository`].
//!
//! Community listings join `users` to resolve the owner's `{id, name}`. The
//! community row and its owner membership are written in one transaction.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use pagination::{Page, PageRequest};
use uuid::Uuid;

use crate::domain::ports::{CommunityRepository, CommunityRepositoryError};
use crate::domain::{Community, CommunityId, CommunityView, Member, UserId};

use super::diesel_error_mapping::{StoreFailure, from_sql_count, to_sql_count};
use super::models::{
    CommunityRow, CommunityWithOwner, NewCommunityRow, NewMemberRow, community_view,
};
use super::pool::DbPool;
use super::schema::{communities, members, users};

const SLUG_CONSTRAINT: &str = "communities_slug_key";

/// Diesel implementation of the community repository port.
#[derive(Clone)]
pub struct DieselCommunityRepository {
    pool: DbPool,
}

impl DieselCommunityRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Which communities a listing covers.
#[derive(Debug, Clone, Copy)]
enum Scope {
    All,
    OwnedBy(Uuid),
    MemberOf(Uuid),
}

fn map_failure(failure: impl Into<StoreFailure>) -> CommunityRepositoryError {
    match failure.into() {
        StoreFailure::Connection(message) => CommunityRepositoryError::connection(message),
        other => CommunityRepositoryError::query(other.into_message()),
    }
}

impl DieselCommunityRepository {
    async fn load_views(
        &self,
        scope: Scope,
        page: PageRequest,
    ) -> Result<Page<CommunityView>, CommunityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;

        let mut rows_query = communities::table
            .inner_join(users::table)
            .select((CommunityRow::as_select(), (users::id, users::name)))
            .order((communities::created_at.asc(), communities::id.asc()))
            .offset(to_sql_count(page.offset()))
            .limit(i64::from(page.limit()))
            .into_boxed();
        let mut count_query = communities::table.count().into_boxed();

        match scope {
            Scope::All => {}
            Scope::OwnedBy(owner) => {
                rows_query = rows_query.filter(communities::owner_id.eq(owner));
                count_query = count_query.filter(communities::owner_id.eq(owner));
            }
            Scope::MemberOf(user) => {
                let joined = || {
                    members::table
                        .filter(members::user_id.eq(user))
                        .select(members::community_id)
                };
                rows_query = rows_query.filter(communities::id.eq_any(joined()));
                count_query = count_query.filter(communities::id.eq_any(joined()));
            }
        }

        let rows: Vec<CommunityWithOwner> =
            rows_query.load(&mut conn).await.map_err(map_failure)?;
        let total: i64 = count_query
            .get_result(&mut conn)
            .await
            .map_err(map_failure)?;

        let items = rows
            .into_iter()
            .map(|row| community_view(row).map_err(map_failure))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, from_sql_count(total)))
    }
}

#[async_trait]
impl CommunityRepository for DieselCommunityRepository {
    async fn create_with_owner(
        &self,
        community: &Community,
        owner_membership: &Member,
    ) -> Result<(), CommunityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let community_row = NewCommunityRow::from(community);
        let member_row = NewMemberRow::from(owner_membership);

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::insert_into(communities::table)
                    .values(&community_row)
                    .execute(conn)
                    .await?;
                diesel::insert_into(members::table)
                    .values(&member_row)
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| {
            let failure = StoreFailure::from(err);
            if failure.violates(SLUG_CONSTRAINT) {
                CommunityRepositoryError::duplicate_slug(community.slug.as_str())
            } else if failure == StoreFailure::ForeignKeyViolation {
                CommunityRepositoryError::owner_missing()
            } else {
                map_failure(failure)
            }
        })
    }

    async fn find_by_id(
        &self,
        id: &CommunityId,
    ) -> Result<Option<Community>, CommunityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let row: Option<CommunityRow> = communities::table
            .find(*id.as_uuid())
            .select(CommunityRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_failure)?;
        row.map(Community::try_from)
            .transpose()
            .map_err(map_failure)
    }

    async fn list(
        &self,
        page: PageRequest,
    ) -> Result<Page<CommunityView>, CommunityRepositoryError> {
        self.load_views(Scope::All, page).await
    }

    async fn list_owned_by(
        &self,
        owner: &UserId,
        page: PageRequest,
    ) -> Result<Page<CommunityView>, CommunityRepositoryError> {
        self.load_views(Scope::OwnedBy(*owner.as_uuid()), page)
            .await
    }

    async fn list_member_of(
        &self,
        user: &UserId,
        page: PageRequest,
    ) -> Result<Page<CommunityView>, CommunityRepositoryError> {
        self.load_views(Scope::MemberOf(*user.as_uuid()), page)
            .await
    }
}
