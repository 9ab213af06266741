//! PostgreSQL-backed [`MemberRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};

use crate::domain::ports::{MemberRepository, MemberRepositoryError};
use crate::domain::{CommunityId, Member, MemberId, MemberView};

use super::diesel_error_mapping::{StoreFailure, from_sql_count, to_sql_count};
use super::models::{MemberRow, MemberWithRefs, NewMemberRow, member_view};
use super::pool::DbPool;
use super::schema::{members, roles, users};

const PAIR_CONSTRAINT: &str = "members_user_community_key";

/// Diesel implementation of the member repository port.
#[derive(Clone)]
pub struct DieselMemberRepository {
    pool: DbPool,
}

impl DieselMemberRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: impl Into<StoreFailure>) -> MemberRepositoryError {
    match failure.into() {
        StoreFailure::Connection(message) => MemberRepositoryError::connection(message),
        failure if failure.violates(PAIR_CONSTRAINT) => MemberRepositoryError::DuplicateMember,
        StoreFailure::ForeignKeyViolation => MemberRepositoryError::MissingReference,
        other => MemberRepositoryError::query(other.into_message()),
    }
}

#[async_trait]
impl MemberRepository for DieselMemberRepository {
    async fn insert(&self, member: &Member) -> Result<(), MemberRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        diesel::insert_into(members::table)
            .values(NewMemberRow::from(member))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_failure)
    }

    async fn delete(&self, id: &MemberId) -> Result<bool, MemberRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let affected = diesel::delete(members::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_failure)?;
        Ok(affected > 0)
    }

    async fn list_by_community(
        &self,
        community: &CommunityId,
        page: PageRequest,
    ) -> Result<Page<MemberView>, MemberRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let community_id = *community.as_uuid();

        let rows: Vec<MemberWithRefs> = members::table
            .inner_join(users::table)
            .inner_join(roles::table)
            .filter(members::community_id.eq(community_id))
            .order((members::created_at.asc(), members::id.asc()))
            .offset(to_sql_count(page.offset()))
            .limit(i64::from(page.limit()))
            .select((
                MemberRow::as_select(),
                (users::id, users::name),
                (roles::id, roles::name),
            ))
            .load(&mut conn)
            .await
            .map_err(map_failure)?;
        let total: i64 = members::table
            .filter(members::community_id.eq(community_id))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_failure)?;

        let items = rows
            .into_iter()
            .map(|row| member_view(row).map_err(map_failure))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, from_sql_count(total)))
    }
}
