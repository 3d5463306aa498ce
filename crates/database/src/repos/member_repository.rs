//! Repository for member data access operations.

use super::acquire;
use crate::entities::{Member, NewMember};
use crate::types::{DatabaseError, DatabaseResult};
use sqlx::SqlitePool;
use tracing::info;

pub const MEMBER_NOT_FOUND: &str = "Member not found";

/// Repository for member database operations
#[derive(Clone)]
pub struct MemberRepository {
    pool: SqlitePool,
}

impl MemberRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a member and return it with the id the store assigned
    pub async fn create(&self, member: NewMember) -> DatabaseResult<Member> {
        let mut conn = acquire(&self.pool).await?;

        let result = sqlx::query("INSERT INTO members (name, email) VALUES (?, ?)")
            .bind(&member.name)
            .bind(&member.email)
            .execute(&mut *conn)
            .await?;

        let member_id = result.last_insert_rowid();
        info!(member_id, "created member");

        Ok(member.into_member(member_id))
    }

    pub async fn list(&self) -> DatabaseResult<Vec<Member>> {
        let mut conn = acquire(&self.pool).await?;

        let members =
            sqlx::query_as::<_, Member>("SELECT id, name, email FROM members ORDER BY id ASC")
                .fetch_all(&mut *conn)
                .await?;

        Ok(members)
    }

    /// Delete a member after confirming it exists.
    ///
    /// The existence check and the delete run on the same connection but are
    /// separate statements; there is no surrounding transaction.
    pub async fn delete(&self, id: i64) -> DatabaseResult<()> {
        let mut conn = acquire(&self.pool).await?;

        let existing = sqlx::query_scalar::<_, i64>("SELECT id FROM members WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        if existing.is_none() {
            return Err(DatabaseError::not_found(MEMBER_NOT_FOUND));
        }

        sqlx::query("DELETE FROM members WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        info!(member_id = id, "deleted member");
        Ok(())
    }
}
