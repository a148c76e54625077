//! PostgreSQL implementation of LikeRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use blog_core::entities::Like;
use blog_core::error::DomainError;
use blog_core::traits::{LikeRepository, RepoResult};
use blog_core::value_objects::{LikeId, PostId, UserId};

use crate::models::LikeModel;

use super::error::{is_foreign_key_violation, map_db_error, map_unique_violation};

/// PostgreSQL implementation of LikeRepository.
///
/// Uniqueness of (post_id, user_id) is enforced by the `likes_post_user_unique`
/// constraint; a losing insert surfaces as `DomainError::DuplicateKey`.
#[derive(Clone)]
pub struct PgLikeRepository {
    pool: PgPool,
}

impl PgLikeRepository {
    /// Create a new PgLikeRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeRepository for PgLikeRepository {
    #[instrument(skip(self))]
    async fn find(&self, post_id: PostId, user_id: UserId) -> RepoResult<Option<Like>> {
        let result = sqlx::query_as::<_, LikeModel>(
            r"
            SELECT id, post_id, user_id, created_at
            FROM likes
            WHERE post_id = $1 AND user_id = $2
            ",
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Like::from))
    }

    #[instrument(skip(self), fields(post_id = %like.post_id, user_id = %like.user_id))]
    async fn create(&self, like: &Like) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO likes (id, post_id, user_id, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(like.id.into_inner())
        .bind(like.post_id.into_inner())
        .bind(like.user_id.into_inner())
        .bind(like.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                return DomainError::PostNotFound(like.post_id);
            }
            map_unique_violation(e, || DomainError::DuplicateKey {
                post_id: like.post_id,
                user_id: like.user_id,
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: LikeId) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM likes WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn count_by_post(&self, post_id: PostId) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM likes WHERE post_id = $1
            ",
        )
        .bind(post_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }
}
