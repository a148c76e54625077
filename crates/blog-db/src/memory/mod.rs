//! In-memory store
//!
//! Implements every repository trait over `DashMap`s. The like table keeps the
//! same (post, user) uniqueness as the PostgreSQL constraint: inserts go
//! through the map's entry API, so two racing inserts for one pair cannot both
//! succeed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::mapref::one::Ref;
use dashmap::DashMap;
use tracing::instrument;

use blog_core::entities::{normalize_email, Comment, Like, Post, PostPatch, User};
use blog_core::error::DomainError;
use blog_core::traits::{
    CommentRepository, LikeRepository, PostRepository, RepoResult, UserRepository,
};
use blog_core::value_objects::{LikeId, PostId, UserId};

type LikeKey = (PostId, UserId);

#[derive(Debug, Default)]
struct Tables {
    users: DashMap<UserId, (User, String)>,
    emails: DashMap<String, UserId>,
    posts: DashMap<PostId, Post>,
    comments: DashMap<PostId, Vec<Comment>>,
    likes: DashMap<LikeKey, Like>,
    like_keys: DashMap<LikeId, LikeKey>,
    unavailable: AtomicBool,
}

/// Shared in-memory store; clones see the same data
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `StoreUnavailable` until reset
    pub fn set_unavailable(&self, unavailable: bool) {
        self.tables.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of like records, across all posts
    pub fn like_records(&self) -> usize {
        self.tables.likes.len()
    }

    fn check_available(&self) -> RepoResult<()> {
        if self.tables.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable(
                "in-memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }

    /// Read guard on the post's entry.
    ///
    /// Hold it across a child insert: `PostRepository::delete` must take the
    /// post's shard for writing before it cascades, so a child row can never
    /// land after the cascade has run.
    fn require_post(&self, id: PostId) -> RepoResult<Ref<'_, PostId, Post>> {
        self.tables
            .posts
            .get(&id)
            .ok_or(DomainError::PostNotFound(id))
    }
}

// ============================================================================
// Posts
// ============================================================================

#[async_trait]
impl PostRepository for InMemoryStore {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: PostId) -> RepoResult<Option<Post>> {
        self.check_available()?;
        Ok(self.tables.posts.get(&id).map(|p| p.clone()))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<Post>> {
        self.check_available()?;
        let mut posts: Vec<Post> = self.tables.posts.iter().map(|p| p.clone()).collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn create(&self, post: &Post) -> RepoResult<()> {
        self.check_available()?;
        self.tables.posts.insert(post.id, post.clone());
        Ok(())
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: PostId, patch: PostPatch) -> RepoResult<Option<Post>> {
        self.check_available()?;
        Ok(self.tables.posts.get_mut(&id).map(|mut post| {
            post.apply(patch);
            post.clone()
        }))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: PostId) -> RepoResult<bool> {
        self.check_available()?;
        if self.tables.posts.remove(&id).is_none() {
            return Ok(false);
        }
        self.tables.comments.remove(&id);
        self.tables.likes.retain(|(post_id, _), _| *post_id != id);
        self.tables.like_keys.retain(|_, (post_id, _)| *post_id != id);
        Ok(true)
    }
}

// ============================================================================
// Comments
// ============================================================================

#[async_trait]
impl CommentRepository for InMemoryStore {
    #[instrument(skip(self, comment), fields(post_id = %comment.post_id))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        self.check_available()?;
        let _post = self.require_post(comment.post_id)?;
        self.tables
            .comments
            .entry(comment.post_id)
            .or_default()
            .push(comment.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_post(&self, post_id: PostId) -> RepoResult<Vec<Comment>> {
        self.check_available()?;
        Ok(self
            .tables
            .comments
            .get(&post_id)
            .map(|c| c.clone())
            .unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn count_by_post(&self, post_id: PostId) -> RepoResult<i64> {
        self.check_available()?;
        Ok(self
            .tables
            .comments
            .get(&post_id)
            .map_or(0, |c| c.len() as i64))
    }
}

// ============================================================================
// Likes
// ============================================================================

#[async_trait]
impl LikeRepository for InMemoryStore {
    #[instrument(skip(self))]
    async fn find(&self, post_id: PostId, user_id: UserId) -> RepoResult<Option<Like>> {
        self.check_available()?;
        Ok(self.tables.likes.get(&(post_id, user_id)).map(|l| l.clone()))
    }

    #[instrument(skip(self), fields(post_id = %like.post_id, user_id = %like.user_id))]
    async fn create(&self, like: &Like) -> RepoResult<()> {
        self.check_available()?;
        let _post = self.require_post(like.post_id)?;
        match self.tables.likes.entry(like.key()) {
            Entry::Occupied(_) => Err(DomainError::DuplicateKey {
                post_id: like.post_id,
                user_id: like.user_id,
            }),
            Entry::Vacant(slot) => {
                self.tables.like_keys.insert(like.id, like.key());
                slot.insert(like.clone());
                Ok(())
            }
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: LikeId) -> RepoResult<bool> {
        self.check_available()?;
        let Some((_, key)) = self.tables.like_keys.remove(&id) else {
            return Ok(false);
        };
        Ok(self
            .tables
            .likes
            .remove_if(&key, |_, like| like.id == id)
            .is_some())
    }

    #[instrument(skip(self))]
    async fn count_by_post(&self, post_id: PostId) -> RepoResult<i64> {
        self.check_available()?;
        Ok(self
            .tables
            .likes
            .iter()
            .filter(|entry| entry.key().0 == post_id)
            .count() as i64)
    }
}

// ============================================================================
// Users
// ============================================================================

#[async_trait]
impl UserRepository for InMemoryStore {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        self.check_available()?;
        Ok(self.tables.users.get(&id).map(|u| u.0.clone()))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.check_available()?;
        let Some(id) = self.tables.emails.get(&normalize_email(email)).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.tables.users.get(&id).map(|u| u.0.clone()))
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        self.check_available()?;
        Ok(self.tables.emails.contains_key(&normalize_email(email)))
    }

    #[instrument(skip(self, user, password_hash), fields(user_id = %user.id))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        self.check_available()?;
        match self.tables.emails.entry(normalize_email(&user.email)) {
            Entry::Occupied(_) => Err(DomainError::EmailAlreadyExists),
            Entry::Vacant(slot) => {
                self.tables
                    .users
                    .insert(user.id, (user.clone(), password_hash.to_string()));
                slot.insert(user.id);
                Ok(())
            }
        }
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        self.check_available()?;
        Ok(self.tables.users.get(&id).map(|u| u.1.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::join_all;

    async fn store_with_post() -> (InMemoryStore, Post) {
        let store = InMemoryStore::new();
        let post = Post::new("hello".into(), "body".into(), "tester".into());
        PostRepository::create(&store, &post).await.unwrap();
        (store, post)
    }

    #[tokio::test]
    async fn test_like_uniqueness() {
        let (store, post) = store_with_post().await;
        let user = UserId::new();

        LikeRepository::create(&store, &Like::new(post.id, user)).await.unwrap();
        let err = LikeRepository::create(&store, &Like::new(post.id, user))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::DuplicateKey { .. }));
        assert_eq!(LikeRepository::count_by_post(&store, post.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_admit_one() {
        let (store, post) = store_with_post().await;
        let user = UserId::new();

        let attempts = (0..50).map(|_| {
            let store = store.clone();
            tokio::spawn(async move {
                LikeRepository::create(&store, &Like::new(post.id, user)).await
            })
        });
        let results = join_all(attempts).await;

        let successes = results
            .into_iter()
            .filter(|r| matches!(r, Ok(Ok(()))))
            .count();
        assert_eq!(successes, 1);
        assert_eq!(store.like_records(), 1);
    }

    #[tokio::test]
    async fn test_delete_like_by_id() {
        let (store, post) = store_with_post().await;
        let like = Like::new(post.id, UserId::new());
        LikeRepository::create(&store, &like).await.unwrap();

        assert!(LikeRepository::delete(&store, like.id).await.unwrap());
        assert!(!LikeRepository::delete(&store, like.id).await.unwrap());
        assert!(store.find(post.id, like.user_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_like_on_missing_post() {
        let store = InMemoryStore::new();
        let err = LikeRepository::create(&store, &Like::new(PostId::new(), UserId::new()))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_comment_counts() {
        let (store, post) = store_with_post().await;
        let author = UserId::new();

        assert_eq!(CommentRepository::count_by_post(&store, post.id).await.unwrap(), 0);
        for text in ["one", "two", "three"] {
            CommentRepository::create(&store, &Comment::new(post.id, author, text.to_string()))
                .await
                .unwrap();
        }

        assert_eq!(CommentRepository::count_by_post(&store, post.id).await.unwrap(), 3);
        let texts: Vec<String> = store
            .find_by_post(post.id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.text)
            .collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_delete_post_cascades() {
        let (store, post) = store_with_post().await;
        let user = UserId::new();
        LikeRepository::create(&store, &Like::new(post.id, user)).await.unwrap();
        CommentRepository::create(&store, &Comment::new(post.id, user, "hi".to_string()))
            .await
            .unwrap();

        assert!(PostRepository::delete(&store, post.id).await.unwrap());
        assert!(!PostRepository::delete(&store, post.id).await.unwrap());
        assert_eq!(store.like_records(), 0);
        assert_eq!(CommentRepository::count_by_post(&store, post.id).await.unwrap(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_children_never_outlive_deleted_post() {
        for _ in 0..200 {
            let (store, post) = store_with_post().await;

            let comment = {
                let store = store.clone();
                tokio::spawn(async move {
                    CommentRepository::create(
                        &store,
                        &Comment::new(post.id, UserId::new(), "late".to_string()),
                    )
                    .await
                })
            };
            let like = {
                let store = store.clone();
                tokio::spawn(async move {
                    LikeRepository::create(&store, &Like::new(post.id, UserId::new())).await
                })
            };
            assert!(PostRepository::delete(&store, post.id).await.unwrap());
            let _ = comment.await.unwrap();
            let _ = like.await.unwrap();

            assert_eq!(CommentRepository::count_by_post(&store, post.id).await.unwrap(), 0);
            assert_eq!(LikeRepository::count_by_post(&store, post.id).await.unwrap(), 0);
            assert_eq!(store.like_records(), 0);
        }
    }

    #[tokio::test]
    async fn test_update_post() {
        let (store, post) = store_with_post().await;
        let patch = PostPatch {
            title: Some("renamed".to_string()),
            content: None,
        };

        let updated = store.update(post.id, patch.clone()).await.unwrap().unwrap();
        assert_eq!(updated.title, "renamed");
        assert!(store.update(PostId::new(), patch).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_user_email_is_unique_case_insensitive() {
        let store = InMemoryStore::new();
        let user = User::new("alice@example.com".to_string());
        UserRepository::create(&store, &user, "hash").await.unwrap();

        let dup = User::new("ALICE@example.com".to_string());
        let err = UserRepository::create(&store, &dup, "hash").await.unwrap_err();
        assert!(matches!(err, DomainError::EmailAlreadyExists));

        assert!(store.email_exists("Alice@Example.com").await.unwrap());
        let found = store.find_by_email("alice@EXAMPLE.com").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(store.get_password_hash(user.id).await.unwrap().as_deref(), Some("hash"));
    }

    #[tokio::test]
    async fn test_unavailable_store() {
        let (store, post) = store_with_post().await;
        store.set_unavailable(true);

        let err = LikeRepository::count_by_post(&store, post.id).await.unwrap_err();
        assert!(err.is_unavailable());

        store.set_unavailable(false);
        assert_eq!(LikeRepository::count_by_post(&store, post.id).await.unwrap(), 0);
    }
}
