use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{AnnotatedPost, Category, Comment, Location, Page, Post, User};
use crate::error::RepoError;
use crate::policy::PostScope;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with username/email lookups.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository: scoped listing pages with live comment counts, plus
/// detail retrieval joined with the post's category.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// One page of a listing, ordered pub_date descending with id as the
    /// stable tiebreak. `now` parameterizes the date gate so callers (and
    /// tests) control the clock; `page` is 1-based.
    async fn page(
        &self,
        scope: PostScope,
        now: DateTime<Utc>,
        page: u64,
    ) -> Result<Page<AnnotatedPost>, RepoError>;

    /// A post together with its category row, if one is attached.
    async fn find_with_category(
        &self,
        id: Uuid,
    ) -> Result<Option<(Post, Option<Category>)>, RepoError>;
}

/// Category repository. The slug is the routing key.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError>;
}

/// Location repository.
#[async_trait]
pub trait LocationRepository: BaseRepository<Location, Uuid> {}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Comments of one post, oldest first.
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    /// Live count of comment rows referencing the post.
    async fn count_for_post(&self, post_id: Uuid) -> Result<u64, RepoError>;
}
