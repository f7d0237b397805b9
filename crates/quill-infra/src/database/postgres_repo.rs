//! PostgreSQL repository implementations.
//!
//! The listing queries here are the SQL rendering of the predicates in
//! `quill_core::policy`: a [`PostScope`] becomes one parameterized query, and
//! comment counts are resolved live with a grouped count over the page.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait,
};
use uuid::Uuid;

use quill_core::domain::{AnnotatedPost, Category, Comment, Page, Post, User};
use quill_core::error::RepoError;
use quill_core::policy::{PAGE_SIZE, PostScope};
use quill_core::ports::{
    CategoryRepository, CommentRepository, LocationRepository, PostRepository, UserRepository,
};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::location::Entity as LocationEntity;
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL location repository.
pub type PostgresLocationRepository = PostgresBaseRepository<LocationEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// Translate a listing scope into query filters.
///
/// The public gate is: published, not future-dated, and category either
/// absent or itself published. An owner viewing their own profile gets no
/// gate at all.
fn scope_condition(scope: PostScope, now: DateTime<Utc>) -> Condition {
    let base = if scope.gated() {
        Condition::all()
            .add(post::Column::IsPublished.eq(true))
            .add(post::Column::PubDate.lte(now))
            .add(
                Condition::any()
                    .add(post::Column::CategoryId.is_null())
                    .add(category::Column::IsPublished.eq(true)),
            )
    } else {
        Condition::all()
    };

    match scope {
        PostScope::Public => base,
        PostScope::Category(id) => base.add(post::Column::CategoryId.eq(id)),
        PostScope::Profile { author, .. } => base.add(post::Column::AuthorId.eq(author)),
    }
}

impl PostgresPostRepository {
    /// Live comment counts for a set of posts, one grouped query.
    async fn comment_counts(&self, post_ids: Vec<Uuid>) -> Result<HashMap<Uuid, u64>, RepoError> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(Uuid, i64)> = CommentEntity::find()
            .select_only()
            .column(comment::Column::PostId)
            .column_as(comment::Column::Id.count(), "comment_count")
            .filter(comment::Column::PostId.is_in(post_ids))
            .group_by(comment::Column::PostId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(rows.into_iter().map(|(id, n)| (id, n as u64)).collect())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn page(
        &self,
        scope: PostScope,
        now: DateTime<Utc>,
        page: u64,
    ) -> Result<Page<AnnotatedPost>, RepoError> {
        let number = page.max(1);

        let paginator = PostEntity::find()
            .join(JoinType::LeftJoin, post::Relation::Category.def())
            .filter(scope_condition(scope, now))
            .order_by_desc(post::Column::PubDate)
            .order_by_asc(post::Column::Id)
            .paginate(&self.db, PAGE_SIZE);

        let totals = paginator
            .num_items_and_pages()
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let posts: Vec<Post> = paginator
            .fetch_page(number - 1)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
            .into_iter()
            .map(Into::into)
            .collect();

        let counts = self
            .comment_counts(posts.iter().map(|p| p.id).collect())
            .await?;

        let items = posts
            .into_iter()
            .map(|post| {
                let comment_count = counts.get(&post.id).copied().unwrap_or(0);
                AnnotatedPost {
                    post,
                    comment_count,
                }
            })
            .collect();

        Ok(Page {
            items,
            number,
            total_items: totals.number_of_items,
            total_pages: totals.number_of_pages,
        })
    }

    async fn find_with_category(
        &self,
        id: Uuid,
    ) -> Result<Option<(Post, Option<Category>)>, RepoError> {
        let found = PostEntity::find_by_id(id)
            .find_also_related(CategoryEntity)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(found.map(|(post, cat)| (post.into(), cat.map(Into::into))))
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_name = %username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = if let Some(at_pos) = email.find('@') {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = if local.len() > 1 {
                format!("{}***", &local[..1])
            } else {
                "***".to_string()
            };
            format!("{}{}", masked_local, domain)
        } else {
            "***".to_string()
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl LocationRepository for PostgresLocationRepository {}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count_for_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .count(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))
    }
}
