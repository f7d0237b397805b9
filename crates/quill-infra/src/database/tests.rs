#[cfg(test)]
mod tests {
    use crate::database::entity::{category, comment, post};
    use crate::database::postgres_repo::{
        PostgresCategoryRepository, PostgresCommentRepository, PostgresPostRepository,
    };
    use quill_core::domain::{Category, Comment, Post};
    use quill_core::ports::{BaseRepository, CategoryRepository, CommentRepository};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn post_model(id: uuid::Uuid, author_id: uuid::Uuid) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id,
            author_id,
            title: "Trip".to_owned(),
            text: "Went somewhere.".to_owned(),
            pub_date: now.into(),
            image: None,
            category_id: None,
            location_id: None,
            is_published: true,
            created_at: now.into(),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let post_id = uuid::Uuid::new_v4();
        let author_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model(post_id, author_id)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        assert!(result.is_some());
        let post = result.unwrap();
        assert_eq!(post.title, "Trip");
        assert_eq!(post.id, post_id);
        assert_eq!(post.author_id, author_id);
    }

    #[tokio::test]
    async fn test_find_category_by_slug() {
        let now = chrono::Utc::now();
        let cat_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![category::Model {
                id: cat_id,
                title: "Travel".to_owned(),
                description: "On the road".to_owned(),
                slug: "travel".to_owned(),
                is_published: true,
                created_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresCategoryRepository::new(db);

        let result: Option<Category> = repo.find_by_slug("travel").await.unwrap();

        assert!(result.is_some());
        let cat = result.unwrap();
        assert_eq!(cat.slug, "travel");
        assert_eq!(cat.id, cat_id);
    }

    #[tokio::test]
    async fn test_list_comments_for_post() {
        let now = chrono::Utc::now();
        let post_id = uuid::Uuid::new_v4();
        let author_id = uuid::Uuid::new_v4();
        let first = uuid::Uuid::new_v4();
        let second = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                comment::Model {
                    id: first,
                    post_id,
                    author_id,
                    text: "First!".to_owned(),
                    is_published: true,
                    created_at: now.into(),
                },
                comment::Model {
                    id: second,
                    post_id,
                    author_id,
                    text: "Second.".to_owned(),
                    is_published: true,
                    created_at: now.into(),
                },
            ]])
            .into_connection();

        let repo = PostgresCommentRepository::new(db);

        let comments: Vec<Comment> = repo.list_for_post(post_id).await.unwrap();

        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].id, first);
        assert_eq!(comments[0].text, "First!");
        assert_eq!(comments[1].id, second);
    }

    #[tokio::test]
    async fn test_delete_missing_post_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Result<(), _> =
            BaseRepository::<Post, _>::delete(&repo, uuid::Uuid::new_v4()).await;

        assert!(matches!(
            result,
            Err(quill_core::error::RepoError::NotFound)
        ));
    }
}
