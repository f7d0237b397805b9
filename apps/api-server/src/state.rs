//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::error::RepoError;
use quill_core::ports::{
    CategoryRepository, CommentRepository, LocationRepository, PostRepository, UserRepository,
};
use quill_infra::database::{
    self, DatabaseConfig, PostgresCategoryRepository, PostgresCommentRepository,
    PostgresLocationRepository, PostgresPostRepository, PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub locations: Arc<dyn LocationRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

impl AppState {
    /// Build the application state over one shared connection pool.
    pub async fn new(db_config: &DatabaseConfig) -> Result<Self, RepoError> {
        let db = database::connect(db_config)
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        tracing::info!("Application state initialized");

        Ok(Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(db.clone())),
            locations: Arc::new(PostgresLocationRepository::new(db.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db)),
        })
    }
}
