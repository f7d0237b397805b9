use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a blog publication.
///
/// `pub_date` may lie in the future; such posts stay hidden from the public
/// listings until the date passes (deferred publication).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    /// Path or URL of an attached image, if any. Media storage itself is a
    /// platform concern; only the reference is kept here.
    pub image: Option<String>,
    pub category_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new published post owned by `author_id`.
    pub fn new(author_id: Uuid, title: String, text: String, pub_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            text,
            pub_date,
            image: None,
            category_id: None,
            location_id: None,
            is_published: true,
            created_at: Utc::now(),
        }
    }
}

/// A post together with its live comment count.
///
/// The count is computed from comment rows at query time; there is no
/// denormalized counter column to drift out of sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedPost {
    pub post: Post,
    pub comment_count: u64,
}
