//! Category listing handler.

use actix_web::{HttpResponse, web};
use chrono::Utc;

use quill_core::policy::PostScope;
use quill_shared::dto::{CategoryPostsResponse, PageQuery};

use super::convert;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /category/{slug}/ - posts of one published category.
///
/// An unknown slug and an unpublished category are both 404; a published
/// category with no qualifying posts is an empty page.
pub async fn category_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();

    let category = state
        .categories
        .find_by_slug(&slug)
        .await?
        .filter(|c| c.is_published)
        .ok_or_else(|| AppError::NotFound(format!("category '{slug}'")))?;

    let page = state
        .posts
        .page(
            PostScope::Category(category.id),
            Utc::now(),
            query.page.unwrap_or(1),
        )
        .await?;

    Ok(HttpResponse::Ok().json(CategoryPostsResponse {
        category: convert::category(category),
        listing: convert::post_list(page),
    }))
}
