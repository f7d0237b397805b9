//! Post handlers: index listing, detail, create/edit/delete.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use quill_core::domain::Post;
use quill_core::policy::{self, PostScope};
use quill_shared::dto::{PageQuery, PostForm};

use super::{convert, post_detail_path, redirect};
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Longest accepted post title.
const MAX_TITLE_LEN: usize = 256;

/// GET / - public index, paginated.
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = state
        .posts
        .page(PostScope::Public, Utc::now(), query.page.unwrap_or(1))
        .await?;

    Ok(HttpResponse::Ok().json(convert::post_list(page)))
}

/// GET /posts/{id}/ - post detail with comments.
///
/// The author sees their own post regardless of gating; everyone else gets
/// 404 for anything not publicly visible.
pub async fn detail(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let (post, category) = state
        .posts
        .find_with_category(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {id}")))?;

    if !policy::can_view(identity.viewer(), &post, category.as_ref(), Utc::now()) {
        return Err(AppError::NotFound(format!("post {id}")));
    }

    let comments = state.comments.list_for_post(id).await?;

    Ok(HttpResponse::Ok().json(convert::post_detail(post, comments)))
}

/// POST /posts/create/ - create a post owned by the caller.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostForm>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();
    validate_post_form(&form)?;

    let category_id = resolve_category(&state, form.category_id).await?;
    let location_id = resolve_location(&state, form.location_id).await?;

    let mut post = Post::new(identity.user_id, form.title, form.text, form.pub_date);
    post.image = form.image;
    post.category_id = category_id;
    post.location_id = location_id;

    let saved = state.posts.save(post).await?;
    tracing::info!(post_id = %saved.id, author = %identity.username, "Post created");

    Ok(redirect(&post_detail_path(saved.id)))
}

/// POST /posts/{id}/edit - edit own post.
///
/// A non-author is redirected to the detail view with nothing applied.
pub async fn edit(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<PostForm>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {id}")))?;

    if !policy::can_modify(identity.viewer(), post.author_id) {
        return Ok(redirect(&post_detail_path(id)));
    }

    let form = body.into_inner();
    validate_post_form(&form)?;

    // Author, publication flag, and creation timestamp stay as stored.
    post.title = form.title;
    post.text = form.text;
    post.pub_date = form.pub_date;
    post.image = form.image;
    post.category_id = resolve_category(&state, form.category_id).await?;
    post.location_id = resolve_location(&state, form.location_id).await?;

    state.posts.save(post).await?;

    Ok(redirect(&post_detail_path(id)))
}

/// POST /posts/{id}/delete/ - delete own post.
///
/// Comments are left in place on purpose; they reference the post by id only.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {id}")))?;

    if !policy::can_modify(identity.viewer(), post.author_id) {
        return Ok(redirect(&post_detail_path(id)));
    }

    state.posts.delete(id).await?;
    tracing::info!(post_id = %id, author = %identity.username, "Post deleted");

    Ok(redirect("/"))
}

fn validate_post_form(form: &PostForm) -> Result<(), AppError> {
    let mut errors = Vec::new();

    if form.title.trim().is_empty() {
        errors.push("title must not be empty".to_string());
    }
    if form.title.chars().count() > MAX_TITLE_LEN {
        errors.push(format!("title must be at most {MAX_TITLE_LEN} characters"));
    }
    if form.text.trim().is_empty() {
        errors.push("text must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

/// The category choice is restricted to currently-published categories.
async fn resolve_category(
    state: &AppState,
    category_id: Option<Uuid>,
) -> Result<Option<Uuid>, AppError> {
    match category_id {
        None => Ok(None),
        Some(id) => {
            let category = state
                .categories
                .find_by_id(id)
                .await?
                .filter(|c| c.is_published)
                .ok_or_else(|| {
                    AppError::Validation(vec![
                        "category must reference a published category".to_string(),
                    ])
                })?;
            Ok(Some(category.id))
        }
    }
}

/// Locations only need to exist; there is no published-only restriction.
async fn resolve_location(
    state: &AppState,
    location_id: Option<Uuid>,
) -> Result<Option<Uuid>, AppError> {
    match location_id {
        None => Ok(None),
        Some(id) => {
            let location = state.locations.find_by_id(id).await?.ok_or_else(|| {
                AppError::Validation(vec!["location must reference an existing location".to_string()])
            })?;
            Ok(Some(location.id))
        }
    }
}
