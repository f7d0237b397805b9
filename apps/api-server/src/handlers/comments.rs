//! Comment handlers: add, edit, delete.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::Comment;
use quill_core::policy;
use quill_shared::dto::CommentForm;

use super::{post_detail_path, redirect};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /posts/{id}/comment/ - add a comment to a post.
pub async fn add(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentForm>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {post_id}")))?;

    let text = validate_comment_text(body.into_inner())?;

    let comment = Comment::new(post.id, identity.user_id, text);
    state.comments.save(comment).await?;

    Ok(redirect(&post_detail_path(post_id)))
}

/// POST /posts/{id}/edit_comment/{comment_id} - edit own comment.
///
/// A non-author is redirected to the post detail view with nothing applied.
pub async fn edit(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<CommentForm>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();

    let mut comment = find_post_comment(&state, post_id, comment_id).await?;

    if !policy::can_modify(identity.viewer(), comment.author_id) {
        return Ok(redirect(&post_detail_path(post_id)));
    }

    comment.text = validate_comment_text(body.into_inner())?;
    state.comments.save(comment).await?;

    Ok(redirect(&post_detail_path(post_id)))
}

/// POST /posts/{id}/delete_comment/{comment_id}/ - delete own comment.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();

    let comment = find_post_comment(&state, post_id, comment_id).await?;

    if !policy::can_modify(identity.viewer(), comment.author_id) {
        return Ok(redirect(&post_detail_path(post_id)));
    }

    state.comments.delete(comment.id).await?;
    tracing::info!(comment_id = %comment_id, post_id = %post_id, "Comment deleted");

    Ok(redirect(&post_detail_path(post_id)))
}

/// A comment addressed through a post's URL must actually belong to that post.
async fn find_post_comment(
    state: &AppState,
    post_id: Uuid,
    comment_id: Uuid,
) -> Result<Comment, AppError> {
    state
        .comments
        .find_by_id(comment_id)
        .await?
        .filter(|c| c.post_id == post_id)
        .ok_or_else(|| AppError::NotFound(format!("comment {comment_id}")))
}

fn validate_comment_text(form: CommentForm) -> Result<String, AppError> {
    if form.text.trim().is_empty() {
        return Err(AppError::Validation(vec![
            "text must not be empty".to_string(),
        ]));
    }
    Ok(form.text)
}
