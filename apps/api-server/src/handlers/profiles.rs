//! Profile handlers: a user's post listing and own-profile editing.

use actix_web::{HttpResponse, web};
use chrono::Utc;

use quill_core::policy::PostScope;
use quill_shared::dto::{PageQuery, ProfileForm, ProfilePostsResponse};

use super::{convert, redirect};
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /profile/{username}/ - a user's posts.
///
/// Owners see all of their own posts, unpublished and future-dated included;
/// everyone else gets the public slice.
pub async fn profile_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
    identity: OptionalIdentity,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();

    let user = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("profile '{username}'")))?;

    let scope = PostScope::profile(user.id, identity.viewer());
    let page = state
        .posts
        .page(scope, Utc::now(), query.page.unwrap_or(1))
        .await?;

    Ok(HttpResponse::Ok().json(ProfilePostsResponse {
        profile: convert::profile(user),
        listing: convert::post_list(page),
    }))
}

/// POST /profile/edit_profile/ - edit own profile.
///
/// There is no cross-user mutation path: the target row is always the
/// authenticated caller's.
pub async fn edit_profile(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ProfileForm>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();

    if form.username.trim().is_empty() || form.username.contains(char::is_whitespace) {
        return Err(AppError::Validation(vec![
            "username must be non-empty and contain no whitespace".to_string(),
        ]));
    }
    if form.email.is_empty() || !form.email.contains('@') {
        return Err(AppError::Validation(vec![
            "email must be a valid address".to_string(),
        ]));
    }

    let mut user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    user.username = form.username;
    user.first_name = form.first_name;
    user.last_name = form.last_name;
    user.email = form.email;

    // Username/email uniqueness violations surface as 409 via RepoError.
    let saved = state.users.save(user).await?;
    tracing::info!(user_id = %saved.id, "Profile updated");

    Ok(redirect(&format!("/profile/{}/", saved.username)))
}
