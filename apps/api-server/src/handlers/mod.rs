//! HTTP handlers and route configuration.

mod auth;
mod categories;
mod comments;
mod convert;
mod health;
mod pages;
mod posts;
mod profiles;

use actix_web::{HttpResponse, http::header, web};
use uuid::Uuid;

/// Configure all application routes.
///
/// Path shapes (trailing slashes included) are part of the public contract;
/// keep them stable.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/auth")
                .route("/registration/", web::post().to(auth::register))
                .route("/login/", web::post().to(auth::login))
                .route("/me/", web::get().to(auth::me)),
        )
        .service(
            web::scope("/pages")
                .route("/about/", web::get().to(pages::about))
                .route("/rules/", web::get().to(pages::rules)),
        )
        .service(
            web::scope("/posts")
                .route("/create/", web::post().to(posts::create))
                .route("/{id}/", web::get().to(posts::detail))
                .route("/{id}/edit", web::post().to(posts::edit))
                .route("/{id}/delete/", web::post().to(posts::delete))
                .route("/{id}/comment/", web::post().to(comments::add))
                .route("/{id}/edit_comment/{comment_id}", web::post().to(comments::edit))
                .route(
                    "/{id}/delete_comment/{comment_id}/",
                    web::post().to(comments::delete),
                ),
        )
        .route("/category/{slug}/", web::get().to(categories::category_posts))
        .route("/profile/edit_profile/", web::post().to(profiles::edit_profile))
        .route("/profile/{username}/", web::get().to(profiles::profile_posts))
        .route("/", web::get().to(posts::index));
}

/// Canonical detail path for a post; redirect target for successful
/// mutations and for ownership refusals.
pub(crate) fn post_detail_path(id: Uuid) -> String {
    format!("/posts/{id}/")
}

/// 302 to `location`.
pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}
