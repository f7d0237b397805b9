//! Static informational pages.

use actix_web::HttpResponse;
use serde::Serialize;

#[derive(Serialize)]
pub struct PageContent {
    pub title: &'static str,
    pub body: &'static str,
}

/// GET /pages/about/
pub async fn about() -> HttpResponse {
    HttpResponse::Ok().json(PageContent {
        title: "About",
        body: "Quill is a small multi-user blog platform: categories, \
               locations, deferred publication, and threaded discussion.",
    })
}

/// GET /pages/rules/
pub async fn rules() -> HttpResponse {
    HttpResponse::Ok().json(PageContent {
        title: "Rules",
        body: "Write under your own name, keep comments on topic, and leave \
               moderation decisions to the editors.",
    })
}
