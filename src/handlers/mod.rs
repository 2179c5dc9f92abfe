/// HTTP handlers for quill
///
/// Handlers render HTML pages or issue 302 redirects; access control runs
/// first (session extractors, then ownership checks), then the services do
/// the work against the persistence layer.
pub mod admin;
pub mod comments;
pub mod feeds;
pub mod follows;
pub mod posts;

// Re-export handler functions at module level
pub use admin::flush_page_cache;
pub use comments::add_comment;
pub use feeds::{following_feed, group_feed, index, profile};
pub use follows::{profile_follow, profile_unfollow};
pub use posts::{create_post, create_post_form, edit_post, edit_post_form, post_detail};

use crate::error::{AppError, Result};
use actix_web::{http::header, HttpResponse};
use uuid::Uuid;

/// 302 redirect to `location`.
pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
}

/// Rendered HTML response.
pub(crate) fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

/// Parse a post id from the URL; an unparseable id is an unknown resource,
/// not a malformed request.
pub(crate) fn parse_post_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("post '{}'", raw)))
}
