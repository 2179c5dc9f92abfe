/// Route table
///
/// Shared between the binary and the integration tests so both exercise the
/// same HTTP surface.
use crate::{handlers, metrics};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index))
        .route("/follow", web::get().to(handlers::following_feed))
        .route("/create", web::get().to(handlers::create_post_form))
        .route("/create", web::post().to(handlers::create_post))
        .route("/group/{slug}", web::get().to(handlers::group_feed))
        .route("/profile/{username}", web::get().to(handlers::profile))
        .route(
            "/profile/{username}/follow",
            web::get().to(handlers::profile_follow),
        )
        .route(
            "/profile/{username}/unfollow",
            web::get().to(handlers::profile_unfollow),
        )
        .route("/posts/{post_id}", web::get().to(handlers::post_detail))
        .route(
            "/posts/{post_id}/edit",
            web::get().to(handlers::edit_post_form),
        )
        .route(
            "/posts/{post_id}/edit",
            web::post().to(handlers::edit_post),
        )
        .route(
            "/posts/{post_id}/comment",
            web::post().to(handlers::add_comment),
        )
        .route(
            "/internal/cache/flush",
            web::post().to(handlers::flush_page_cache),
        )
        .route("/metrics", web::get().to(metrics::serve_metrics));
}
