/// Follow handlers - create and remove follow edges
///
/// Both operations are idempotent and always land back on the target's
/// profile, whether or not an edge changed.
use crate::error::{AppError, Result};
use crate::services::{FollowService, UserService};
use crate::session::CurrentUser;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

/// Follow an author; 404 for an unknown username, no-op for self-follow or
/// an already-existing edge.
pub async fn profile_follow(
    pool: web::Data<PgPool>,
    username: web::Path<String>,
    user: CurrentUser,
) -> Result<HttpResponse> {
    let author = UserService::new((**pool).clone())
        .get_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user '{}'", username)))?;

    let created = FollowService::new((**pool).clone())
        .create_follow(user.0, author.id)
        .await?;

    if created {
        tracing::info!(follower = %user.0, followee = %author.id, "follow edge created");
    }

    Ok(super::redirect(&format!("/profile/{}", author.username)))
}

/// Unfollow an author; 404 for an unknown username, no-op when no edge
/// exists.
pub async fn profile_unfollow(
    pool: web::Data<PgPool>,
    username: web::Path<String>,
    user: CurrentUser,
) -> Result<HttpResponse> {
    let author = UserService::new((**pool).clone())
        .get_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user '{}'", username)))?;

    FollowService::new((**pool).clone())
        .delete_follow(user.0, author.id)
        .await?;

    Ok(super::redirect(&format!("/profile/{}", author.username)))
}
