/// Comment handlers
use crate::error::{AppError, Result};
use crate::forms::{CommentForm, FieldErrors};
use crate::services::{CommentService, PostService};
use crate::session::CurrentUser;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use validator::Validate;

/// Add a comment to a post; on success redirect to the detail page, on
/// validation failure re-render the detail page with the form errors.
pub async fn add_comment(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    user: CurrentUser,
    form: web::Form<CommentForm>,
) -> Result<HttpResponse> {
    let post_id = super::parse_post_id(&path)?;

    PostService::new((**pool).clone())
        .get_post(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))?;

    if let Err(errs) = form.validate() {
        let errors: FieldErrors = errs.into();
        return super::posts::render_post_detail(
            &pool,
            post_id,
            Some(user.0),
            form.text.clone(),
            errors.into_vec(),
        )
        .await;
    }

    CommentService::new((**pool).clone())
        .create_comment(post_id, user.0, &form.text)
        .await?;

    Ok(super::redirect(&format!("/posts/{}", post_id)))
}
