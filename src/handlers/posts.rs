/// Post handlers - detail page, creation, and ownership-gated editing
use crate::error::{AppError, Result};
use crate::forms::{FieldError, PostForm, Validated};
use crate::services::{CommentService, GroupService, PostService, UserService};
use crate::session::{CurrentUser, Viewer};
use crate::views::{CommentView, GroupOption, PostCard, PostDetailPage, PostFormPage};
use actix_web::{web, HttpResponse};
use askama::Template;
use sqlx::PgPool;
use uuid::Uuid;

/// Post detail: the post, its comments, and the comment form.
pub async fn post_detail(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    viewer: Viewer,
) -> Result<HttpResponse> {
    let post_id = super::parse_post_id(&path)?;
    render_post_detail(&pool, post_id, viewer.0, String::new(), Vec::new()).await
}

/// Render the detail page; shared with the invalid-comment re-render path.
pub(crate) async fn render_post_detail(
    pool: &PgPool,
    post_id: Uuid,
    viewer: Option<Uuid>,
    comment_text: String,
    errors: Vec<FieldError>,
) -> Result<HttpResponse> {
    let post = PostService::new(pool.clone())
        .get_post_with_meta(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))?;

    let comments = CommentService::new(pool.clone())
        .get_post_comments(post_id)
        .await?;

    let is_author = viewer == Some(post.author_id);

    let body = PostDetailPage {
        post: PostCard::from(post),
        is_author,
        comments: comments.into_iter().map(CommentView::from).collect(),
        comment_text,
        errors,
    }
    .render()?;

    Ok(super::html(body))
}

async fn render_post_form(
    pool: &PgPool,
    is_edit: bool,
    action: String,
    form: &PostForm,
    errors: Vec<FieldError>,
) -> Result<HttpResponse> {
    let groups = GroupService::new(pool.clone()).list().await?;

    let body = PostFormPage {
        is_edit,
        action,
        text: form.text.clone(),
        image_key: form.image().unwrap_or_default().to_string(),
        groups: GroupOption::for_form(groups, form.group_slug()),
        errors,
    }
    .render()?;

    Ok(super::html(body))
}

/// Empty creation form; requires a session.
pub async fn create_post_form(pool: web::Data<PgPool>, _user: CurrentUser) -> Result<HttpResponse> {
    let empty = PostForm {
        text: String::new(),
        group: None,
        image_key: None,
    };
    render_post_form(&pool, false, "/create".to_string(), &empty, Vec::new()).await
}

/// Create a post; on success redirect to the author's profile, on
/// validation failure re-render the form with errors and submitted values.
pub async fn create_post(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    form: web::Form<PostForm>,
) -> Result<HttpResponse> {
    let posts = PostService::new((**pool).clone());

    let new_post = match posts.prepare(&form).await? {
        Validated::Valid(new_post) => new_post,
        Validated::Invalid(errors) => {
            return render_post_form(
                &pool,
                false,
                "/create".to_string(),
                &form,
                errors.into_vec(),
            )
            .await
        }
    };

    let post = posts.create_post(user.0, &new_post).await?;

    let author = UserService::new((**pool).clone())
        .get_by_id(user.0)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", user.0)))?;

    tracing::info!(post_id = %post.id, author = %author.username, "post created");

    Ok(super::redirect(&format!("/profile/{}", author.username)))
}

/// Edit form pre-filled with the post's current values; a non-author is
/// silently redirected to the detail page.
pub async fn edit_post_form(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    user: CurrentUser,
) -> Result<HttpResponse> {
    let post_id = super::parse_post_id(&path)?;

    let post = PostService::new((**pool).clone())
        .get_post_with_meta(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))?;

    if post.author_id != user.0 {
        return Ok(super::redirect(&format!("/posts/{}", post_id)));
    }

    let current = PostForm {
        text: post.text.clone(),
        group: post.group_slug.clone(),
        image_key: post.image_key.clone(),
    };
    render_post_form(
        &pool,
        true,
        format!("/posts/{}/edit", post_id),
        &current,
        Vec::new(),
    )
    .await
}

/// Apply an edit; authentication and ownership are checked before any write.
pub async fn edit_post(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    user: CurrentUser,
    form: web::Form<PostForm>,
) -> Result<HttpResponse> {
    let post_id = super::parse_post_id(&path)?;
    let posts = PostService::new((**pool).clone());

    let post = posts
        .get_post(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))?;

    if post.author_id != user.0 {
        return Ok(super::redirect(&format!("/posts/{}", post_id)));
    }

    let new_post = match posts.prepare(&form).await? {
        Validated::Valid(new_post) => new_post,
        Validated::Invalid(errors) => {
            return render_post_form(
                &pool,
                true,
                format!("/posts/{}/edit", post_id),
                &form,
                errors.into_vec(),
            )
            .await
        }
    };

    posts.update_post(post_id, user.0, &new_post).await?;

    Ok(super::redirect(&format!("/posts/{}", post_id)))
}
