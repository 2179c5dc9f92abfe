/// Post service - handles post creation, retrieval, and ownership-gated edits
use crate::error::Result;
use crate::forms::{FieldErrors, NewPost, PostForm, Validated};
use crate::models::{FeedPost, Post};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a post by ID
    pub async fn get_post(&self, post_id: Uuid) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, author_id, group_id, text, image_key, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    /// Get a post joined with its author and group, for the detail page.
    pub async fn get_post_with_meta(&self, post_id: Uuid) -> Result<Option<FeedPost>> {
        let post = sqlx::query_as::<_, FeedPost>(
            r#"
            SELECT p.id, p.text, p.image_key, p.created_at,
                   u.id AS author_id, u.username AS author_username,
                   g.title AS group_title, g.slug AS group_slug
            FROM posts p
            JOIN users u ON u.id = p.author_id
            LEFT JOIN "groups" g ON g.id = p.group_id
            WHERE p.id = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    /// Validate a submitted post form into typed values.
    ///
    /// Field validation and group-slug resolution both report through the
    /// same [`FieldErrors`] so the form re-renders with everything at once.
    pub async fn prepare(&self, form: &PostForm) -> Result<Validated<NewPost>> {
        let mut errors = match form.validate() {
            Ok(()) => FieldErrors::new(),
            Err(errs) => errs.into(),
        };

        let group_id = match form.group_slug() {
            Some(slug) => {
                let id = sqlx::query_scalar::<_, Uuid>(
                    r#"SELECT id FROM "groups" WHERE slug = $1"#,
                )
                .bind(slug)
                .fetch_optional(&self.pool)
                .await?;

                if id.is_none() {
                    errors.push("group", format!("Unknown group '{}'", slug));
                }
                id
            }
            None => None,
        };

        if !errors.is_empty() {
            return Ok(Validated::Invalid(errors));
        }

        Ok(Validated::Valid(NewPost {
            text: form.text.trim().to_string(),
            group_id,
            image_key: form.image().map(|s| s.to_string()),
        }))
    }

    /// Create a new post
    pub async fn create_post(&self, author_id: Uuid, new_post: &NewPost) -> Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (id, author_id, group_id, text, image_key)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, author_id, group_id, text, image_key, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(author_id)
        .bind(new_post.group_id)
        .bind(&new_post.text)
        .bind(&new_post.image_key)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    /// Update a post's text, group, and image. The author id is part of the
    /// WHERE clause so a non-author can never mutate the row; `created_at`
    /// is never touched. Returns whether a row was updated.
    pub async fn update_post(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        new_post: &NewPost,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET text = $1, group_id = $2, image_key = $3
            WHERE id = $4 AND author_id = $5
            "#,
        )
        .bind(&new_post.text)
        .bind(new_post.group_id)
        .bind(&new_post.image_key)
        .bind(post_id)
        .bind(author_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
