/// Feed service - builds the four paginated listings
///
/// Every listing is newest-first and resolves the author and group in the
/// same statement as the posts, so rendering never issues per-item lookups.
use crate::error::Result;
use crate::models::FeedPost;
use crate::pagination::{self, Page};
use sqlx::PgPool;
use uuid::Uuid;

const FEED_COLUMNS: &str = r#"
    p.id, p.text, p.image_key, p.created_at,
    u.id AS author_id, u.username AS author_username,
    g.title AS group_title, g.slug AS group_slug
"#;

pub struct FeedService {
    pool: PgPool,
    page_size: i64,
}

impl FeedService {
    pub fn new(pool: PgPool, page_size: i64) -> Self {
        Self { pool, page_size }
    }

    /// Global feed: all posts, unfiltered.
    pub async fn global(&self, requested_page: Option<&str>) -> Result<Page<FeedPost>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;
        let meta = pagination::resolve(requested_page, total, self.page_size);

        let items = sqlx::query_as::<_, FeedPost>(&format!(
            r#"
            SELECT {FEED_COLUMNS}
            FROM posts p
            JOIN users u ON u.id = p.author_id
            LEFT JOIN "groups" g ON g.id = p.group_id
            ORDER BY p.created_at DESC, p.id DESC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(meta.size)
        .bind(meta.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(Page { items, meta })
    }

    /// Group feed: posts whose group is `group_id`.
    pub async fn group(
        &self,
        group_id: Uuid,
        requested_page: Option<&str>,
    ) -> Result<Page<FeedPost>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE group_id = $1")
            .bind(group_id)
            .fetch_one(&self.pool)
            .await?;
        let meta = pagination::resolve(requested_page, total, self.page_size);

        let items = sqlx::query_as::<_, FeedPost>(&format!(
            r#"
            SELECT {FEED_COLUMNS}
            FROM posts p
            JOIN users u ON u.id = p.author_id
            LEFT JOIN "groups" g ON g.id = p.group_id
            WHERE p.group_id = $1
            ORDER BY p.created_at DESC, p.id DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(group_id)
        .bind(meta.size)
        .bind(meta.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(Page { items, meta })
    }

    /// Profile feed: posts authored by `author_id`.
    pub async fn profile(
        &self,
        author_id: Uuid,
        requested_page: Option<&str>,
    ) -> Result<Page<FeedPost>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(&self.pool)
            .await?;
        let meta = pagination::resolve(requested_page, total, self.page_size);

        let items = sqlx::query_as::<_, FeedPost>(&format!(
            r#"
            SELECT {FEED_COLUMNS}
            FROM posts p
            JOIN users u ON u.id = p.author_id
            LEFT JOIN "groups" g ON g.id = p.group_id
            WHERE p.author_id = $1
            ORDER BY p.created_at DESC, p.id DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(author_id)
        .bind(meta.size)
        .bind(meta.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(Page { items, meta })
    }

    /// Following feed: posts by any author the viewer follows. Empty page
    /// (not an error) when the viewer follows nobody.
    pub async fn following(
        &self,
        viewer_id: Uuid,
        requested_page: Option<&str>,
    ) -> Result<Page<FeedPost>> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM posts p
            JOIN follows f ON f.followee_id = p.author_id
            WHERE f.follower_id = $1
            "#,
        )
        .bind(viewer_id)
        .fetch_one(&self.pool)
        .await?;
        let meta = pagination::resolve(requested_page, total, self.page_size);

        let items = sqlx::query_as::<_, FeedPost>(&format!(
            r#"
            SELECT {FEED_COLUMNS}
            FROM posts p
            JOIN users u ON u.id = p.author_id
            LEFT JOIN "groups" g ON g.id = p.group_id
            JOIN follows f ON f.followee_id = p.author_id
            WHERE f.follower_id = $1
            ORDER BY p.created_at DESC, p.id DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(viewer_id)
        .bind(meta.size)
        .bind(meta.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(Page { items, meta })
    }
}
