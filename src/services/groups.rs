/// Group service - resolves groups by slug and lists them for forms
use crate::error::Result;
use crate::models::Group;
use sqlx::PgPool;

pub struct GroupService {
    pool: PgPool,
}

impl GroupService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Group>> {
        let group = sqlx::query_as::<_, Group>(
            r#"
            SELECT id, title, slug, description
            FROM "groups"
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(group)
    }

    /// All groups, for the post form's group selector.
    pub async fn list(&self) -> Result<Vec<Group>> {
        let groups = sqlx::query_as::<_, Group>(
            r#"
            SELECT id, title, slug, description
            FROM "groups"
            ORDER BY title
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(groups)
    }
}
