//! PostgreSQL application catalog implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::DbResult;
use crate::models::ApplicationRow;
use crate::repo::ApplicationCatalog;

/// PostgreSQL application catalog (read-only)
#[derive(Clone)]
pub struct PgApplicationCatalog {
    pool: PgPool,
}

impl PgApplicationCatalog {
    /// Create a new application catalog
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationCatalog for PgApplicationCatalog {
    async fn find_by_id(&self, id: i32) -> DbResult<Option<ApplicationRow>> {
        let app = sqlx::query_as::<_, ApplicationRow>(
            r#"
            SELECT id, name, description, created_at
            FROM applications
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(app)
    }

    async fn list(&self) -> DbResult<Vec<ApplicationRow>> {
        let apps = sqlx::query_as::<_, ApplicationRow>(
            r#"
            SELECT id, name, description, created_at
            FROM applications
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(apps)
    }
}
