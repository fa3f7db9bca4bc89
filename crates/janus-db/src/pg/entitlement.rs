//! PostgreSQL entitlement repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::EntitlementRow;
use crate::repo::{EntitlementRepository, NewEntitlement};

/// PostgreSQL entitlement repository
#[derive(Clone)]
pub struct PgEntitlementRepository {
    pool: PgPool,
}

impl PgEntitlementRepository {
    /// Create a new entitlement repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntitlementRepository for PgEntitlementRepository {
    async fn find(&self, user_id: Uuid, application_id: i32) -> DbResult<Option<EntitlementRow>> {
        let row = sqlx::query_as::<_, EntitlementRow>(
            r#"
            SELECT user_id, application_id, credential_label, created_at
            FROM user_applications
            WHERE user_id = $1 AND application_id = $2
            "#,
        )
        .bind(user_id)
        .bind(application_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_user(&self, user_id: Uuid) -> DbResult<Vec<EntitlementRow>> {
        let rows = sqlx::query_as::<_, EntitlementRow>(
            r#"
            SELECT user_id, application_id, credential_label, created_at
            FROM user_applications
            WHERE user_id = $1
            ORDER BY application_id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn apply(
        &self,
        user_id: Uuid,
        grants: &[NewEntitlement],
        revokes: &[i32],
    ) -> DbResult<()> {
        if grants.is_empty() && revokes.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        for application_id in revokes {
            sqlx::query(
                "DELETE FROM user_applications WHERE user_id = $1 AND application_id = $2",
            )
            .bind(user_id)
            .bind(application_id)
            .execute(&mut *tx)
            .await?;
        }

        for grant in grants {
            // The (user_id, application_id) primary key keeps the at-most-one
            // invariant under concurrent reconciles
            sqlx::query(
                r#"
                INSERT INTO user_applications (user_id, application_id, credential_label)
                VALUES ($1, $2, $3)
                ON CONFLICT (user_id, application_id) DO NOTHING
                "#,
            )
            .bind(user_id)
            .bind(grant.application_id)
            .bind(&grant.credential_label)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }
}
