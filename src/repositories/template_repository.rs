//! Datenzugriff für Vertrags-Templates

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::template::ContractTemplate;
use crate::utils::errors::{AppError, AppResult};

pub struct TemplateRepository {
    pool: PgPool,
}

impl TemplateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Das aktuell aktive Template; es gibt immer höchstens eines
    pub async fn find_active(&self) -> AppResult<Option<ContractTemplate>> {
        let template = sqlx::query_as::<_, ContractTemplate>(
            "SELECT * FROM contract_templates WHERE is_active = TRUE LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(template)
    }

    pub async fn find_all(&self) -> AppResult<Vec<ContractTemplate>> {
        let templates = sqlx::query_as::<_, ContractTemplate>(
            "SELECT * FROM contract_templates ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(templates)
    }

    pub async fn create(
        &self,
        name: &str,
        template_html: &str,
        activate: bool,
    ) -> AppResult<ContractTemplate> {
        let mut tx = self.pool.begin().await?;

        if activate {
            sqlx::query("UPDATE contract_templates SET is_active = FALSE WHERE is_active = TRUE")
                .execute(&mut *tx)
                .await?;
        }

        let template = sqlx::query_as::<_, ContractTemplate>(
            r#"
            INSERT INTO contract_templates (id, name, template_html, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(template_html)
        .bind(activate)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(template)
    }

    /// Aktiviert ein Template und deaktiviert das bisher aktive in
    /// derselben Transaktion
    pub async fn activate(&self, id: Uuid) -> AppResult<ContractTemplate> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE contract_templates SET is_active = FALSE WHERE is_active = TRUE")
            .execute(&mut *tx)
            .await?;

        let template = sqlx::query_as::<_, ContractTemplate>(
            "UPDATE contract_templates SET is_active = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Template nicht gefunden".to_string()))?;

        tx.commit().await?;

        Ok(template)
    }
}
