//! Datenzugriff für Reinigungsprotokolle

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::protocol_dto::CreateCleaningProtocolRequest;
use crate::models::cleaning_protocol::CleaningProtocol;
use crate::utils::errors::AppResult;

pub struct CleaningProtocolRepository {
    pool: PgPool,
}

impl CleaningProtocolRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        booking_id: Uuid,
        req: &CreateCleaningProtocolRequest,
    ) -> AppResult<CleaningProtocol> {
        let protocol = sqlx::query_as::<_, CleaningProtocol>(
            r#"
            INSERT INTO cleaning_protocols (id, booking_id, exterior_checklist, interior_checklist,
                                            utilities_checklist, inventory_checklist, safety_checklist,
                                            notes, photo_urls, staff_signature, completed_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(booking_id)
        .bind(&req.exterior_checklist)
        .bind(&req.interior_checklist)
        .bind(&req.utilities_checklist)
        .bind(&req.inventory_checklist)
        .bind(&req.safety_checklist)
        .bind(&req.notes)
        .bind(&req.photo_urls)
        .bind(&req.staff_signature)
        .bind(&req.completed_by)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(protocol)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CleaningProtocol>> {
        let protocol =
            sqlx::query_as::<_, CleaningProtocol>("SELECT * FROM cleaning_protocols WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(protocol)
    }

    pub async fn find_by_booking(&self, booking_id: Uuid) -> AppResult<Vec<CleaningProtocol>> {
        let protocols = sqlx::query_as::<_, CleaningProtocol>(
            "SELECT * FROM cleaning_protocols WHERE booking_id = $1 ORDER BY created_at ASC",
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(protocols)
    }
}
