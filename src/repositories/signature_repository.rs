//! Datenzugriff für Vertragsunterschriften

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::signature::{Signature, SignerRole};
use crate::utils::errors::AppResult;

pub struct SignatureRepository {
    pool: PgPool,
}

impl SignatureRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        contract_id: Uuid,
        role: SignerRole,
        signer_name: &str,
        signature_data: &str,
    ) -> AppResult<Signature> {
        let signature = sqlx::query_as::<_, Signature>(
            r#"
            INSERT INTO contract_signatures (id, contract_id, signer_role, signer_name, signature_data, signed_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(contract_id)
        .bind(role.as_str())
        .bind(signer_name)
        .bind(signature_data)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(signature)
    }

    /// Alle Unterschriften eines Vertrags, älteste zuerst
    pub async fn find_by_contract(&self, contract_id: Uuid) -> AppResult<Vec<Signature>> {
        let signatures = sqlx::query_as::<_, Signature>(
            "SELECT * FROM contract_signatures WHERE contract_id = $1 ORDER BY signed_at ASC",
        )
        .bind(contract_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(signatures)
    }
}
