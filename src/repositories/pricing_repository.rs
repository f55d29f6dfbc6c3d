//! Datenzugriff für den Preiskatalog

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::pricing::PricingItem;
use crate::utils::errors::AppResult;

pub struct PricingRepository {
    pool: PgPool,
}

impl PricingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_active(&self) -> AppResult<Vec<PricingItem>> {
        let items = sqlx::query_as::<_, PricingItem>(
            "SELECT * FROM pricing_catalog WHERE is_active = TRUE ORDER BY item_key",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Aktive Katalogpreise als Map item_key -> Einzelpreis
    pub async fn active_price_map(&self) -> AppResult<HashMap<String, Decimal>> {
        let items = self.find_active().await?;

        Ok(items
            .into_iter()
            .map(|item| (item.item_key, item.unit_price))
            .collect())
    }
}
