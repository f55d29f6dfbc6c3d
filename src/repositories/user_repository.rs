//! Datenzugriff für Mitarbeiter-Logins

use sqlx::PgPool;

use crate::models::user::StaffUser;
use crate::utils::errors::AppResult;

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<StaffUser>> {
        let user = sqlx::query_as::<_, StaffUser>("SELECT * FROM staff_users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }
}
