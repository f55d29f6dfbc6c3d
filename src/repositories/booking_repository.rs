//! Datenzugriff für Buchungen

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::booking_dto::{CreateBookingRequest, UpdateBookingRequest};
use crate::models::booking::{Booking, BookingStatus};
use crate::utils::errors::AppResult;

pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, req: &CreateBookingRequest) -> AppResult<Booking> {
        let extras = req
            .extras
            .as_ref()
            .map(|e| serde_json::to_value(e).unwrap_or(serde_json::Value::Null));

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (id, booking_number, customer_name, customer_email, customer_phone,
                                  customer_address, customer_id_number, customer_drivers_license,
                                  vehicle_id, start_date, end_date, daily_rate, service_fee,
                                  deposit_amount, unlimited_km_option, additional_drivers, extras,
                                  status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(format!("BU-{}", Utc::now().timestamp_millis()))
        .bind(&req.customer_name)
        .bind(&req.customer_email)
        .bind(&req.customer_phone)
        .bind(&req.customer_address)
        .bind(&req.customer_id_number)
        .bind(&req.customer_drivers_license)
        .bind(req.vehicle_id)
        .bind(req.start_date)
        .bind(req.end_date)
        .bind(req.daily_rate)
        .bind(req.service_fee)
        .bind(req.deposit_amount)
        .bind(req.unlimited_km_option.unwrap_or(false))
        .bind(&req.additional_drivers)
        .bind(extras)
        .bind(BookingStatus::Draft.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(booking)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    pub async fn find_all(&self) -> AppResult<Vec<Booking>> {
        let bookings =
            sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY start_date DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(bookings)
    }

    /// Aktualisiert eine Buchung; nicht gesetzte Felder behalten den
    /// bisherigen Wert
    pub async fn update(&self, current: &Booking, req: &UpdateBookingRequest) -> AppResult<Booking> {
        let extras = match &req.extras {
            Some(e) => serde_json::to_value(e).ok(),
            None => current.extras.clone(),
        };

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET customer_name = $2, customer_email = $3, customer_phone = $4, customer_address = $5,
                customer_id_number = $6, customer_drivers_license = $7, vehicle_id = $8,
                start_date = $9, end_date = $10, daily_rate = $11, service_fee = $12,
                deposit_amount = $13, unlimited_km_option = $14, additional_drivers = $15,
                extras = $16
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(current.id)
        .bind(req.customer_name.as_ref().unwrap_or(&current.customer_name))
        .bind(req.customer_email.as_ref().unwrap_or(&current.customer_email))
        .bind(req.customer_phone.as_ref().or(current.customer_phone.as_ref()))
        .bind(req.customer_address.as_ref().or(current.customer_address.as_ref()))
        .bind(req.customer_id_number.as_ref().or(current.customer_id_number.as_ref()))
        .bind(
            req.customer_drivers_license
                .as_ref()
                .or(current.customer_drivers_license.as_ref()),
        )
        .bind(req.vehicle_id.or(current.vehicle_id))
        .bind(req.start_date.unwrap_or(current.start_date))
        .bind(req.end_date.unwrap_or(current.end_date))
        .bind(req.daily_rate.or(current.daily_rate))
        .bind(req.service_fee.or(current.service_fee))
        .bind(req.deposit_amount.or(current.deposit_amount))
        .bind(req.unlimited_km_option.unwrap_or(current.unlimited_km_option))
        .bind(
            req.additional_drivers
                .as_ref()
                .or(current.additional_drivers.as_ref()),
        )
        .bind(extras)
        .fetch_one(&self.pool)
        .await?;

        Ok(booking)
    }

    pub async fn update_status(&self, id: Uuid, status: BookingStatus) -> AppResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
