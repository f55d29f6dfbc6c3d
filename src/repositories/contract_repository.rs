//! Datenzugriff für Mietverträge
//!
//! Auf booking_id liegt ein UNIQUE-Constraint; die automatische
//! Vertragserstellung nutzt das als Idempotenz-Anker.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::contract_dto::UpdateContractRequest;
use crate::models::contract::{Contract, ContractStatus};
use crate::utils::errors::AppResult;

/// Vollständiger Vertrags-Snapshot, wie ihn der Erstellungs-Service
/// aus Buchung, Fahrzeug, Preiskatalog und Konfiguration zusammensetzt
#[derive(Debug, Default)]
pub struct NewContract {
    pub booking_id: Uuid,
    pub vehicle_id: Option<Uuid>,
    pub contract_number: String,

    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub customer_id_number: Option<String>,
    pub customer_drivers_license: Option<String>,

    pub vehicle_manufacturer: Option<String>,
    pub vehicle_model: Option<String>,
    pub vehicle_registration: Option<String>,
    pub vehicle_vin: Option<String>,
    pub rental_start_mileage: Option<i32>,
    pub vehicle_equipment: Option<String>,

    pub rental_start_date: Option<NaiveDate>,
    pub rental_end_date: Option<NaiveDate>,
    pub rental_start_time: Option<String>,
    pub rental_end_time: Option<String>,
    pub rental_days: i32,

    pub daily_rate: Option<Decimal>,
    pub service_fee: Option<Decimal>,
    pub extras_total: Option<Decimal>,
    pub total_amount: Option<Decimal>,
    pub deposit_amount: Option<Decimal>,
    pub down_payment: Option<Decimal>,
    pub down_payment_due_date: Option<NaiveDate>,
    pub final_payment: Option<Decimal>,
    pub final_payment_due_date: Option<NaiveDate>,

    pub bank_account_holder: Option<String>,
    pub bank_iban: Option<String>,
    pub bank_bic: Option<String>,
    pub bank_name: Option<String>,

    pub insurance_package: Option<String>,
    pub deductible_full_coverage: Option<Decimal>,
    pub deductible_partial_coverage: Option<Decimal>,

    pub additional_drivers: Option<String>,
    pub permitted_countries: Option<String>,

    pub fee_professional_cleaning: Option<Decimal>,
    pub fee_toilet_disposal: Option<Decimal>,
    pub fee_late_return_per_hour: Option<Decimal>,
    pub fee_booking_change: Option<Decimal>,
    pub fee_smoking_violation: Option<Decimal>,
    pub fee_refueling: Option<Decimal>,

    pub included_km: Option<i32>,
    pub extra_km_rate: Option<Decimal>,
    pub unlimited_km_option: bool,
    pub unlimited_km_fee: Option<Decimal>,
}

pub struct ContractRepository {
    pool: PgPool,
}

impl ContractRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: &NewContract) -> AppResult<Contract> {
        let contract = sqlx::query_as::<_, Contract>(
            r#"
            INSERT INTO contracts (
                id, booking_id, vehicle_id, contract_number,
                customer_name, customer_email, customer_phone, customer_address,
                customer_id_number, customer_drivers_license,
                vehicle_manufacturer, vehicle_model, vehicle_registration, vehicle_vin,
                rental_start_mileage, vehicle_equipment,
                rental_start_date, rental_end_date, rental_start_time, rental_end_time, rental_days,
                daily_rate, service_fee, extras_total, total_amount, deposit_amount,
                down_payment, down_payment_due_date, final_payment, final_payment_due_date,
                bank_account_holder, bank_iban, bank_bic, bank_name,
                insurance_package, deductible_full_coverage, deductible_partial_coverage,
                additional_drivers, permitted_countries,
                fee_professional_cleaning, fee_toilet_disposal, fee_late_return_per_hour,
                fee_booking_change, fee_smoking_violation, fee_refueling,
                included_km, extra_km_rate, unlimited_km_option, unlimited_km_fee,
                pdf_url, status, created_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16,
                $17, $18, $19, $20, $21,
                $22, $23, $24, $25, $26, $27, $28, $29, $30,
                $31, $32, $33, $34,
                $35, $36, $37, $38, $39,
                $40, $41, $42, $43, $44, $45,
                $46, $47, $48, $49,
                NULL, $50, $51
            )
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.booking_id)
        .bind(new.vehicle_id)
        .bind(&new.contract_number)
        .bind(&new.customer_name)
        .bind(&new.customer_email)
        .bind(&new.customer_phone)
        .bind(&new.customer_address)
        .bind(&new.customer_id_number)
        .bind(&new.customer_drivers_license)
        .bind(&new.vehicle_manufacturer)
        .bind(&new.vehicle_model)
        .bind(&new.vehicle_registration)
        .bind(&new.vehicle_vin)
        .bind(new.rental_start_mileage)
        .bind(&new.vehicle_equipment)
        .bind(new.rental_start_date)
        .bind(new.rental_end_date)
        .bind(&new.rental_start_time)
        .bind(&new.rental_end_time)
        .bind(new.rental_days)
        .bind(new.daily_rate)
        .bind(new.service_fee)
        .bind(new.extras_total)
        .bind(new.total_amount)
        .bind(new.deposit_amount)
        .bind(new.down_payment)
        .bind(new.down_payment_due_date)
        .bind(new.final_payment)
        .bind(new.final_payment_due_date)
        .bind(&new.bank_account_holder)
        .bind(&new.bank_iban)
        .bind(&new.bank_bic)
        .bind(&new.bank_name)
        .bind(&new.insurance_package)
        .bind(new.deductible_full_coverage)
        .bind(new.deductible_partial_coverage)
        .bind(&new.additional_drivers)
        .bind(&new.permitted_countries)
        .bind(new.fee_professional_cleaning)
        .bind(new.fee_toilet_disposal)
        .bind(new.fee_late_return_per_hour)
        .bind(new.fee_booking_change)
        .bind(new.fee_smoking_violation)
        .bind(new.fee_refueling)
        .bind(new.included_km)
        .bind(new.extra_km_rate)
        .bind(new.unlimited_km_option)
        .bind(new.unlimited_km_fee)
        .bind(ContractStatus::Draft.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(contract)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Contract>> {
        let contract = sqlx::query_as::<_, Contract>("SELECT * FROM contracts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(contract)
    }

    pub async fn find_by_booking(&self, booking_id: Uuid) -> AppResult<Option<Contract>> {
        let contract =
            sqlx::query_as::<_, Contract>("SELECT * FROM contracts WHERE booking_id = $1")
                .bind(booking_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(contract)
    }

    pub async fn find_all(&self) -> AppResult<Vec<Contract>> {
        let contracts =
            sqlx::query_as::<_, Contract>("SELECT * FROM contracts ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(contracts)
    }

    /// Aktualisiert die im Entwurfsstadium änderbaren Felder
    pub async fn update_draft_fields(
        &self,
        current: &Contract,
        req: &UpdateContractRequest,
    ) -> AppResult<Contract> {
        let contract = sqlx::query_as::<_, Contract>(
            r#"
            UPDATE contracts
            SET customer_address = $2, customer_phone = $3, customer_id_number = $4,
                customer_drivers_license = $5, rental_start_time = $6, rental_end_time = $7,
                insurance_package = $8, additional_drivers = $9, permitted_countries = $10,
                deposit_amount = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(current.id)
        .bind(req.customer_address.as_ref().or(current.customer_address.as_ref()))
        .bind(req.customer_phone.as_ref().or(current.customer_phone.as_ref()))
        .bind(req.customer_id_number.as_ref().or(current.customer_id_number.as_ref()))
        .bind(
            req.customer_drivers_license
                .as_ref()
                .or(current.customer_drivers_license.as_ref()),
        )
        .bind(req.rental_start_time.as_ref().or(current.rental_start_time.as_ref()))
        .bind(req.rental_end_time.as_ref().or(current.rental_end_time.as_ref()))
        .bind(req.insurance_package.as_ref().or(current.insurance_package.as_ref()))
        .bind(req.additional_drivers.as_ref().or(current.additional_drivers.as_ref()))
        .bind(req.permitted_countries.as_ref().or(current.permitted_countries.as_ref()))
        .bind(req.deposit_amount.or(current.deposit_amount))
        .fetch_one(&self.pool)
        .await?;

        Ok(contract)
    }

    pub async fn update_pdf_url(&self, id: Uuid, pdf_url: &str) -> AppResult<Option<Contract>> {
        let contract = sqlx::query_as::<_, Contract>(
            "UPDATE contracts SET pdf_url = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(pdf_url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(contract)
    }

    pub async fn set_status(&self, id: Uuid, status: ContractStatus) -> AppResult<Option<Contract>> {
        let contract = sqlx::query_as::<_, Contract>(
            "UPDATE contracts SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(contract)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM contracts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
