//! Verwaltung der Vertrags-Templates

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::template_dto::CreateTemplateRequest;
use crate::models::template::ContractTemplate;
use crate::repositories::template_repository::TemplateRepository;
use crate::utils::errors::{AppError, AppResult};

pub struct TemplateController {
    repository: TemplateRepository,
}

impl TemplateController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: TemplateRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateTemplateRequest,
    ) -> AppResult<ApiResponse<ContractTemplate>> {
        request.validate()?;

        let template = self
            .repository
            .create(&request.name, &request.template_html, request.activate)
            .await?;

        log::info!(
            "📝 Template '{}' angelegt{}",
            template.name,
            if template.is_active { " und aktiviert" } else { "" }
        );

        Ok(ApiResponse::success_with_message(
            template,
            "Template erfolgreich angelegt".to_string(),
        ))
    }

    pub async fn list(&self) -> AppResult<Vec<ContractTemplate>> {
        self.repository.find_all().await
    }

    pub async fn get_active(&self) -> AppResult<ContractTemplate> {
        self.repository
            .find_active()
            .await?
            .ok_or_else(|| AppError::NotFound("Kein aktives Template vorhanden".to_string()))
    }

    pub async fn activate(&self, id: Uuid) -> AppResult<ApiResponse<ContractTemplate>> {
        let template = self.repository.activate(id).await?;

        log::info!("📝 Template '{}' aktiviert", template.name);

        Ok(ApiResponse::success_with_message(
            template,
            "Template erfolgreich aktiviert".to_string(),
        ))
    }
}
