use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::template_controller::TemplateController;
use crate::dto::common::ApiResponse;
use crate::dto::template_dto::CreateTemplateRequest;
use crate::models::template::ContractTemplate;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_template_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_template))
        .route("/", get(list_templates))
        .route("/active", get(get_active_template))
        .route("/:id/activate", post(activate_template))
}

async fn create_template(
    State(state): State<AppState>,
    Json(request): Json<CreateTemplateRequest>,
) -> Result<Json<ApiResponse<ContractTemplate>>, AppError> {
    let controller = TemplateController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_templates(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ContractTemplate>>>, AppError> {
    let controller = TemplateController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn get_active_template(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ContractTemplate>>, AppError> {
    let controller = TemplateController::new(state.pool.clone());
    let response = controller.get_active().await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn activate_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ContractTemplate>>, AppError> {
    let controller = TemplateController::new(state.pool.clone());
    let response = controller.activate(id).await?;
    Ok(Json(response))
}
