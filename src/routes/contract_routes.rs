use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::contract_controller::ContractController;
use crate::dto::common::ApiResponse;
use crate::dto::contract_dto::{
    AddSignatureRequest, ContractResponse, GeneratePdfResponse, UpdateContractRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_contract_router() -> Router<AppState> {
    Router::new()
        .route("/from-booking/:booking_id", post(create_from_booking))
        .route("/", get(list_contracts))
        .route("/:id", get(get_contract))
        .route("/:id", put(update_contract))
        .route("/:id/signature", post(add_signature))
        .route("/:id/pdf", post(generate_pdf))
        .route("/:id", delete(delete_contract))
}

fn controller(state: &AppState) -> ContractController {
    ContractController::new(
        state.pool.clone(),
        state.config.clone(),
        state.http_client.clone(),
    )
}

async fn create_from_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ContractResponse>>, AppError> {
    let response = controller(&state).create_from_booking(booking_id).await?;
    Ok(Json(response))
}

async fn get_contract(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ContractResponse>>, AppError> {
    let response = controller(&state).get_by_id(id).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn list_contracts(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ContractResponse>>>, AppError> {
    let response = controller(&state).list().await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn update_contract(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateContractRequest>,
) -> Result<Json<ApiResponse<ContractResponse>>, AppError> {
    let response = controller(&state).update(id, request).await?;
    Ok(Json(response))
}

async fn add_signature(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddSignatureRequest>,
) -> Result<Json<ApiResponse<ContractResponse>>, AppError> {
    let response = controller(&state).add_signature(id, request).await?;
    Ok(Json(response))
}

async fn generate_pdf(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<GeneratePdfResponse>>, AppError> {
    let response = controller(&state).generate_pdf(id).await?;
    Ok(Json(response))
}

async fn delete_contract(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    controller(&state).delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Vertrag erfolgreich gelöscht"
    })))
}
