use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::protocol_controller::{ProtocolController, ProtocolPdfResponse};
use crate::dto::common::ApiResponse;
use crate::dto::protocol_dto::{CreateCleaningProtocolRequest, CreateProtocolRequest};
use crate::models::cleaning_protocol::CleaningProtocol;
use crate::models::protocol::Protocol;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_protocol_router() -> Router<AppState> {
    Router::new()
        .route("/booking/:booking_id", post(create_protocol))
        .route("/booking/:booking_id", get(list_protocols))
        .route("/:id", get(get_protocol))
        .route("/:id/pdf", post(export_protocol_pdf))
        .route("/cleaning/booking/:booking_id", post(create_cleaning_protocol))
        .route("/cleaning/booking/:booking_id", get(list_cleaning_protocols))
        .route("/cleaning/:id", get(get_cleaning_protocol))
        .route("/cleaning/:id/pdf", post(export_cleaning_protocol_pdf))
}

fn controller(state: &AppState) -> ProtocolController {
    ProtocolController::new(
        state.pool.clone(),
        state.config.clone(),
        state.http_client.clone(),
    )
}

async fn create_protocol(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
    Json(request): Json<CreateProtocolRequest>,
) -> Result<Json<ApiResponse<Protocol>>, AppError> {
    let response = controller(&state).create(booking_id, request).await?;
    Ok(Json(response))
}

async fn get_protocol(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Protocol>>, AppError> {
    let response = controller(&state).get_by_id(id).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn list_protocols(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Protocol>>>, AppError> {
    let response = controller(&state).list_by_booking(booking_id).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn export_protocol_pdf(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProtocolPdfResponse>>, AppError> {
    let response = controller(&state).export_pdf(id).await?;
    Ok(Json(response))
}

async fn create_cleaning_protocol(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
    Json(request): Json<CreateCleaningProtocolRequest>,
) -> Result<Json<ApiResponse<CleaningProtocol>>, AppError> {
    let response = controller(&state).create_cleaning(booking_id, request).await?;
    Ok(Json(response))
}

async fn get_cleaning_protocol(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CleaningProtocol>>, AppError> {
    let response = controller(&state).get_cleaning_by_id(id).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn list_cleaning_protocols(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<CleaningProtocol>>>, AppError> {
    let response = controller(&state).list_cleaning_by_booking(booking_id).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn export_cleaning_protocol_pdf(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProtocolPdfResponse>>, AppError> {
    let response = controller(&state).export_cleaning_pdf(id).await?;
    Ok(Json(response))
}
