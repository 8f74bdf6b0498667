use super::common::{created_response, map_service_error, success_response, validate_input};
use crate::{
    auth::AuthUser,
    entities::contract_invoice::ContractInvoiceStatus,
    errors::ApiError,
    services::contract_invoices::CreateContractInvoice,
    AppState,
};
use axum::{
    extract::{Json, Path, Query, State},
    routing::{get, patch, post},
    Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// Request and response DTOs

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContractInvoiceRequest {
    #[validate(length(min = 1, message = "contractNo is required"))]
    pub contract_no: String,
    pub amount: Decimal,
}

/// Requested lifecycle step with the date to stamp on it
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContractInvoiceStatusRequest {
    pub status: ContractInvoiceStatus,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ContractInvoiceListQuery {
    pub status: Option<ContractInvoiceStatus>,
}

// Handler functions

/// Create a contract invoice
#[utoipa::path(
    post,
    path = "/api/v1/contract-invoices",
    request_body = CreateContractInvoiceRequest,
    responses(
        (status = 201, description = "Contract invoice created"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 409, description = "Duplicate contract number", body = crate::errors::ErrorResponse)
    ),
    tag = "contract-invoices"
)]
pub async fn create_contract_invoice(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<CreateContractInvoiceRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let command = CreateContractInvoice {
        contract_no: payload.contract_no,
        amount: payload.amount,
    };

    let invoice = state
        .services
        .contract_invoices
        .create_invoice(command)
        .await
        .map_err(map_service_error)?;

    info!("Contract invoice created: {}", invoice.id);
    Ok(created_response(invoice))
}

/// List contract invoices, optionally by status
#[utoipa::path(
    get,
    path = "/api/v1/contract-invoices",
    params(ContractInvoiceListQuery),
    responses(
        (status = 200, description = "Contract invoices listed")
    ),
    tag = "contract-invoices"
)]
pub async fn list_contract_invoices(
    State(state): State<AppState>,
    Query(query): Query<ContractInvoiceListQuery>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let invoices = state
        .services
        .contract_invoices
        .list_invoices(query.status)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(invoices))
}

/// Get a contract invoice by ID
#[utoipa::path(
    get,
    path = "/api/v1/contract-invoices/{id}",
    params(
        ("id" = Uuid, Path, description = "Contract invoice ID")
    ),
    responses(
        (status = 200, description = "Contract invoice fetched"),
        (status = 404, description = "Contract invoice not found", body = crate::errors::ErrorResponse)
    ),
    tag = "contract-invoices"
)]
pub async fn get_contract_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let invoice = state
        .services
        .contract_invoices
        .get_invoice(id)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| ApiError::NotFound(format!("Contract invoice {} not found", id)))?;

    Ok(success_response(invoice))
}

/// Advance a contract invoice one lifecycle step
#[utoipa::path(
    patch,
    path = "/api/v1/contract-invoices/{id}/status",
    request_body = ContractInvoiceStatusRequest,
    params(
        ("id" = Uuid, Path, description = "Contract invoice ID")
    ),
    responses(
        (status = 200, description = "Status advanced"),
        (status = 400, description = "Out-of-order transition", body = crate::errors::ErrorResponse),
        (status = 404, description = "Contract invoice not found", body = crate::errors::ErrorResponse)
    ),
    tag = "contract-invoices"
)]
pub async fn update_contract_invoice_status(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ContractInvoiceStatusRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let invoice = state
        .services
        .contract_invoices
        .transition(id, payload.status, payload.date)
        .await
        .map_err(map_service_error)?;

    info!(
        "Contract invoice {} moved to {}",
        invoice.id, invoice.status
    );
    Ok(success_response(invoice))
}

/// Creates the router for contract invoice endpoints
pub fn contract_invoice_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_contract_invoice).get(list_contract_invoices))
        .route("/:id", get(get_contract_invoice))
        .route("/:id/status", patch(update_contract_invoice_status))
}
