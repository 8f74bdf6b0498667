use super::common::{created_response, map_service_error, success_response};
use crate::{
    auth::AuthUser,
    errors::ApiError,
    services::purchasing::{PriceCheckCommand, RequestAction, UploadInvoiceCommand},
    AppState,
};
use axum::{
    extract::{multipart::Multipart, Json, Path, Query, State},
    routing::{get, post},
    Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

// Request and response DTOs

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct UploadInvoiceQuery {
    /// Invoice amount, carried on the query string alongside the multipart body
    pub amount: Decimal,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceListQuery {
    pub purchase_id: Option<Uuid>,
}

/// The price-check payload for an uploaded invoice. An approving check may
/// carry a 1-5 supplier rating.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePriceCheckRequest {
    pub id: Uuid,
    pub action: RequestAction,
    pub rejection_reason: Option<String>,
    pub supplier_rating: Option<u8>,
}

// Handler functions

/// Upload a delivery invoice (multipart: purchaseId + file)
#[utoipa::path(
    post,
    path = "/api/v1/purchase-invoices",
    params(UploadInvoiceQuery),
    responses(
        (status = 201, description = "Invoice uploaded"),
        (status = 400, description = "Missing field, bad file type or size", body = crate::errors::ErrorResponse),
        (status = 404, description = "Purchase request not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-invoices"
)]
pub async fn upload_invoice(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<UploadInvoiceQuery>,
    mut multipart: Multipart,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let mut purchase_id: Option<Uuid> = None;
    let mut file: Option<(String, Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid multipart body: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("purchaseId") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("invalid purchaseId field: {}", e)))?;
                let parsed = text.trim().parse().map_err(|_| {
                    ApiError::ValidationError("purchaseId must be a valid UUID".into())
                })?;
                purchase_id = Some(parsed);
            }
            Some("file") => {
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| "upload".to_string());
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("failed to read file: {}", e)))?;
                file = Some((file_name, content_type, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let purchase_id =
        purchase_id.ok_or_else(|| ApiError::ValidationError("purchaseId is required".into()))?;
    let (file_name, content_type, bytes) =
        file.ok_or_else(|| ApiError::ValidationError("file is required".into()))?;

    let uploaded_by = user
        .user_id
        .parse()
        .map_err(|_| ApiError::ValidationError("authenticated user id is not a valid UUID".into()))?;

    let command = UploadInvoiceCommand {
        purchase_request_id: purchase_id,
        amount: query.amount,
        uploaded_by,
        file_name,
        content_type,
        bytes,
    };

    let invoice = state
        .services
        .purchasing
        .upload_invoice(command)
        .await
        .map_err(map_service_error)?;

    info!("Invoice uploaded: {}", invoice.id);
    Ok(created_response(invoice))
}

/// List invoices, optionally for a single purchase request
#[utoipa::path(
    get,
    path = "/api/v1/purchase-invoices",
    params(InvoiceListQuery),
    responses(
        (status = 200, description = "Invoices listed")
    ),
    tag = "purchase-invoices"
)]
pub async fn list_invoices(
    State(state): State<AppState>,
    Query(query): Query<InvoiceListQuery>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let invoices = state
        .services
        .purchasing
        .list_invoices(query.purchase_id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(invoices))
}

/// Get an invoice by ID
#[utoipa::path(
    get,
    path = "/api/v1/purchase-invoices/{id}",
    params(
        ("id" = Uuid, Path, description = "Invoice ID")
    ),
    responses(
        (status = 200, description = "Invoice fetched"),
        (status = 404, description = "Invoice not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-invoices"
)]
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let invoice = state
        .services
        .purchasing
        .get_invoice(id)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| ApiError::NotFound(format!("Invoice {} not found", id)))?;

    Ok(success_response(invoice))
}

/// Run the price check on an uploaded invoice
#[utoipa::path(
    put,
    path = "/api/v1/purchase-invoices",
    request_body = InvoicePriceCheckRequest,
    responses(
        (status = 200, description = "Price check applied"),
        (status = 400, description = "Invalid action or missing reason", body = crate::errors::ErrorResponse),
        (status = 404, description = "Invoice not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-invoices"
)]
pub async fn price_check_invoice(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<InvoicePriceCheckRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let command = PriceCheckCommand {
        invoice_id: payload.id,
        action: payload.action,
        rejection_reason: payload.rejection_reason,
        supplier_rating: payload.supplier_rating,
    };

    let invoice = state
        .services
        .purchasing
        .price_check(command)
        .await
        .map_err(map_service_error)?;

    info!(
        "Invoice {} price check applied (approved: {})",
        invoice.id, invoice.approved
    );
    Ok(success_response(invoice))
}

/// Creates the router for purchase invoice endpoints
pub fn purchase_invoice_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(upload_invoice)
                .get(list_invoices)
                .put(price_check_invoice),
        )
        .route("/:id", get(get_invoice))
}
