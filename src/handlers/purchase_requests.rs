use super::common::{
    created_response, map_service_error, success_response, validate_input, PaginatedResponse,
};
use crate::{
    auth::AuthUser,
    entities::purchase_request::Stage,
    errors::ApiError,
    services::purchasing::{
        CreatePurchaseRequest, OfferInput, RequestAction, RequestActionCommand, RequestFilter,
    },
    AppState,
};
use axum::{
    extract::{Json, Path, Query, State},
    routing::{get, post},
    Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// Request and response DTOs

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseRequestRequest {
    #[validate(length(min = 1, message = "unit is required"))]
    pub unit: String,
    #[validate(length(min = 1, message = "itemName is required"))]
    pub item_name: String,
    pub item_spec: Option<String>,
    pub justification: Option<String>,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OfferRequest {
    pub supplier_id: Option<Uuid>,
    #[validate(length(min = 1, message = "supplierName is required"))]
    pub supplier_name: String,
    pub price: Decimal,
}

impl From<OfferRequest> for OfferInput {
    fn from(value: OfferRequest) -> Self {
        OfferInput {
            supplier_id: value.supplier_id,
            supplier_name: value.supplier_name,
            price: value.price,
        }
    }
}

/// The reviewer action payload: which action to take on which request,
/// with the action-specific fields alongside.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequestActionRequest {
    pub id: Uuid,
    pub action: RequestAction,
    pub rejection_reason: Option<String>,
    pub offers: Option<Vec<OfferRequest>>,
    pub selected_offer_index: Option<usize>,
    pub new_offers: Option<Vec<OfferRequest>>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequestListQuery {
    /// Stage number 1-6
    pub stage: Option<i32>,
    pub approved: Option<bool>,
    pub rejected: Option<bool>,
    #[serde(default = "super::common::default_page")]
    pub page: u64,
    #[serde(default = "super::common::default_per_page")]
    pub per_page: u64,
}

fn requester_id(user: &AuthUser) -> Result<Uuid, ApiError> {
    user.user_id
        .parse()
        .map_err(|_| ApiError::ValidationError("authenticated user id is not a valid UUID".into()))
}

// Handler functions

/// Submit a new purchase request
#[utoipa::path(
    post,
    path = "/api/v1/purchase-requests",
    request_body = CreatePurchaseRequestRequest,
    responses(
        (status = 201, description = "Purchase request created"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-requests"
)]
pub async fn create_purchase_request(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreatePurchaseRequestRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let command = CreatePurchaseRequest {
        requester_id: requester_id(&user)?,
        unit: payload.unit,
        item_name: payload.item_name,
        item_spec: payload.item_spec,
        justification: payload.justification,
        quantity: payload.quantity,
        category_id: payload.category_id,
    };

    let request = state
        .services
        .purchasing
        .create_request(command)
        .await
        .map_err(map_service_error)?;

    info!("Purchase request created: {}", request.id);
    Ok(created_response(request))
}

/// List purchase requests filtered by stage and review flags
#[utoipa::path(
    get,
    path = "/api/v1/purchase-requests",
    params(PurchaseRequestListQuery),
    responses(
        (status = 200, description = "Purchase requests listed"),
        (status = 400, description = "Invalid filter", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-requests"
)]
pub async fn list_purchase_requests(
    State(state): State<AppState>,
    Query(query): Query<PurchaseRequestListQuery>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let stage = match query.stage {
        Some(number) => Some(Stage::from_int(number).ok_or_else(|| {
            ApiError::ValidationError(format!("stage must be between 1 and 6, got {}", number))
        })?),
        None => None,
    };

    let filter = RequestFilter {
        stage,
        approved: query.approved,
        rejected: query.rejected,
    };

    let (items, total) = state
        .services
        .purchasing
        .list_requests(filter, query.page, query.per_page)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(PaginatedResponse::new(
        items,
        query.page,
        query.per_page,
        total,
    )))
}

/// Get a purchase request by ID
#[utoipa::path(
    get,
    path = "/api/v1/purchase-requests/{id}",
    params(
        ("id" = Uuid, Path, description = "Purchase request ID")
    ),
    responses(
        (status = 200, description = "Purchase request fetched"),
        (status = 404, description = "Purchase request not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-requests"
)]
pub async fn get_purchase_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let request = state
        .services
        .purchasing
        .get_request(id)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| ApiError::NotFound(format!("Purchase request {} not found", id)))?;

    Ok(success_response(request))
}

/// Apply a reviewer action (approve/reject/hold/saveOffers/newOffer)
#[utoipa::path(
    put,
    path = "/api/v1/purchase-requests",
    request_body = PurchaseRequestActionRequest,
    responses(
        (status = 200, description = "Action applied"),
        (status = 400, description = "Invalid action for the current stage", body = crate::errors::ErrorResponse),
        (status = 404, description = "Purchase request not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-requests"
)]
pub async fn act_on_purchase_request(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<PurchaseRequestActionRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let command = RequestActionCommand {
        id: payload.id,
        action: payload.action,
        rejection_reason: payload.rejection_reason,
        offers: payload
            .offers
            .map(|offers| offers.into_iter().map(OfferInput::from).collect()),
        selected_offer_index: payload.selected_offer_index,
        new_offers: payload
            .new_offers
            .map(|offers| offers.into_iter().map(OfferInput::from).collect()),
    };

    let request = state
        .services
        .purchasing
        .apply_action(command)
        .await
        .map_err(map_service_error)?;

    info!(
        "Purchase request {} action applied (stage: {})",
        request.id,
        request.stage.as_int()
    );
    Ok(success_response(request))
}

/// Creates the router for purchase request endpoints
pub fn purchase_request_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_purchase_request)
                .get(list_purchase_requests)
                .put(act_on_purchase_request),
        )
        .route("/:id", get(get_purchase_request))
}
