//! Portal API Library
//!
//! Backend services for the internal procurement portal: the purchase
//! request approval pipeline, supplier quotes and ratings, delivery-invoice
//! price checks, and contract invoice lifecycle tracking.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod migrator;
pub mod openapi;
pub mod services;
pub mod storage;
pub mod tracing;

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, extract::State, response::Json, routing::get, Router};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;

use crate::auth::consts as perm;
use crate::auth::AuthRouterExt;

/// Multipart bodies above this size are refused outright; per-file limits
/// are enforced by upload validation so oversized files still get a 400.
const MULTIPART_BODY_LIMIT: usize = 32 * 1024 * 1024;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub services: handlers::AppServices,
}

// Common response wrapper: `{ success, data?, error? }`
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

impl ResponseMeta {
    fn capture() -> Self {
        Self {
            request_id: crate::tracing::current_request_id().map(|rid| rid.as_str().to_string()),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            meta: Some(ResponseMeta::capture()),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            meta: Some(ResponseMeta::capture()),
        }
    }
}

/// Standard API result type for JSON responses
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, errors::ServiceError>;

/// The `/api/v1` surface, permission-gated per module
pub fn api_v1_routes() -> Router<AppState> {
    let purchase_requests = handlers::purchase_requests::purchase_request_routes()
        .with_permission(perm::PURCHASE_REQUESTS_MANAGE);
    let purchase_invoices = handlers::purchase_invoices::purchase_invoice_routes()
        .layer(DefaultBodyLimit::max(MULTIPART_BODY_LIMIT))
        .with_permission(perm::PURCHASE_INVOICES_MANAGE);
    let suppliers =
        handlers::suppliers::supplier_routes().with_permission(perm::SUPPLIERS_MANAGE);
    let contract_invoices = handlers::contract_invoices::contract_invoice_routes()
        .with_permission(perm::CONTRACT_INVOICES_MANAGE);

    Router::new()
        .route("/status", get(api_status))
        .route("/health", get(health_check))
        .nest("/purchase-requests", purchase_requests)
        .nest("/purchase-invoices", purchase_invoices)
        .nest("/suppliers", suppliers)
        .nest("/contract-invoices", contract_invoices)
}

async fn api_status() -> ApiResult<Value> {
    let status_data = json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "portal-api",
        "timestamp": Utc::now().to_rfc3339(),
        "environment": std::env::var("RUN_ENV").unwrap_or_else(|_| "development".to_string()),
    });

    Ok(Json(ApiResponse::success(status_data)))
}

async fn health_check(State(state): State<AppState>) -> ApiResult<Value> {
    let db_status = match state.db.ping().await {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };

    let health_data = json!({
        "status": db_status,
        "checks": {
            "database": db_status,
        },
        "timestamp": Utc::now().to_rfc3339(),
    });

    Ok(Json(ApiResponse::success(health_data)))
}

#[cfg(test)]
mod response_tests {
    use super::*;
    use chrono::DateTime;

    #[tokio::test]
    async fn success_response_includes_request_metadata() {
        let response =
            crate::tracing::scope_request_id(crate::tracing::RequestId::new("meta-123"), async {
                ApiResponse::success("ok")
            })
            .await;

        assert!(response.success);
        let meta = response.meta.expect("metadata expected");
        assert_eq!(meta.request_id.as_deref(), Some("meta-123"));
        DateTime::parse_from_rfc3339(&meta.timestamp).expect("timestamp should parse");
    }

    #[tokio::test]
    async fn error_response_carries_the_message() {
        let response = ApiResponse::<()>::error("oops".into());
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("oops"));
        assert!(response.data.is_none());
    }

    #[test]
    fn envelope_omits_empty_fields_on_the_wire() {
        let mut response = ApiResponse::success(json!({"id": 1}));
        response.meta = None;
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], true);
        assert!(value.get("error").is_none());
        assert!(value.get("meta").is_none());
    }
}
