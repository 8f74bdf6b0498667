#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue::Set};
use serde_json::Value;
use tokio::sync::mpsc;
use tower::ServiceExt;
use uuid::Uuid;

use portal_api::{
    auth::{AuthConfig, AuthService},
    config::AppConfig,
    db::{self, DbConfig},
    entities::{purchase_request, supplier},
    events::{self, EventSender},
    handlers::AppServices,
    services::purchasing::{
        CreatePurchaseRequest, OfferInput, RequestAction, RequestActionCommand,
    },
    storage::InMemoryFileStore,
    AppState,
};

const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_purposes_only_32chars";

/// In-process application backed by an in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    pub file_store: Arc<InMemoryFileStore>,
    token: String,
    _event_task: tokio::task::JoinHandle<()>,
}

fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".into(),
        host: "127.0.0.1".into(),
        port: 18_080,
        environment: "test".into(),
        jwt_secret: TEST_JWT_SECRET.into(),
        jwt_expiration: 3600,
        auth_issuer: "portal-api".into(),
        auth_audience: "portal".into(),
        log_level: "info".into(),
        log_json: false,
        auto_migrate: true,
        db_max_connections: 1,
        db_min_connections: 1,
        db_connect_timeout_secs: 30,
        db_idle_timeout_secs: 600,
        db_acquire_timeout_secs: 8,
        upload_dir: "uploads".into(),
        cors_allowed_origins: None,
        cors_allow_credentials: false,
    }
}

impl TestApp {
    /// Construct a fresh application with migrated schema and an admin token.
    pub async fn new() -> Self {
        let db_config = DbConfig {
            url: "sqlite::memory:".into(),
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        };
        let db = db::establish_connection_with_config(&db_config)
            .await
            .expect("test database");
        db::run_migrations(&db).await.expect("migrations");
        let db_arc = Arc::new(db);

        let (event_tx, event_rx) = mpsc::channel(64);
        let event_sender = EventSender::new(event_tx);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let auth_service = Arc::new(AuthService::new(AuthConfig::new(
            TEST_JWT_SECRET.into(),
            "portal-api".into(),
            "portal".into(),
            Duration::from_secs(3600),
        )));

        let file_store = Arc::new(InMemoryFileStore::new());
        let services = AppServices::new(
            db_arc.clone(),
            Arc::new(event_sender.clone()),
            file_store.clone(),
        );

        let state = AppState {
            db: db_arc,
            config: test_config(),
            event_sender,
            services,
        };

        let token = auth_service
            .issue_token(&Uuid::new_v4().to_string(), vec!["admin".into()], vec![])
            .expect("test token");

        let router = Router::new()
            .nest("/api/v1", portal_api::api_v1_routes())
            .layer(axum::middleware::from_fn_with_state(
                auth_service,
                |axum::extract::State(auth): axum::extract::State<Arc<AuthService>>,
                 mut req: axum::http::Request<Body>,
                 next: axum::middleware::Next| async move {
                    req.extensions_mut().insert(auth);
                    next.run(req).await
                },
            ))
            .layer(axum::middleware::from_fn(
                portal_api::tracing::request_id_middleware,
            ))
            .with_state(state.clone());

        Self {
            router,
            state,
            file_store,
            token,
            _event_task: event_task,
        }
    }

    /// Send a request without credentials.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.router
            .clone()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("response")
    }

    /// Send a request with the admin bearer token.
    pub async fn request_authenticated(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token));
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.router
            .clone()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("response")
    }

    /// Send an invoice upload as multipart/form-data.
    pub async fn upload_invoice(
        &self,
        amount: &str,
        purchase_id: Uuid,
        file_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Response {
        let boundary = "portal-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"purchaseId\"\r\n\r\n{purchase_id}\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let request = Request::builder()
            .method(Method::POST)
            .uri(format!("/api/v1/purchase-invoices?amount={amount}"))
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .expect("request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("response")
    }

    /// Insert a supplier with explicit rating state.
    pub async fn seed_supplier(&self, name: &str, puan: f64, puan_sayisi: i32) -> supplier::Model {
        let now = Utc::now();
        supplier::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            contact_name: Set(None),
            contact_email: Set(None),
            contact_phone: Set(None),
            puan: Set(puan),
            puan_sayisi: Set(puan_sayisi),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.state.db)
        .await
        .expect("seed supplier")
    }

    /// Create a purchase request directly through the service (stage 2).
    pub async fn seed_request(&self) -> purchase_request::Model {
        self.state
            .services
            .purchasing
            .create_request(CreatePurchaseRequest {
                requester_id: Uuid::new_v4(),
                unit: "IT".into(),
                item_name: "Laptop".into(),
                item_spec: Some("16 GB RAM".into()),
                justification: Some("replacement hardware".into()),
                quantity: 2,
                category_id: None,
            })
            .await
            .expect("seed purchase request")
    }

    /// Drive a freshly created request to the order stage (stage 5) with a
    /// single accepted offer from `supplier_id`.
    pub async fn seed_request_at_order_stage(
        &self,
        supplier_id: Option<Uuid>,
    ) -> purchase_request::Model {
        let request = self.seed_request().await;
        let purchasing = &self.state.services.purchasing;

        // stage 2 -> 3 with one offer attached
        purchasing
            .apply_action(RequestActionCommand {
                id: request.id,
                action: RequestAction::Approve,
                rejection_reason: None,
                offers: Some(vec![OfferInput {
                    supplier_id,
                    supplier_name: "Seed Supplier".into(),
                    price: Decimal::new(125_000, 2),
                }]),
                selected_offer_index: None,
                new_offers: None,
            })
            .await
            .expect("stage 2 approve");

        // stage 3 -> 4 selecting the only offer
        purchasing
            .apply_action(RequestActionCommand {
                id: request.id,
                action: RequestAction::Approve,
                rejection_reason: None,
                offers: None,
                selected_offer_index: Some(0),
                new_offers: None,
            })
            .await
            .expect("stage 3 approve");

        // stage 4 -> 5
        purchasing
            .apply_action(RequestActionCommand {
                id: request.id,
                action: RequestAction::Approve,
                rejection_reason: None,
                offers: None,
                selected_offer_index: None,
                new_offers: None,
            })
            .await
            .expect("stage 4 approve")
    }
}

/// Decode a response body as JSON.
pub async fn response_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}

/// Assert a status and return the decoded body for further checks.
pub async fn expect_status(response: Response, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    response_json(response).await
}
