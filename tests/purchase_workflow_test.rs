//! Integration tests for the purchase-request approval workflow:
//! stage transitions, rejection handling, offer collection and selection.

mod common;

use axum::http::{Method, StatusCode};
use common::{expect_status, response_json, TestApp};
use serde_json::json;

#[tokio::test]
async fn create_lands_in_second_approval_stage() {
    let app = TestApp::new().await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/purchase-requests",
            Some(json!({
                "unit": "IT",
                "itemName": "Laptop",
                "itemSpec": "16 GB RAM",
                "justification": "replacement hardware",
                "quantity": 2
            })),
        )
        .await;

    let body = expect_status(response, StatusCode::CREATED).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["stage"], 2);
    assert_eq!(body["data"]["approved"], false);
    assert_eq!(body["data"]["rejected"], false);
    assert_eq!(body["data"]["offers"], json!([]));
}

#[tokio::test]
async fn create_without_item_name_fails() {
    let app = TestApp::new().await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/purchase-requests",
            Some(json!({ "unit": "IT", "itemName": "", "quantity": 1 })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn requests_require_a_bearer_token() {
    let app = TestApp::new().await;

    let response = app
        .request(Method::GET, "/api/v1/purchase-requests", None)
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn stage_two_reject_without_reason_fails_and_changes_nothing() {
    let app = TestApp::new().await;
    let request = app.seed_request().await;

    let response = app
        .request_authenticated(
            Method::PUT,
            "/api/v1/purchase-requests",
            Some(json!({ "id": request.id, "action": "reject" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .request_authenticated(
            Method::GET,
            &format!("/api/v1/purchase-requests/{}", request.id),
            None,
        )
        .await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["data"]["stage"], 2);
    assert_eq!(body["data"]["approved"], false);
    assert_eq!(body["data"]["rejected"], false);
    assert_eq!(body["data"]["rejectionReason"], json!(null));
}

#[tokio::test]
async fn stage_two_reject_with_reason_pins_the_stage() {
    let app = TestApp::new().await;
    let request = app.seed_request().await;

    let response = app
        .request_authenticated(
            Method::PUT,
            "/api/v1/purchase-requests",
            Some(json!({
                "id": request.id,
                "action": "reject",
                "rejectionReason": "budget exceeded"
            })),
        )
        .await;

    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["data"]["stage"], 2);
    assert_eq!(body["data"]["approved"], false);
    assert_eq!(body["data"]["rejected"], true);
    assert_eq!(body["data"]["rejectionReason"], "budget exceeded");
}

#[tokio::test]
async fn stage_two_approve_attaches_offers_and_advances() {
    let app = TestApp::new().await;
    let request = app.seed_request().await;

    let response = app
        .request_authenticated(
            Method::PUT,
            "/api/v1/purchase-requests",
            Some(json!({
                "id": request.id,
                "action": "approve",
                "offers": [
                    { "supplierName": "Acme", "price": "1200.00" },
                    { "supplierName": "Globex", "price": "1150.00" }
                ]
            })),
        )
        .await;

    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["data"]["stage"], 3);
    assert_eq!(body["data"]["approved"], true);
    assert_eq!(body["data"]["rejected"], false);
    let offers = body["data"]["offers"].as_array().unwrap();
    assert_eq!(offers.len(), 2);
    assert!(offers.iter().all(|o| o["status"] == "pending"));
}

#[tokio::test]
async fn save_offers_replaces_the_list_without_advancing() {
    let app = TestApp::new().await;
    let request = app.seed_request().await;

    let response = app
        .request_authenticated(
            Method::PUT,
            "/api/v1/purchase-requests",
            Some(json!({
                "id": request.id,
                "action": "saveOffers",
                "offers": [{ "supplierName": "Acme", "price": "999.00" }]
            })),
        )
        .await;

    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["data"]["stage"], 2);
    assert_eq!(body["data"]["approved"], false);
    assert_eq!(body["data"]["offers"].as_array().unwrap().len(), 1);
}

async fn request_at_price_research(app: &TestApp) -> serde_json::Value {
    let request = app.seed_request().await;
    let response = app
        .request_authenticated(
            Method::PUT,
            "/api/v1/purchase-requests",
            Some(json!({
                "id": request.id,
                "action": "approve",
                "offers": [
                    { "supplierName": "Acme", "price": "1200.00" },
                    { "supplierName": "Globex", "price": "1150.00" },
                    { "supplierName": "Initech", "price": "1175.00" }
                ]
            })),
        )
        .await;
    let body = response_json(response).await;
    assert_eq!(body["data"]["stage"], 3);
    body["data"].clone()
}

#[tokio::test]
async fn stage_three_approve_with_out_of_bounds_index_fails_and_keeps_offers() {
    let app = TestApp::new().await;
    let data = request_at_price_research(&app).await;
    let id = data["id"].as_str().unwrap();

    let response = app
        .request_authenticated(
            Method::PUT,
            "/api/v1/purchase-requests",
            Some(json!({ "id": id, "action": "approve", "selectedOfferIndex": 7 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .request_authenticated(Method::GET, &format!("/api/v1/purchase-requests/{}", id), None)
        .await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["data"]["stage"], 3);
    let offers = body["data"]["offers"].as_array().unwrap();
    assert_eq!(offers.len(), 3);
    assert!(offers.iter().all(|o| o["status"] == "pending"));
    assert_eq!(body["data"]["selectedOffer"], json!(null));
}

#[tokio::test]
async fn stage_three_approve_accepts_exactly_one_offer() {
    let app = TestApp::new().await;
    let data = request_at_price_research(&app).await;
    let id = data["id"].as_str().unwrap();

    let response = app
        .request_authenticated(
            Method::PUT,
            "/api/v1/purchase-requests",
            Some(json!({ "id": id, "action": "approve", "selectedOfferIndex": 1 })),
        )
        .await;

    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["data"]["stage"], 4);
    assert_eq!(body["data"]["approved"], true);

    let offers = body["data"]["offers"].as_array().unwrap();
    let accepted: Vec<_> = offers.iter().filter(|o| o["status"] == "accepted").collect();
    let rejected: Vec<_> = offers.iter().filter(|o| o["status"] == "rejected").collect();
    assert_eq!(accepted.len(), 1);
    assert_eq!(rejected.len(), 2);
    assert_eq!(accepted[0]["supplierName"], "Globex");

    // the snapshot is the accepted offer
    assert_eq!(body["data"]["selectedOffer"]["id"], accepted[0]["id"]);
    assert_eq!(body["data"]["selectedOffer"]["status"], "accepted");
}

#[tokio::test]
async fn stage_three_reject_pins_the_stage_at_price_research() {
    let app = TestApp::new().await;
    let data = request_at_price_research(&app).await;
    let id = data["id"].as_str().unwrap();

    let response = app
        .request_authenticated(
            Method::PUT,
            "/api/v1/purchase-requests",
            Some(json!({ "id": id, "action": "reject", "rejectionReason": "all offers too expensive" })),
        )
        .await;

    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["data"]["stage"], 3);
    assert_eq!(body["data"]["rejected"], true);
    assert_eq!(body["data"]["approved"], false);
}

#[tokio::test]
async fn new_offer_round_is_idempotent_and_clears_review_flags() {
    let app = TestApp::new().await;
    let data = request_at_price_research(&app).await;
    let id = data["id"].as_str().unwrap();

    // reject first so the cleared flags are observable
    app.request_authenticated(
        Method::PUT,
        "/api/v1/purchase-requests",
        Some(json!({ "id": id, "action": "reject", "rejectionReason": "too expensive" })),
    )
    .await;

    let new_offers = json!([
        { "supplierName": "Umbrella", "price": "980.00" },
        { "supplierName": "Hooli", "price": "1010.00" }
    ]);

    let projection = |body: &serde_json::Value| -> Vec<(String, String, String)> {
        body["data"]["offers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|o| {
                (
                    o["supplierName"].as_str().unwrap().to_string(),
                    o["price"].as_str().unwrap().to_string(),
                    o["status"].as_str().unwrap().to_string(),
                )
            })
            .collect()
    };

    let first = app
        .request_authenticated(
            Method::PUT,
            "/api/v1/purchase-requests",
            Some(json!({ "id": id, "action": "newOffer", "newOffers": new_offers })),
        )
        .await;
    let first = expect_status(first, StatusCode::OK).await;
    assert_eq!(first["data"]["approved"], false);
    assert_eq!(first["data"]["rejected"], false);
    assert_eq!(first["data"]["rejectionReason"], json!(null));

    let second = app
        .request_authenticated(
            Method::PUT,
            "/api/v1/purchase-requests",
            Some(json!({ "id": id, "action": "newOffer", "newOffers": new_offers })),
        )
        .await;
    let second = expect_status(second, StatusCode::OK).await;
    assert_eq!(second["data"]["approved"], false);
    assert_eq!(second["data"]["rejected"], false);
    assert_eq!(second["data"]["rejectionReason"], json!(null));

    // same offers both times, no duplication
    assert_eq!(projection(&first).len(), 2);
    assert_eq!(projection(&first), projection(&second));
}

#[tokio::test]
async fn empty_new_offer_list_fails() {
    let app = TestApp::new().await;
    let data = request_at_price_research(&app).await;
    let id = data["id"].as_str().unwrap();

    let response = app
        .request_authenticated(
            Method::PUT,
            "/api/v1/purchase-requests",
            Some(json!({ "id": id, "action": "newOffer", "newOffers": [] })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stage_four_approve_reaches_order_stage_with_fixed_label() {
    let app = TestApp::new().await;
    let data = request_at_price_research(&app).await;
    let id = data["id"].as_str().unwrap();

    app.request_authenticated(
        Method::PUT,
        "/api/v1/purchase-requests",
        Some(json!({ "id": id, "action": "approve", "selectedOfferIndex": 0 })),
    )
    .await;

    let response = app
        .request_authenticated(
            Method::PUT,
            "/api/v1/purchase-requests",
            Some(json!({ "id": id, "action": "approve" })),
        )
        .await;

    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["data"]["stage"], 5);
    assert_eq!(body["data"]["stageLabel"], "Sipariş Onayı");
}

#[tokio::test]
async fn hold_acknowledges_without_advancing() {
    let app = TestApp::new().await;
    let data = request_at_price_research(&app).await;
    let id = data["id"].as_str().unwrap();

    app.request_authenticated(
        Method::PUT,
        "/api/v1/purchase-requests",
        Some(json!({ "id": id, "action": "approve", "selectedOfferIndex": 0 })),
    )
    .await;

    let response = app
        .request_authenticated(
            Method::PUT,
            "/api/v1/purchase-requests",
            Some(json!({ "id": id, "action": "hold" })),
        )
        .await;

    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["data"]["stage"], 4);
    assert_eq!(body["data"]["approved"], true);
}

#[tokio::test]
async fn actions_outside_the_transition_table_fail_naming_the_stage() {
    let app = TestApp::new().await;
    let request = app.seed_request().await;

    // newOffer is a price-research action, not a stage-2 one
    let response = app
        .request_authenticated(
            Method::PUT,
            "/api/v1/purchase-requests",
            Some(json!({
                "id": request.id,
                "action": "newOffer",
                "newOffers": [{ "supplierName": "Acme", "price": "1.00" }]
            })),
        )
        .await;

    let body = expect_status(response, StatusCode::BAD_REQUEST).await;
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("newOffer"));
    assert!(message.contains("stage 2"));
}

#[tokio::test]
async fn acting_on_a_missing_request_returns_404() {
    let app = TestApp::new().await;

    let response = app
        .request_authenticated(
            Method::PUT,
            "/api/v1/purchase-requests",
            Some(json!({
                "id": uuid::Uuid::new_v4(),
                "action": "approve"
            })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_filters_by_stage() {
    let app = TestApp::new().await;
    let _stage_two = app.seed_request().await;
    let advanced = request_at_price_research(&app).await;

    let response = app
        .request_authenticated(Method::GET, "/api/v1/purchase-requests?stage=3", None)
        .await;
    let body = expect_status(response, StatusCode::OK).await;
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], advanced["id"]);
    assert_eq!(body["data"]["pagination"]["total"], 1);

    let response = app
        .request_authenticated(Method::GET, "/api/v1/purchase-requests?stage=9", None)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
