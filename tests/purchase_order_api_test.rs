mod common;

use axum::http::StatusCode;
use serde_json::json;
use smart_submissions::models::user::Role;

use common::{id_of, TestApp};

#[tokio::test]
async fn purchase_order_is_requested_then_decided_once() {
    let app = TestApp::new();
    let manager = app.account(Role::HiringManager, "Pat", "Manager").await;
    let recruiter = app.account(Role::Recruiter, "Quinn", "Recruiter").await;
    let position = app.position(&manager, "Contract Engineer").await;
    let (candidate, candidate_id) = app.candidate("Radia", "Perlman").await;
    let application = app.apply(&candidate, position).await;

    let (status, order) = app
        .post(
            "/api/purchase-orders",
            &recruiter,
            json!({
                "applicationId": application,
                "vendor": "Staffing Co",
                "amount": "1500.50",
                "currency": "eur",
                "description": "Three month contract"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{order}");
    assert_eq!(order["status"], "Pending");
    assert_eq!(order["currency"], "EUR");
    assert_eq!(order["candidate"], candidate_id.to_string());
    assert_eq!(order["position"], position.to_string());
    let uri = format!("/api/purchase-orders/{}", id_of(&order));

    let (status, _) = app
        .put(&format!("{}/status", uri), &recruiter, json!({ "status": "Approved" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .put(&format!("{}/status", uri), &manager, json!({ "status": "Pending" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, decided) = app
        .put(&format!("{}/status", uri), &manager, json!({ "status": "Approved" }))
        .await;
    assert_eq!(status, StatusCode::OK, "{decided}");
    assert_eq!(decided["status"], "Approved");
    assert_eq!(decided["decidedBy"], manager.id().to_string());

    let (status, _) = app
        .put(&format!("{}/status", uri), &manager, json!({ "status": "Rejected" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, inbox) = app.get("/api/inbox", &recruiter).await;
    assert_eq!(inbox.as_array().map(Vec::len), Some(1));

    let (status, listed) = app.get("/api/purchase-orders", &recruiter).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn purchase_orders_need_positive_amounts_and_staff() {
    let app = TestApp::new();
    let recruiter = app.account(Role::Recruiter, "Val", "Recruiter").await;
    let (candidate, _) = app.candidate("Niklaus", "Wirth").await;

    let (status, _) = app
        .post("/api/purchase-orders", &recruiter, json!({ "vendor": "Acme", "amount": 0 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, order) = app
        .post("/api/purchase-orders", &recruiter, json!({ "vendor": "Acme", "amount": 250 }))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{order}");
    assert_eq!(order["currency"], "USD");

    let (status, _) = app
        .post("/api/purchase-orders", &candidate, json!({ "vendor": "Acme", "amount": 10 }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .get(&format!("/api/purchase-orders/{}", uuid::Uuid::new_v4()), &recruiter)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
