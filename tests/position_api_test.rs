mod common;

use axum::http::StatusCode;
use serde_json::json;
use smart_submissions::models::user::Role;

use common::{id_of, TestApp};

#[tokio::test]
async fn only_owner_or_admin_changes_a_position() {
    let app = TestApp::new();
    let owner = app.account(Role::HiringManager, "Olive", "Owner").await;
    let rival = app.account(Role::HiringManager, "Rick", "Rival").await;
    let admin = app.account(Role::Admin, "Ada", "Admin").await;
    let recruiter = app.account(Role::Recruiter, "Rudy", "Recruiter").await;

    let (status, _) = app
        .post("/api/positions", &recruiter, json!({ "title": "Nope" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let position = app.position(&owner, "Frontend Engineer").await;
    let uri = format!("/api/positions/{}", position);

    let (status, _) = app.put(&uri, &rival, json!({ "openings": 3 })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, updated) = app.put(&uri, &owner, json!({ "openings": 3 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["openings"], 3);

    let (status, _) = app.put(&uri, &owner, json!({ "openings": 0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, listed) = app.get("/api/positions?status=Open", &recruiter).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let (status, _) = app.delete(&uri, &admin).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.get(&uri, &owner).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn hiring_manager_must_hold_a_manager_role() {
    let app = TestApp::new();
    let admin = app.account(Role::Admin, "Al", "Admin").await;
    let manager = app.account(Role::HiringManager, "Mona", "Manager").await;
    let interviewer = app.account(Role::Interviewer, "Ike", "Interviewer").await;

    let (status, _) = app
        .post(
            "/api/positions",
            &admin,
            json!({ "title": "Ops", "hiringManager": interviewer.id() }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .post(
            "/api/positions",
            &admin,
            json!({ "title": "Ops", "hiringManager": manager.id() }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["hiringManager"], manager.id().to_string());

    // the assigned manager now owns it
    let (status, _) = app
        .put(&format!("/api/positions/{}/close", id_of(&body)), &manager, json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn renaming_a_position_relabels_candidates() {
    let app = TestApp::new();
    let manager = app.account(Role::HiringManager, "Ruth", "Manager").await;
    let position = app.position(&manager, "Junior Dev").await;
    let (candidate, candidate_id) = app.candidate("John", "Backus").await;
    app.apply(&candidate, position).await;

    let (status, _) = app
        .put(&format!("/api/positions/{}", position), &manager, json!({ "title": "Software Engineer I" }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, profile) = app.get(&format!("/api/candidates/{}", candidate_id), &manager).await;
    assert_eq!(profile["position"], "Software Engineer I");
}

#[tokio::test]
async fn candidate_profiles_follow_ownership_rules() {
    let app = TestApp::new();
    let recruiter = app.account(Role::Recruiter, "Rina", "Recruiter").await;
    let interviewer = app.account(Role::Interviewer, "Igor", "Interviewer").await;
    let (candidate, candidate_id) = app.candidate("Tony", "Hoare").await;
    let (stranger, _) = app.candidate("Some", "One").await;

    let (status, _) = app
        .post(
            "/api/candidates",
            &candidate,
            json!({ "firstName": "Tony", "lastName": "Hoare", "email": "second@example.com" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .post(
            "/api/candidates",
            &recruiter,
            json!({ "firstName": "X", "lastName": "Y", "email": "xy@example.com", "status": "Hired" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let uri = format!("/api/candidates/{}", candidate_id);
    let (status, _) = app.get(&uri, &stranger).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.get(&uri, &interviewer).await;
    assert_eq!(status, StatusCode::OK);

    let (status, updated) = app
        .put(&uri, &candidate, json!({ "phone": "+1 555 0100", "skills": ["quicksort"] }))
        .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["phone"], "+1 555 0100");

    let (status, _) = app.delete(&uri, &recruiter).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get("/api/candidates", &stranger).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, listed) = app.get("/api/candidates", &recruiter).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(2));
}
