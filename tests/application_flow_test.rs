mod common;

use axum::http::StatusCode;
use serde_json::json;
use smart_submissions::models::user::Role;

use common::{future_date, id_of, past_date, TestApp};

#[tokio::test]
async fn candidate_moves_through_the_pipeline_to_onboarding() {
    let app = TestApp::new();
    let manager = app.account(Role::HiringManager, "Hank", "Manager").await;
    let position = app.position(&manager, "Backend Engineer").await;
    let (candidate, candidate_id) = app.candidate("Ada", "Lovelace").await;

    let application = app.apply(&candidate, position).await;

    let (_, profile) = app.get("/api/candidates/me", &candidate).await;
    assert_eq!(profile["status"], "Applied");
    assert_eq!(profile["jobId"], position.to_string());
    assert_eq!(profile["position"], "Backend Engineer");

    let (status, inbox) = app.get("/api/inbox", &manager).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(inbox.as_array().expect("array").len(), 1);
    assert_eq!(inbox[0]["status"], "unread");

    let (status, reviewed) = app
        .put(&format!("/api/applications/{}/review", application), &manager, json!({}))
        .await;
    assert_eq!(status, StatusCode::OK, "{reviewed}");
    assert_eq!(reviewed["target"], "application");
    assert_eq!(reviewed["status"], "Under Review");

    let (status, scheduled) = app
        .put(
            &format!("/api/applications/{}/schedule", application),
            &manager,
            json!({ "interviewDate": future_date(), "interviewTime": "10:30", "interviewMode": "video" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{scheduled}");
    assert_eq!(scheduled["application"]["status"], "Interview");
    assert_eq!(scheduled["interview"]["status"], "Pending");
    assert_eq!(scheduled["interview"]["candidateFirstName"], "Ada");
    assert_eq!(
        scheduled["application"]["interviews"].as_array().map(Vec::len),
        Some(1)
    );

    let (status, hired) = app
        .put(
            &format!("/api/applications/{}/hire", application),
            &manager,
            json!({ "note": "Great fit" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{hired}");
    assert_eq!(hired["status"], "Hired");
    assert_eq!(hired["onboardingStatus"], "Pending");

    let (_, profile) = app.get(&format!("/api/candidates/{}", candidate_id), &manager).await;
    assert_eq!(profile["status"], "Hired");
    assert_eq!(profile["onboardingStatus"], "Pending");

    let (status, entries) = app.get("/api/onboarding", &manager).await;
    assert_eq!(status, StatusCode::OK);
    let entries = entries.as_array().expect("array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["target"], "application");
    assert_eq!(entries[0]["candidateName"], "Ada Lovelace");

    let (status, updated) = app
        .put(
            &format!("/api/onboarding/{}/status", application),
            &manager,
            json!({ "onboardingStatus": "In Progress" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["onboardingStatus"], "In Progress");

    let (_, view) = app.get(&format!("/api/applications/{}", application), &manager).await;
    assert_eq!(view["onboardingStatus"], "In Progress");
    let kinds: Vec<&str> = view["communication"]
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|c| c["kind"].as_str())
        .collect();
    assert!(kinds.contains(&"onboarding"));

    let (_, profile) = app.get(&format!("/api/candidates/{}", candidate_id), &manager).await;
    assert_eq!(profile["onboardingStatus"], "In Progress");
}

#[tokio::test]
async fn duplicate_applications_and_submissions_conflict() {
    let app = TestApp::new();
    let manager = app.account(Role::Employer, "Eve", "Employer").await;
    let recruiter = app.account(Role::Recruiter, "Rex", "Recruiter").await;
    let position = app.position(&manager, "Data Analyst").await;
    let (candidate, candidate_id) = app.candidate("Grace", "Hopper").await;

    app.apply(&candidate, position).await;
    let (status, _) = app
        .post("/api/applications", &candidate, json!({ "positionId": position }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let submission = json!({ "candidateId": candidate_id, "positionId": position, "notes": "Strong SQL" });
    let (status, body) = app.post("/api/submissions", &recruiter, submission.clone()).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["source"], "recruiter");
    let (status, _) = app.post("/api/submissions", &recruiter, submission).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, all) = app.get("/api/applications", &manager).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().expect("array").len(), 2);

    let (_, direct) = app.get("/api/applications?source=direct", &manager).await;
    assert_eq!(direct.as_array().expect("array").len(), 1);

    let (status, _) = app
        .post("/api/submissions", &candidate, json!({ "candidateId": candidate_id, "positionId": position }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn closed_positions_refuse_applications() {
    let app = TestApp::new();
    let manager = app.account(Role::HiringManager, "Hal", "Manager").await;
    let position = app.position(&manager, "QA Engineer").await;
    let (candidate, _) = app.candidate("Linus", "T").await;

    let (status, closed) = app
        .put(&format!("/api/positions/{}/close", position), &manager, json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(closed["status"], "Closed");

    let (status, _) = app
        .post("/api/applications", &candidate, json!({ "positionId": position }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn listing_survives_deleted_position_and_candidate() {
    let app = TestApp::new();
    let manager = app.account(Role::HiringManager, "Hope", "Manager").await;
    let admin = app.account(Role::Admin, "Ann", "Admin").await;
    let position = app.position(&manager, "Designer").await;
    let (candidate, candidate_id) = app.candidate("Margaret", "Hamilton").await;
    let application = app.apply(&candidate, position).await;

    let (status, _) = app.delete(&format!("/api/positions/{}", position), &manager).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.delete(&format!("/api/candidates/{}", candidate_id), &admin).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, list) = app.get("/api/applications", &manager).await;
    assert_eq!(status, StatusCode::OK, "{list}");
    let list = list.as_array().expect("array");
    assert_eq!(list.len(), 1);
    assert_eq!(id_of(&list[0]), application);
    assert_eq!(list[0]["positionTitle"], "Unknown Position");
    assert_eq!(list[0]["candidateName"], "Name Unavailable");
}

#[tokio::test]
async fn permissive_mode_allows_any_move() {
    let app = TestApp::new();
    let manager = app.account(Role::HiringManager, "Paul", "Manager").await;
    let position = app.position(&manager, "SRE").await;
    let (candidate, _) = app.candidate("Ken", "Thompson").await;
    let application = app.apply(&candidate, position).await;

    let (status, _) = app
        .put(&format!("/api/applications/{}/reject", application), &manager, json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .put(
            &format!("/api/applications/{}/status", application),
            &manager,
            json!({ "status": "Screening" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["status"], "Screening");

    // no date check without strict mode
    let (status, _) = app
        .put(
            &format!("/api/applications/{}/schedule", application),
            &manager,
            json!({ "interviewDate": "next tuesday" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn strict_mode_blocks_terminal_and_backward_moves() {
    let app = TestApp::strict();
    let manager = app.account(Role::HiringManager, "Sam", "Strict").await;
    let position = app.position(&manager, "Platform Engineer").await;
    let (candidate, _) = app.candidate("Dennis", "Ritchie").await;
    let application = app.apply(&candidate, position).await;
    let uri = |action: &str| format!("/api/applications/{}/{}", application, action);

    let (status, _) = app.put(&uri("review"), &manager, json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .put(&uri("status"), &manager, json!({ "status": "Applied" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .put(&uri("schedule"), &manager, json!({ "interviewDate": past_date() }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .put(&uri("schedule"), &manager, json!({ "interviewDate": "soon" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.put(&uri("reject"), &manager, json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.put(&uri("hire"), &manager, json!({})).await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");
}

#[tokio::test]
async fn legacy_candidate_status_is_a_transition_target() {
    let app = TestApp::new();
    let recruiter = app.account(Role::Recruiter, "Ray", "Recruiter").await;
    let manager = app.account(Role::HiringManager, "Meg", "Manager").await;

    let (status, created) = app
        .post(
            "/api/candidates",
            &recruiter,
            json!({ "firstName": "Alan", "lastName": "Turing", "email": "alan@example.com" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    let candidate_id = id_of(&created);

    let (status, hired) = app
        .put(&format!("/api/applications/{}/hire", candidate_id), &manager, json!({}))
        .await;
    assert_eq!(status, StatusCode::OK, "{hired}");
    assert_eq!(hired["target"], "candidate");
    assert_eq!(hired["onboardingStatus"], "Pending");
    assert_eq!(hired["candidate"]["status"], "Hired");

    let (_, entries) = app.get("/api/onboarding", &manager).await;
    let entries = entries.as_array().expect("array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["target"], "candidate");
    assert_eq!(entries[0]["positionTitle"], "Unknown Position");

    let (_, history) = app.get("/api/applications/history/alan@example.com", &recruiter).await;
    let history = history.as_array().expect("array");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["status"], "Hired");
}

#[tokio::test]
async fn candidates_only_see_their_own_applications() {
    let app = TestApp::new();
    let manager = app.account(Role::HiringManager, "Mia", "Manager").await;
    let position = app.position(&manager, "Support Engineer").await;
    let (first, _) = app.candidate("One", "Applicant").await;
    let (second, _) = app.candidate("Two", "Applicant").await;

    let first_app = app.apply(&first, position).await;
    app.apply(&second, position).await;

    let (status, own) = app.get("/api/applications", &first).await;
    assert_eq!(status, StatusCode::OK);
    let own = own.as_array().expect("array");
    assert_eq!(own.len(), 1);
    assert_eq!(id_of(&own[0]), first_app);

    let (status, _) = app.get(&format!("/api/applications/{}", first_app), &second).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .put(&format!("/api/applications/{}/review", first_app), &first, json!({}))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let interviewer = app.account(Role::Interviewer, "Ian", "Interviewer").await;
    let (status, _) = app.get("/api/applications", &interviewer).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn scheduling_moves_candidate_to_interview_despite_other_hire() {
    let app = TestApp::new();
    let manager = app.account(Role::HiringManager, "Hugo", "Manager").await;
    let first = app.position(&manager, "Backend Engineer").await;
    let second = app.position(&manager, "Staff Engineer").await;
    let (candidate, candidate_id) = app.candidate("Leslie", "Lamport").await;
    let first_app = app.apply(&candidate, first).await;
    let second_app = app.apply(&candidate, second).await;

    let (status, _) = app
        .put(&format!("/api/applications/{}/hire", first_app), &manager, json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, profile) = app.get(&format!("/api/candidates/{}", candidate_id), &manager).await;
    assert_eq!(profile["status"], "Hired");

    let (status, body) = app
        .put(
            &format!("/api/applications/{}/schedule", second_app),
            &manager,
            json!({ "interviewDate": future_date(), "interviewTime": "10:00" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (_, profile) = app.get(&format!("/api/candidates/{}", candidate_id), &manager).await;
    assert_eq!(profile["status"], "Interview");
    assert_eq!(profile["jobId"], second.to_string());
    assert_eq!(profile["position"], "Staff Engineer");
}

#[tokio::test]
async fn onboarding_status_accepts_any_order() {
    let app = TestApp::new();
    let manager = app.account(Role::HiringManager, "Olaf", "Manager").await;
    let recruiter = app.account(Role::Recruiter, "Rosa", "Recruiter").await;
    let position = app.position(&manager, "Release Engineer").await;
    let (candidate, candidate_id) = app.candidate("Bjarne", "Stroustrup").await;
    let application = app.apply(&candidate, position).await;

    let (status, _) = app
        .put(&format!("/api/applications/{}/hire", application), &manager, json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, created) = app
        .post(
            "/api/candidates",
            &recruiter,
            json!({ "firstName": "Guido", "lastName": "Rossum", "email": "guido@example.com" }),
        )
        .await;
    let legacy = id_of(&created);
    let (status, _) = app
        .put(&format!("/api/applications/{}/hire", legacy), &manager, json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);

    for (target, kind) in [(application, "application"), (legacy, "candidate")] {
        let uri = format!("/api/onboarding/{}/status", target);

        let (status, body) = app
            .put(&uri, &manager, json!({ "onboardingStatus": "Completed" }))
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["target"], kind);
        assert_eq!(body["onboardingStatus"], "Completed");

        let (status, body) = app
            .put(&uri, &manager, json!({ "onboardingStatus": "Pending" }))
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["onboardingStatus"], "Pending");
    }

    let (_, profile) = app.get(&format!("/api/candidates/{}", candidate_id), &manager).await;
    assert_eq!(profile["onboardingStatus"], "Pending");
    let (_, profile) = app.get(&format!("/api/candidates/{}", legacy), &manager).await;
    assert_eq!(profile["onboardingStatus"], "Pending");

    let (status, _) = app
        .put(
            &format!("/api/onboarding/{}/status", application),
            &recruiter,
            json!({ "onboardingStatus": "Completed" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn rejecting_the_only_hire_clears_candidate_onboarding() {
    let app = TestApp::new();
    let manager = app.account(Role::HiringManager, "Uma", "Manager").await;
    let position = app.position(&manager, "Data Engineer").await;
    let (candidate, candidate_id) = app.candidate("Edgar", "Codd").await;
    let application = app.apply(&candidate, position).await;

    app.put(&format!("/api/applications/{}/hire", application), &manager, json!({}))
        .await;
    let (_, profile) = app.get(&format!("/api/candidates/{}", candidate_id), &manager).await;
    assert_eq!(profile["onboardingStatus"], "Pending");

    let (status, _) = app
        .put(&format!("/api/applications/{}/reject", application), &manager, json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, profile) = app.get(&format!("/api/candidates/{}", candidate_id), &manager).await;
    assert_eq!(profile["status"], "Rejected");
    assert!(profile["onboardingStatus"].is_null());
}
