mod common;

use axum::http::StatusCode;
use serde_json::json;
use smart_submissions::models::user::Role;

use common::{future_date, id_of, past_date, TestApp};

#[tokio::test]
async fn standalone_interview_copies_names_and_notifies_manager() {
    let app = TestApp::new();
    let manager = app.account(Role::HiringManager, "Nora", "Manager").await;
    let recruiter = app.account(Role::Recruiter, "Rob", "Recruiter").await;
    let interviewer = app.account(Role::Interviewer, "Ivy", "Interviewer").await;
    app.position(&manager, "Mobile Developer").await;
    let (_, candidate_id) = app.candidate("Barbara", "Liskov").await;

    let (status, interview) = app
        .post(
            "/api/interviews",
            &recruiter,
            json!({
                "candidateId": candidate_id,
                "interviewerId": interviewer.id(),
                "jobPosition": "Mobile Developer",
                "date": future_date(),
                "time": "14:00",
                "notifyManager": true
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{interview}");
    assert_eq!(interview["candidateFirstName"], "Barbara");
    assert_eq!(interview["interviewerName"], "Ivy Interviewer");
    assert_eq!(interview["status"], "Pending");
    assert_eq!(interview["result"], "Pending");

    let (_, inbox) = app.get("/api/inbox", &manager).await;
    let inbox = inbox.as_array().expect("array");
    assert_eq!(inbox.len(), 1);
    assert!(inbox[0]["subject"]
        .as_str()
        .unwrap_or_default()
        .contains("Mobile Developer"));

    let (status, mine) = app.get("/api/interviews/mine", &interviewer).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine.as_array().map(Vec::len), Some(1));

    let (status, visible) = app.get("/api/interviews", &interviewer).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(visible.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn interview_dates_must_be_valid_and_upcoming() {
    let app = TestApp::new();
    let recruiter = app.account(Role::Recruiter, "Rae", "Recruiter").await;

    let base = json!({ "candidateFirstName": "Walk", "candidateLastName": "In" });
    let with_date = |date: String| {
        let mut body = base.clone();
        body["date"] = json!(date);
        body
    };

    let (status, _) = app.post("/api/interviews", &recruiter, with_date(past_date())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post("/api/interviews", &recruiter, with_date("31/31/2020".to_string()))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post("/api/interviews", &recruiter, json!({ "date": future_date() }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.post("/api/interviews", &recruiter, with_date(future_date())).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["candidateFirstName"], "Walk");
}

#[tokio::test]
async fn passed_interviews_are_locked() {
    let app = TestApp::new();
    let recruiter = app.account(Role::Recruiter, "Ron", "Recruiter").await;

    let (_, created) = app
        .post(
            "/api/interviews",
            &recruiter,
            json!({ "candidateFirstName": "Edsger", "candidateLastName": "Dijkstra", "date": future_date() }),
        )
        .await;
    let uri = format!("/api/interviews/{}", id_of(&created));

    let (status, updated) = app
        .put(&uri, &recruiter, json!({ "result": "Pass", "rating": 5, "status": "Completed" }))
        .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["result"], "Pass");

    let (status, _) = app.put(&uri, &recruiter, json!({ "notes": "changed my mind" })).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.put(&uri, &recruiter, json!({ "rating": 9 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.delete(&uri, &recruiter).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.get(&uri, &recruiter).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn send_link_schedules_and_reaches_the_candidate() {
    let app = TestApp::new();
    let manager = app.account(Role::HiringManager, "Max", "Manager").await;
    let interviewer = app.account(Role::Interviewer, "Iris", "Interviewer").await;
    let outsider = app.account(Role::Interviewer, "Otto", "Outsider").await;
    let position = app.position(&manager, "Security Engineer").await;
    let (candidate, _) = app.candidate("Whitfield", "Diffie").await;
    let application = app.apply(&candidate, position).await;

    let (status, scheduled) = app
        .put(
            &format!("/api/applications/{}/schedule", application),
            &manager,
            json!({ "interviewDate": future_date(), "interviewerId": interviewer.id() }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{scheduled}");
    let interview = id_of(&scheduled["interview"]);
    let uri = format!("/api/interviews/{}/send-link", interview);
    let link = json!({ "meetingLink": "https://meet.example.com/abc" });

    let (status, _) = app.put(&uri, &outsider, link.clone()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .put(&uri, &interviewer, json!({ "meetingLink": "not a url" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, sent) = app.put(&uri, &interviewer, link).await;
    assert_eq!(status, StatusCode::OK, "{sent}");
    assert_eq!(sent["status"], "Scheduled");
    assert_eq!(sent["meetingLink"], "https://meet.example.com/abc");

    let (_, view) = app.get(&format!("/api/applications/{}", application), &manager).await;
    assert_eq!(view["interviews"][0]["status"], "Scheduled");

    let (_, inbox) = app.get("/api/inbox", &candidate).await;
    let inbox = inbox.as_array().expect("array");
    assert_eq!(inbox.len(), 1);
    assert!(inbox[0]["body"]
        .as_str()
        .unwrap_or_default()
        .contains("https://meet.example.com/abc"));

    let (status, own) = app.get("/api/interviews", &candidate).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(own.as_array().map(Vec::len), Some(1));
}
