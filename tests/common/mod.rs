#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;
use uuid::Uuid;

use smart_submissions::{
    app::build_router,
    config::{Config, LogFormat, StorageBackend},
    models::user::{Role, User},
    repository::{memory::MemoryStore, DynStore},
    utils::{crypto::hash_password, token::issue_token},
    AppState,
};

pub const JWT_SECRET: &str = "test_secret_key";
pub const PASSWORD: &str = "secret123";

pub fn test_config(strict: bool) -> Config {
    Config {
        server_address: "127.0.0.1:0".to_string(),
        storage_backend: StorageBackend::Memory,
        database_url: None,
        db_max_connections: 1,
        jwt_secret: JWT_SECRET.to_string(),
        jwt_expiry_hours: 1,
        public_rps: 1000,
        api_rps: 1000,
        strict_transitions: strict,
        log_format: LogFormat::Pretty,
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: DynStore,
}

/// A seeded, approved account and a ready bearer token for it.
pub struct Account {
    pub user: User,
    pub token: String,
}

impl Account {
    pub fn id(&self) -> Uuid {
        self.user.id
    }
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_mode(false)
    }

    pub fn strict() -> Self {
        Self::with_mode(true)
    }

    fn with_mode(strict: bool) -> Self {
        let store: DynStore = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), Arc::new(test_config(strict)));
        Self {
            router: build_router(state),
            store,
        }
    }

    pub async fn account(&self, role: Role, first_name: &str, last_name: &str) -> Account {
        let email = format!("{}.{}@example.com", first_name.to_lowercase(), Uuid::new_v4().simple());
        let mut user = User::new(
            &email,
            hash_password(PASSWORD).expect("hash"),
            role,
            json!({ "firstName": first_name, "lastName": last_name }),
        );
        user.is_approved = true;
        self.store.insert_user(&user).await.expect("seed user");
        let token = issue_token(&user, JWT_SECRET, 1).expect("token");
        Account { user, token }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<JsonValue>,
    ) -> (StatusCode, JsonValue) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let req = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let res = self.router.clone().oneshot(req).await.expect("response");
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.expect("body");
        let json = if bytes.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, who: &Account) -> (StatusCode, JsonValue) {
        self.request(Method::GET, uri, Some(&who.token), None).await
    }

    pub async fn post(&self, uri: &str, who: &Account, body: JsonValue) -> (StatusCode, JsonValue) {
        self.request(Method::POST, uri, Some(&who.token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, who: &Account, body: JsonValue) -> (StatusCode, JsonValue) {
        self.request(Method::PUT, uri, Some(&who.token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, who: &Account) -> (StatusCode, JsonValue) {
        self.request(Method::DELETE, uri, Some(&who.token), None).await
    }

    /// Open position owned by `manager`.
    pub async fn position(&self, manager: &Account, title: &str) -> Uuid {
        let (status, body) = self
            .post(
                "/api/positions",
                manager,
                json!({ "title": title, "department": "Engineering", "requiredSkills": ["rust"] }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        id_of(&body)
    }

    /// Candidate account with a linked profile.
    pub async fn candidate(&self, first_name: &str, last_name: &str) -> (Account, Uuid) {
        let account = self.account(Role::Candidate, first_name, last_name).await;
        let (status, body) = self
            .post(
                "/api/candidates",
                &account,
                json!({
                    "firstName": first_name,
                    "lastName": last_name,
                    "email": account.user.email,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        let id = id_of(&body);
        (account, id)
    }

    pub async fn apply(&self, candidate: &Account, position: Uuid) -> Uuid {
        let (status, body) = self
            .post("/api/applications", candidate, json!({ "positionId": position }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        id_of(&body)
    }
}

pub fn id_of(body: &JsonValue) -> Uuid {
    body["id"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .expect("id in body")
}

pub fn future_date() -> String {
    (chrono::Utc::now() + chrono::Duration::days(7))
        .format("%Y-%m-%d")
        .to_string()
}

pub fn past_date() -> String {
    (chrono::Utc::now() - chrono::Duration::days(7))
        .format("%Y-%m-%d")
        .to_string()
}
