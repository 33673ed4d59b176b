//! Shared helpers for the HTTP integration tests
//!
//! Every test gets its own in-memory database and drives the full router
//! (guard, role gates, tower-http layers) through `tower::ServiceExt::oneshot`.
#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use http::{HeaderMap, Method, Request, StatusCode, header};
use rms_server::auth::JwtConfig;
use rms_server::db::DbService;
use rms_server::db::repository::{dining_table, menu, user};
use rms_server::{Config, ServerState, build_app};
use serde_json::Value;
use shared::models::{DiningTable, DiningTableCreate, Menu, MenuCreate, Role, User, UserCreate};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-integration-test";

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// `token=...` pair from the Set-Cookie header
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("token="))
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.into(),
        expiration_minutes: 60,
        issuer: "rms-server".into(),
        audience: "rms-clients".into(),
    }
}

pub async fn spawn_app() -> TestApp {
    let db = DbService::in_memory().await.expect("in-memory database");
    let config = Config::with_overrides("sqlite::memory:", jwt_config());
    let state = ServerState::new(config, db);
    let app = build_app(&state);
    TestApp { app, state }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, cookie, None).await
    }

    pub async fn seed_user(&self, username: &str, password: &str, role: Role) -> User {
        user::create(
            self.state.pool(),
            UserCreate {
                username: username.into(),
                password: password.into(),
                name: format!("{username} name"),
                role,
                email: None,
                telephone: None,
            },
        )
        .await
        .unwrap()
    }

    pub async fn seed_table(&self, name: &str, passcode: &str) -> DiningTable {
        dining_table::create(
            self.state.pool(),
            DiningTableCreate {
                name: name.into(),
                seat: 4,
                passcode: passcode.into(),
                status: None,
            },
        )
        .await
        .unwrap()
    }

    pub async fn seed_menu(&self, name: &str, price: f64) -> Menu {
        menu::create(
            self.state.pool(),
            MenuCreate {
                name: name.into(),
                price,
                description: None,
                is_available: Some(true),
            },
        )
        .await
        .unwrap()
    }

    /// Log in and return the `token=...` cookie
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .request(
                Method::POST,
                "/auth/login",
                None,
                Some(serde_json::json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {:?}", response.body);
        response.session_cookie().expect("login sets the token cookie")
    }

    /// Seed a user with `role` and return its session cookie
    pub async fn login_as(&self, role: Role) -> String {
        let username = format!("{}_user", role.as_str().to_lowercase());
        self.seed_user(&username, "password1", role).await;
        self.login(&username, "password1").await
    }

    /// Table login; returns the cookie and the response body
    pub async fn table_login(&self, table_id: &str, passcode: &str) -> (String, Value) {
        let response = self
            .request(
                Method::POST,
                "/auth/table-login",
                None,
                Some(serde_json::json!({ "id": table_id, "passcode": passcode })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "table login failed: {:?}", response.body);
        let cookie = response.session_cookie().expect("table login sets the token cookie");
        (cookie, response.body)
    }
}
