//! User management endpoints

mod common;

use common::spawn_app;
use http::{Method, StatusCode};
use serde_json::json;
use shared::models::Role;

#[tokio::test]
async fn manager_creates_and_lists_users() {
    let app = spawn_app().await;
    let manager = app.login_as(Role::Manager).await;

    let created = app
        .request(
            Method::POST,
            "/users",
            Some(&manager),
            Some(json!({
                "username": "alice",
                "password": "secret12",
                "name": "Alice",
                "role": "CHEF",
                "telephone": "0123456789",
            })),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.body["role"], "CHEF");
    assert!(created.body.get("password").is_none());

    let listed = app.get("/users", Some(&manager)).await;
    assert_eq!(listed.body.as_array().unwrap().len(), 2);

    // the new account can log in
    app.login("alice", "secret12").await;
}

#[tokio::test]
async fn duplicate_username_conflicts() {
    let app = spawn_app().await;
    let manager = app.login_as(Role::Manager).await;
    let body = json!({
        "username": "alice",
        "password": "secret12",
        "name": "Alice",
        "role": "STAFF",
    });

    let first = app
        .request(Method::POST, "/users", Some(&manager), Some(body.clone()))
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app.request(Method::POST, "/users", Some(&manager), Some(body)).await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["code"], "E0004");
}

#[tokio::test]
async fn update_rehashes_password() {
    let app = spawn_app().await;
    let manager = app.login_as(Role::Manager).await;
    let alice = app.seed_user("alice", "secret12", Role::Staff).await;

    let updated = app
        .request(
            Method::PATCH,
            &format!("/users/{}", alice.id),
            Some(&manager),
            Some(json!({ "password": "changed99", "role": "CHEF" })),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["role"], "CHEF");
    assert_eq!(updated.body["username"], "alice");

    app.login("alice", "changed99").await;
}

#[tokio::test]
async fn rename_to_taken_username_conflicts() {
    let app = spawn_app().await;
    let manager = app.login_as(Role::Manager).await;
    app.seed_user("alice", "secret12", Role::Staff).await;
    let bob = app.seed_user("bobby", "secret12", Role::Staff).await;

    let res = app
        .request(
            Method::PATCH,
            &format!("/users/{}", bob.id),
            Some(&manager),
            Some(json!({ "username": "alice" })),
        )
        .await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.body["code"], "E0004");
    assert_eq!(res.body["message"], "Username 'alice' already exists");
}

#[tokio::test]
async fn delete_returns_prior_projection_then_not_found() {
    let app = spawn_app().await;
    let manager = app.login_as(Role::Manager).await;
    let alice = app.seed_user("alice", "secret12", Role::Staff).await;
    let uri = format!("/users/{}", alice.id);

    let deleted = app.request(Method::DELETE, &uri, Some(&manager), None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["username"], "alice");

    let again = app.request(Method::DELETE, &uri, Some(&manager), None).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);

    let fetched = app.get(&uri, Some(&manager)).await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn manager_cannot_delete_self() {
    let app = spawn_app().await;
    let manager = app.login_as(Role::Manager).await;
    let session = app.get("/auth/check-session", Some(&manager)).await;
    let id = session.body["id"].as_str().unwrap().to_string();

    let response = app
        .request(Method::DELETE, &format!("/users/{id}"), Some(&manager), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn any_staff_session_reads_the_count() {
    let app = spawn_app().await;
    let chef = app.login_as(Role::Chef).await;

    let count = app.get("/users/count", Some(&chef)).await;
    assert_eq!(count.status, StatusCode::OK);
    assert_eq!(count.body, json!({ "count": 1 }));
}
