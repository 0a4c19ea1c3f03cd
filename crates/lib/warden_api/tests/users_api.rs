//! User CRUD routes and the auth gate.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use warden_core::store::UserStore;

use common::{empty_request, json_request, test_app};

#[tokio::test]
async fn health_is_public() {
    let t = test_app();
    let (status, body) = t.send(empty_request("GET", "/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], warden_core::version());
}

#[tokio::test]
async fn protected_route_without_header_never_reaches_handler() {
    let t = test_app();
    let id = t.seed("a@b.com", "secret1", 0).await;

    let (status, body) = t
        .send(empty_request("DELETE", &format!("/users/{id}"), None))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
    assert!(t.store.find_by_id(id).await.unwrap().is_some());
}

#[tokio::test]
async fn malformed_or_foreign_scheme_is_rejected() {
    let t = test_app();
    let id = t.seed("a@b.com", "secret1", 0).await;
    let token = t.token_for(id);

    for header in [token.clone(), format!("Basic {token}"), "Bearer garbage".into()] {
        let request = axum::http::Request::builder()
            .method("GET")
            .uri("/users")
            .header(axum::http::header::AUTHORIZATION, header)
            .body(axum::body::Body::empty())
            .unwrap();
        let (status, _) = t.send(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn search_filters_by_name_or_nick() {
    let t = test_app();
    let id = t.seed("a@b.com", "secret1", 0).await;
    let token = t.token_for(id);
    for (name, nick, email) in [
        ("Maria Souza", "msouza", "m@b.com"),
        ("Joao", "JSOUZA", "j@b.com"),
        ("Pedro", "pedro", "p@b.com"),
    ] {
        let (status, _) = t
            .send(json_request(
                "POST",
                "/users",
                json!({"name": name, "nick": nick, "email": email, "password": "pw"}),
                Some(&token),
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = t
        .send(empty_request("GET", "/users?user=SOUZA", Some(&token)))
        .await;
    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().expect("array");
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u.get("password").is_none()));

    let (_, body) = t.send(empty_request("GET", "/users", Some(&token))).await;
    assert_eq!(body.as_array().expect("array").len(), 4);
}

#[tokio::test]
async fn get_user_and_missing_user() {
    let t = test_app();
    let id = t.seed("a@b.com", "secret1", 3).await;
    let token = t.token_for(id);

    let (status, body) = t
        .send(empty_request("GET", &format!("/users/{id}"), Some(&token)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    assert_eq!(body["email"], "a@b.com");
    assert_eq!(body["role"], 3);

    let (status, body) = t
        .send(empty_request("GET", "/users/9999", Some(&token)))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn non_numeric_id_is_client_error() {
    let t = test_app();
    let id = t.seed("a@b.com", "secret1", 0).await;
    let token = t.token_for(id);

    let (status, _) = t
        .send(empty_request("GET", "/users/abc", Some(&token)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_user_trims_and_persists() {
    let t = test_app();
    let id = t.seed("a@b.com", "secret1", 0).await;
    let token = t.token_for(id);

    let (status, _) = t
        .send(json_request(
            "PUT",
            &format!("/users/{id}"),
            json!({"name": "  New Name ", "nick": "newnick", "email": "new@b.com"}),
            Some(&token),
        ))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let user = t.store.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(user.name, "New Name");
    assert_eq!(user.nick, "newnick");
    assert_eq!(user.email, "new@b.com");
}

#[tokio::test]
async fn update_user_validation_and_missing_user() {
    let t = test_app();
    let id = t.seed("a@b.com", "secret1", 0).await;
    let token = t.token_for(id);

    let (status, body) = t
        .send(json_request(
            "PUT",
            &format!("/users/{id}"),
            json!({"name": "Name", "nick": "", "email": "new@b.com"}),
            Some(&token),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "nick");

    let (status, _) = t
        .send(json_request(
            "PUT",
            "/users/9999",
            json!({"name": "Name", "nick": "nick", "email": "new@b.com"}),
            Some(&token),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_of_missing_user_with_taken_email_is_not_found() {
    let t = test_app();
    let id = t.seed("a@b.com", "secret1", 0).await;
    let token = t.token_for(id);

    let (status, body) = t
        .send(json_request(
            "PUT",
            "/users/9999",
            json!({"name": "Name", "nick": "nick", "email": "a@b.com"}),
            Some(&token),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn update_to_another_users_email_conflicts() {
    let t = test_app();
    let id = t.seed("a@b.com", "secret1", 0).await;
    t.seed("b@b.com", "secret1", 0).await;
    let token = t.token_for(id);

    let (status, _) = t
        .send(json_request(
            "PUT",
            &format!("/users/{id}"),
            json!({"name": "Name", "nick": "nick", "email": "b@b.com"}),
            Some(&token),
        ))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn delete_user_removes_record() {
    let t = test_app();
    let id = t.seed("a@b.com", "secret1", 0).await;
    let token = t.token_for(id);

    let (status, _) = t
        .send(empty_request("DELETE", &format!("/users/{id}"), Some(&token)))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(t.store.find_by_id(id).await.unwrap().is_none());

    let (status, _) = t
        .send(empty_request("DELETE", &format!("/users/{id}"), Some(&token)))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
