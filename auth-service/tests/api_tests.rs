mod common;

use auth::TokenKind;
use auth_service::domain::auth::models::Payload;
use auth_service::domain::auth::models::Role;
use common::token_pair;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    let id = app.register_user("nicola", "pass_word!").await;

    let response = app
        .post("/auth/login")
        .json(&json!({
            "name": "nicola",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let (access_token, refresh_token) = token_pair(response).await;
    assert_ne!(access_token, refresh_token);

    let payload: Payload = app
        .codec
        .verify(&access_token, TokenKind::Access)
        .expect("Access token should verify");
    assert_eq!(payload, Payload::new(id, Role::User));
    assert_eq!(app.sessions.get(&refresh_token).await, Some(payload));
}

#[tokio::test]
async fn test_login_incorrect_password() {
    let app = TestApp::spawn().await;
    app.register_user("nicola", "pass_word!").await;

    let response = app
        .post("/auth/login")
        .json(&json!({
            "name": "nicola",
            "password": "wrong_password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 401);
    assert_eq!(body["data"]["message"], "Invalid credentials");
    assert_eq!(app.sessions.live_sessions().await, 0);
}

#[tokio::test]
async fn test_login_unknown_name_is_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register_user("nicola", "pass_word!").await;

    let response = app
        .post("/auth/login")
        .json(&json!({
            "name": "nobody",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_musician_role() {
    let app = TestApp::spawn().await;
    let id = app.register_musician("the_band", "guitar_solo!").await;

    let (access_token, _) = app.login("the_band", "guitar_solo!").await;

    let response = app
        .get_authenticated("/auth/me", &access_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["principal_id"], id.to_string());
    assert_eq!(body["data"]["role"], 2);
}

#[tokio::test]
async fn test_login_name_collision_prefers_user() {
    let app = TestApp::spawn().await;
    let user_id = app.register_user("alex", "shared_secret").await;
    app.register_musician("alex", "shared_secret").await;

    let (access_token, _) = app.login("alex", "shared_secret").await;

    let payload: Payload = app.codec.verify(&access_token, TokenKind::Access).unwrap();
    assert_eq!(payload, Payload::new(user_id, Role::User));
}

#[tokio::test]
async fn test_me_returns_user_role() {
    let app = TestApp::spawn().await;
    let id = app.register_user("nicola", "pass_word!").await;
    let (access_token, _) = app.login("nicola", "pass_word!").await;

    let response = app
        .get_authenticated("/auth/me", &access_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 200);
    assert_eq!(body["data"]["principal_id"], id.to_string());
    assert_eq!(body["data"]["role"], 1);
}

#[tokio::test]
async fn test_me_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/auth/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_invalid_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get_authenticated("/auth/me", "invalid_token")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid token");
}

#[tokio::test]
async fn test_me_with_refresh_token() {
    let app = TestApp::spawn().await;
    app.register_user("nicola", "pass_word!").await;
    let (_, refresh_token) = app.login("nicola", "pass_word!").await;

    let response = app
        .get_authenticated("/auth/me", &refresh_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_expired_token() {
    let app = TestApp::spawn().await;
    let id = app.register_user("nicola", "pass_word!").await;
    let expired = app
        .codec
        .sign(
            &Payload::new(id, Role::User),
            TokenKind::Access,
            chrono::Duration::seconds(-1),
        )
        .unwrap();

    let response = app
        .get_authenticated("/auth/me", &expired)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Token expired");
}

#[tokio::test]
async fn test_role_routes() {
    let app = TestApp::spawn().await;
    app.register_user("nicola", "pass_word!").await;
    app.register_musician("the_band", "guitar_solo!").await;
    let (user_token, _) = app.login("nicola", "pass_word!").await;
    let (musician_token, _) = app.login("the_band", "guitar_solo!").await;

    let cases = [
        ("/auth/me/user", &user_token, StatusCode::OK),
        ("/auth/me/user", &musician_token, StatusCode::FORBIDDEN),
        ("/auth/me/musician", &musician_token, StatusCode::OK),
        ("/auth/me/musician", &user_token, StatusCode::FORBIDDEN),
    ];

    for (path, token, expected) in cases {
        let response = app
            .get_authenticated(path, token)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), expected, "GET {}", path);
    }
}

#[tokio::test]
async fn test_role_route_requires_authentication() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/auth/me/musician")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rotates_session() {
    let app = TestApp::spawn().await;
    let id = app.register_user("nicola", "pass_word!").await;
    let (_, refresh_token) = app.login("nicola", "pass_word!").await;

    let response = app
        .post("/auth/refresh")
        .json(&json!({ "refresh_token": refresh_token }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let (access_token, rotated) = token_pair(response).await;
    assert_ne!(rotated, refresh_token);

    let payload: Payload = app.codec.verify(&access_token, TokenKind::Access).unwrap();
    assert_eq!(payload, Payload::new(id, Role::User));
    assert_eq!(app.sessions.get(&refresh_token).await, None);
    assert_eq!(app.sessions.get(&rotated).await, Some(payload));
}

#[tokio::test]
async fn test_refresh_token_is_single_use() {
    let app = TestApp::spawn().await;
    app.register_user("nicola", "pass_word!").await;
    let (_, refresh_token) = app.login("nicola", "pass_word!").await;

    let first = app
        .post("/auth/refresh")
        .json(&json!({ "refresh_token": refresh_token }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(first.status(), StatusCode::OK);

    let replay = app
        .post("/auth/refresh")
        .json(&json!({ "refresh_token": refresh_token }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_with_access_token() {
    let app = TestApp::spawn().await;
    app.register_user("nicola", "pass_word!").await;
    let (access_token, _) = app.login("nicola", "pass_word!").await;

    let response = app
        .post("/auth/refresh")
        .json(&json!({ "refresh_token": access_token }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_refresh_but_not_access() {
    let app = TestApp::spawn().await;
    app.register_user("nicola", "pass_word!").await;
    let (access_token, refresh_token) = app.login("nicola", "pass_word!").await;

    let response = app
        .post_authenticated("/auth/logout", &refresh_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.sessions.live_sessions().await, 0);

    let refresh = app
        .post("/auth/refresh")
        .json(&json!({ "refresh_token": refresh_token }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(refresh.status(), StatusCode::UNAUTHORIZED);

    // Access tokens are stateless and outlive the session until they expire.
    let me = app
        .get_authenticated("/auth/me", &access_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(me.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_logout_twice() {
    let app = TestApp::spawn().await;
    app.register_user("nicola", "pass_word!").await;
    let (_, refresh_token) = app.login("nicola", "pass_word!").await;

    let first = app
        .post_authenticated("/auth/logout", &refresh_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .post_authenticated("/auth/logout", &refresh_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(second.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_with_access_token() {
    let app = TestApp::spawn().await;
    app.register_user("nicola", "pass_word!").await;
    let (access_token, _) = app.login("nicola", "pass_word!").await;

    let response = app
        .post_authenticated("/auth/logout", &access_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.sessions.live_sessions().await, 1);
}

#[tokio::test]
async fn test_logout_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/logout")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let app = TestApp::spawn().await;
    app.register_user("nicola", "pass_word!").await;
    let (_, first) = app.login("nicola", "pass_word!").await;
    let (_, second) = app.login("nicola", "pass_word!").await;

    assert_eq!(app.sessions.live_sessions().await, 2);

    let response = app
        .post_authenticated("/auth/logout", &first)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let refresh = app
        .post("/auth/refresh")
        .json(&json!({ "refresh_token": second }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(refresh.status(), StatusCode::OK);
}
