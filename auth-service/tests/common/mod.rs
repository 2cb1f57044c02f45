use std::sync::Arc;

use auth::PasswordHasher;
use auth::TokenCodec;
use auth_service::domain::auth::models::PrincipalId;
use auth_service::domain::auth::service::AuthorizationService;
use auth_service::domain::auth::session::SessionConfig;
use auth_service::domain::auth::session::SessionProvider;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryPrincipalRepository;
use auth_service::outbound::session_store::InMemorySessionStore;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory adapters
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub users: InMemoryPrincipalRepository,
    pub musicians: InMemoryPrincipalRepository,
    pub sessions: InMemorySessionStore,
    pub codec: TokenCodec,
    hasher: PasswordHasher,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let users = InMemoryPrincipalRepository::new();
        let musicians = InMemoryPrincipalRepository::new();
        let sessions = InMemorySessionStore::new();

        let session_config = SessionConfig::new(TEST_SECRET, 15, 60)
            .expect("Invalid test session config");
        let session_provider = Arc::new(SessionProvider::new(
            Arc::new(sessions.clone()),
            &session_config,
        ));

        let auth_service = Arc::new(AuthorizationService::new(
            Arc::new(users.clone()),
            Arc::new(musicians.clone()),
            session_provider,
        ));

        let router = create_router(auth_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            users,
            musicians,
            sessions,
            codec: TokenCodec::new(TEST_SECRET),
            hasher: PasswordHasher::new(),
        }
    }

    pub async fn register_user(&self, name: &str, password: &str) -> PrincipalId {
        self.users
            .register(&self.hasher, name, password)
            .await
            .expect("Failed to register user")
    }

    pub async fn register_musician(&self, name: &str, password: &str) -> PrincipalId {
        self.musicians
            .register(&self.hasher, name, password)
            .await
            .expect("Failed to register musician")
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Log in and return `(access_token, refresh_token)`
    pub async fn login(&self, name: &str, password: &str) -> (String, String) {
        let response = self
            .post("/auth/login")
            .json(&serde_json::json!({ "name": name, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        token_pair(response).await
    }
}

/// Extract `(access_token, refresh_token)` from a token pair response
pub async fn token_pair(response: reqwest::Response) -> (String, String) {
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    (
        body["data"]["access_token"]
            .as_str()
            .expect("Missing access token")
            .to_string(),
        body["data"]["refresh_token"]
            .as_str()
            .expect("Missing refresh token")
            .to_string(),
    )
}
