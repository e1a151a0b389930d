//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value;
use tower::ServiceExt;

use prefab_api::config::{
    CorsSettings, DatabaseSettings, JwtSettings, ServerSettings, Settings, StoreBackend,
    StoreSettings,
};
use prefab_api::domain::{Authorization, AuthorizationLevel, Prefab};
use prefab_api::infrastructure::repositories::InMemoryPrefabRepository;
use prefab_api::presentation::middleware::Claims;
use prefab_api::startup::{build_router, AppState};

pub const JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Caller used by most tests
pub const TEST_USER: &str = "test";

/// Test application backed by the in-memory store
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryPrefabRepository>,
}

/// Status and decoded JSON body of a response
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".into(),
            port: 0,
        },
        store: StoreSettings {
            backend: StoreBackend::Memory,
            run_migrations: false,
        },
        database: DatabaseSettings {
            url: String::new(),
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: 1,
        },
        jwt: JwtSettings {
            secret: JWT_SECRET.into(),
        },
        cors: CorsSettings {
            allowed_origins: vec![],
        },
        environment: "test".into(),
    }
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryPrefabRepository::new());
        let state = AppState::new(store.clone(), test_settings());

        Self {
            router: build_router(state),
            store,
        }
    }

    /// Send a request, optionally with a JSON body and a bearer token
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str, user: &str) -> TestResponse {
        self.request("GET", uri, None, Some(&token_for(user))).await
    }

    pub async fn put(&self, uri: &str, body: Option<Value>, user: &str) -> TestResponse {
        self.request("PUT", uri, body, Some(&token_for(user))).await
    }

    pub async fn post(&self, uri: &str, body: Option<Value>, user: &str) -> TestResponse {
        self.request("POST", uri, body, Some(&token_for(user))).await
    }

    pub async fn delete(&self, uri: &str, user: &str) -> TestResponse {
        self.request("DELETE", uri, None, Some(&token_for(user))).await
    }
}

/// Mint a valid HS256 token for `user`
pub fn token_for(user: &str) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user.to_string(),
        exp: now + 3600,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

/// Prefab fixture with the given owner and authorization entries
pub fn prefab(id: &str, owner: &str, entries: &[(&str, AuthorizationLevel)]) -> Prefab {
    Prefab {
        id: id.to_string(),
        name: "Rack".to_string(),
        owner_id: owner.to_string(),
        authorizations: entries
            .iter()
            .map(|(prefab_id, level)| Authorization::new(*prefab_id, *level))
            .collect(),
        ..Default::default()
    }
}
