//! Common test utilities for integration tests
//!
//! Spins up a mock backend and a client state pointed at it.

#![allow(dead_code)]

use nutri_clinic_client::config::{ApiConfig, ClientConfig};
use nutri_clinic_client::session::{MemoryStorage, Storage};
use nutri_clinic_client::state::ClientState;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PATIENT_ID: Uuid = Uuid::from_u128(0x1001);
pub const NUTRITIONIST_ID: Uuid = Uuid::from_u128(0x2002);
pub const ACCESS_TOKEN: &str = "test-access-token";

/// Client state wired to a mock backend
pub struct TestClient {
    pub server: MockServer,
    pub state: ClientState,
    pub storage: Arc<dyn Storage>,
}

impl TestClient {
    /// Create a client with in-memory storage and a fresh mock server
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let config = test_config(&server.uri());
        let state = ClientState::with_storage(config, storage.clone())
            .expect("Failed to build client state");

        Self {
            server,
            state,
            storage,
        }
    }

    /// Create a client that is already signed in with the given role
    pub async fn signed_in(role: &str) -> Self {
        let client = Self::new().await;
        client.mount_login(role).await;
        nutri_clinic_client::services::AuthService::login(
            &client.state,
            nutri_clinic_shared::types::LoginRequest {
                email: "ana@example.com".to_string(),
                password: "SecurePassword123!".to_string(),
            },
        )
        .await
        .expect("Failed to sign in");
        client
    }

    /// Mock a successful login for the given role
    pub async fn mount_login(&self, role: &str) {
        let id = if role == "nutritionist" {
            NUTRITIONIST_ID
        } else {
            PATIENT_ID
        };

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(login_body(id, role)))
            .mount(&self.server)
            .await;
    }
}

/// Configuration pointing at the mock server
pub fn test_config(base_url: &str) -> ClientConfig {
    ClientConfig {
        api: ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        },
        ..ClientConfig::default()
    }
}

pub fn login_body(id: Uuid, role: &str) -> Value {
    json!({
        "tokens": {
            "access_token": ACCESS_TOKEN,
            "refresh_token": "test-refresh-token",
            "expires_in": 3600
        },
        "user": {
            "id": id,
            "name": "Ana Souza",
            "role": role
        }
    })
}

pub fn error_body(code: &str, message: &str) -> Value {
    json!({ "error": { "code": code, "message": message } })
}

pub fn appointment_body(patient_name: &str, scheduled_at: &str) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "patient_name": patient_name,
        "nutritionist_name": "Dra. Lima",
        "scheduled_at": scheduled_at
    })
}
