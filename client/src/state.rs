//! Client state management
//!
//! Bundles the shared resources every service needs: configuration, the
//! API client and the session store.
//!
//! All fields are cheap to clone (`Arc` or internally reference counted).

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::{FileStorage, SessionManager, Storage};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::warn;

/// Shared client state
#[derive(Clone)]
pub struct ClientState {
    /// Client configuration
    pub config: Arc<ClientConfig>,
    /// Backend REST client
    pub api: ApiClient,
    /// Signed-in session
    pub session: SessionManager,
}

impl ClientState {
    /// Build state backed by the configured file storage
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let storage = Arc::new(FileStorage::new(config.storage.dir.clone()));
        Self::with_storage(config, storage)
    }

    /// Build state over any storage backend
    pub fn with_storage(config: ClientConfig, storage: Arc<dyn Storage>) -> ClientResult<Self> {
        let api = ApiClient::new(&config.api)?;
        Ok(Self {
            config: Arc::new(config),
            api,
            session: SessionManager::new(storage),
        })
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Access token of the signed-in user
    pub async fn token(&self) -> ClientResult<SecretString> {
        self.session.access_token().await
    }

    /// Drop the session when the backend rejected its credentials
    pub async fn check_auth<T>(&self, result: ClientResult<T>) -> ClientResult<T> {
        if let Err(ClientError::Unauthorized(message)) = &result {
            warn!(%message, "Backend rejected the session, signing out");
            if let Err(e) = self.session.clear().await {
                warn!(error = %e, "Failed to clear rejected session");
            }
        }
        result
    }
}
