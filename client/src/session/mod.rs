//! Session state store
//!
//! Holds the signed-in user, their tokens and cached profile data. The
//! lifecycle is explicit: `load` on startup, a save on every mutation, and
//! `clear` on logout. Each transition is announced on the event channel.

use nutri_clinic_shared::models::{NutritionistAvailability, PatientProfile, Role};
use nutri_clinic_shared::types::{AccountSummary, AuthTokens, LoginResponse};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{info, warn};

use crate::error::{ClientError, ClientResult};

mod events;
mod storage;

pub use events::{SessionEvent, SessionEvents};
pub use storage::{FileStorage, MemoryStorage, Storage};

/// Storage key the session is persisted under
pub const SESSION_KEY: &str = "session";

/// In-memory session; tokens never leave a `SecretString` except to persist
#[derive(Debug)]
struct Session {
    user: AccountSummary,
    access_token: SecretString,
    refresh_token: SecretString,
    patient_profile: Option<PatientProfile>,
    availability: Option<NutritionistAvailability>,
}

/// Persisted form of the session
#[derive(Serialize, Deserialize)]
struct StoredSession {
    user: AccountSummary,
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    patient_profile: Option<PatientProfile>,
    #[serde(default)]
    availability: Option<NutritionistAvailability>,
}

impl Session {
    fn from_login(response: LoginResponse) -> Self {
        Self {
            user: response.user,
            access_token: SecretString::new(response.tokens.access_token),
            refresh_token: SecretString::new(response.tokens.refresh_token),
            patient_profile: None,
            availability: None,
        }
    }

    fn to_stored(&self) -> StoredSession {
        StoredSession {
            user: self.user.clone(),
            access_token: self.access_token.expose_secret().clone(),
            refresh_token: self.refresh_token.expose_secret().clone(),
            patient_profile: self.patient_profile.clone(),
            availability: self.availability.clone(),
        }
    }
}

impl From<StoredSession> for Session {
    fn from(stored: StoredSession) -> Self {
        Self {
            user: stored.user,
            access_token: SecretString::new(stored.access_token),
            refresh_token: SecretString::new(stored.refresh_token),
            patient_profile: stored.patient_profile,
            availability: stored.availability,
        }
    }
}

/// Session-scoped state store
///
/// Cheap to clone; clones share the same session and event channel.
#[derive(Clone)]
pub struct SessionManager {
    storage: Arc<dyn Storage>,
    current: Arc<RwLock<Option<Session>>>,
    events: SessionEvents,
}

impl SessionManager {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            current: Arc::new(RwLock::new(None)),
            events: SessionEvents::new(),
        }
    }

    /// Subscribe to session lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Restore a previously saved session
    ///
    /// Returns whether a session was restored. An unreadable stored session
    /// is discarded rather than treated as fatal.
    pub async fn load(&self) -> ClientResult<bool> {
        let Some(raw) = self.storage.get(SESSION_KEY).await? else {
            return Ok(false);
        };

        match serde_json::from_str::<StoredSession>(&raw) {
            Ok(stored) => {
                let role = stored.user.role;
                info!(user_id = %stored.user.id, %role, "Session restored");
                *self.current.write().await = Some(stored.into());
                self.events.publish(SessionEvent::SignedIn { role });
                Ok(true)
            }
            Err(e) => {
                warn!(error = %e, "Stored session is unreadable, discarding it");
                self.storage.remove(SESSION_KEY).await?;
                Ok(false)
            }
        }
    }

    /// Start a new session from a login or registration response
    pub async fn start(&self, response: LoginResponse) -> ClientResult<()> {
        let role = response.user.role;
        info!(user_id = %response.user.id, %role, "Session started");

        let mut current = self.current.write().await;
        let session = Session::from_login(response);
        self.persist(&session).await?;
        *current = Some(session);
        drop(current);

        self.events.publish(SessionEvent::SignedIn { role });
        Ok(())
    }

    /// Replace the tokens of the running session
    pub async fn set_tokens(&self, tokens: AuthTokens) -> ClientResult<()> {
        self.update(|session| {
            session.access_token = SecretString::new(tokens.access_token);
            session.refresh_token = SecretString::new(tokens.refresh_token);
        })
        .await?;
        self.events.publish(SessionEvent::TokensUpdated);
        Ok(())
    }

    pub async fn cache_patient_profile(&self, profile: PatientProfile) -> ClientResult<()> {
        self.update(|session| session.patient_profile = Some(profile))
            .await?;
        self.events.publish(SessionEvent::ProfileUpdated);
        Ok(())
    }

    pub async fn cache_availability(&self, availability: NutritionistAvailability) -> ClientResult<()> {
        self.update(|session| session.availability = Some(availability))
            .await?;
        self.events.publish(SessionEvent::ProfileUpdated);
        Ok(())
    }

    /// End the session and wipe it from storage
    pub async fn clear(&self) -> ClientResult<()> {
        let mut current = self.current.write().await;
        self.storage.remove(SESSION_KEY).await?;
        let had_session = current.take().is_some();
        drop(current);

        if had_session {
            info!("Session cleared");
        }
        self.events.publish(SessionEvent::SignedOut);
        Ok(())
    }

    pub async fn is_signed_in(&self) -> bool {
        self.current.read().await.is_some()
    }

    pub async fn user(&self) -> Option<AccountSummary> {
        self.current.read().await.as_ref().map(|s| s.user.clone())
    }

    pub async fn role(&self) -> Option<Role> {
        self.current.read().await.as_ref().map(|s| s.user.role)
    }

    /// Access token of the running session
    pub async fn access_token(&self) -> ClientResult<SecretString> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|s| SecretString::new(s.access_token.expose_secret().clone()))
            .ok_or(ClientError::NotLoggedIn)
    }

    pub async fn patient_profile(&self) -> Option<PatientProfile> {
        self.current
            .read()
            .await
            .as_ref()
            .and_then(|s| s.patient_profile.clone())
    }

    pub async fn availability(&self) -> Option<NutritionistAvailability> {
        self.current
            .read()
            .await
            .as_ref()
            .and_then(|s| s.availability.clone())
    }

    /// Mutate the running session and save it
    async fn update<F>(&self, mutate: F) -> ClientResult<()>
    where
        F: FnOnce(&mut Session),
    {
        let mut current = self.current.write().await;
        let session = current.as_mut().ok_or(ClientError::NotLoggedIn)?;
        mutate(session);
        self.persist(session).await
    }

    async fn persist(&self, session: &Session) -> ClientResult<()> {
        let raw = serde_json::to_string(&session.to_stored())?;
        self.storage.set(SESSION_KEY, &raw).await
    }
}
