//! Authentication service - login, registration and logout

use nutri_clinic_shared::types::{AccountSummary, LoginRequest, RegisterRequest};
use tracing::info;
use validator::Validate;

use super::validation_error;
use crate::error::ClientResult;
use crate::state::ClientState;

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Validate credentials, log in and start the session
    pub async fn login(state: &ClientState, request: LoginRequest) -> ClientResult<AccountSummary> {
        request.validate().map_err(|e| validation_error(&e))?;

        let response = state.api.login(&request).await?;
        let user = response.user.clone();
        state.session.start(response).await?;

        info!(user_id = %user.id, "Logged in");
        Ok(user)
    }

    /// Create an account and start its session
    pub async fn register(state: &ClientState, request: RegisterRequest) -> ClientResult<AccountSummary> {
        request.validate().map_err(|e| validation_error(&e))?;

        let response = state.api.register(&request).await?;
        let user = response.user.clone();
        state.session.start(response).await?;

        info!(user_id = %user.id, role = %user.role, "Registered");
        Ok(user)
    }

    /// Clear the session
    pub async fn logout(state: &ClientState) -> ClientResult<()> {
        state.session.clear().await
    }
}
