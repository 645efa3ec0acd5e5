//! Authentication endpoints

use nutri_clinic_shared::types::{LoginRequest, LoginResponse, RegisterRequest};
use reqwest::Method;

use super::ApiClient;
use crate::error::ClientResult;

impl ApiClient {
    /// POST /auth/login
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        self.send(self.request(Method::POST, "/auth/login").json(request))
            .await
    }

    /// POST /auth/register
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<LoginResponse> {
        self.send(self.request(Method::POST, "/auth/register").json(request))
            .await
    }
}
