//! Patient profile and meal plan endpoints

use nutri_clinic_shared::models::{MealPlan, PatientProfile};
use nutri_clinic_shared::types::CreateMealPlanRequest;
use reqwest::Method;
use secrecy::SecretString;
use uuid::Uuid;

use super::ApiClient;
use crate::error::ClientResult;

impl ApiClient {
    /// GET /patients/me
    pub async fn patient_profile(&self, token: &SecretString) -> ClientResult<PatientProfile> {
        self.send(self.authed(Method::GET, "/patients/me", token))
            .await
    }

    /// GET /patients/{id}/meal-plans
    pub async fn meal_plans(&self, token: &SecretString, patient_id: Uuid) -> ClientResult<Vec<MealPlan>> {
        let path = format!("/patients/{}/meal-plans", patient_id);
        self.send(self.authed(Method::GET, &path, token)).await
    }

    /// POST /meal-plans
    pub async fn create_meal_plan(
        &self,
        token: &SecretString,
        request: &CreateMealPlanRequest,
    ) -> ClientResult<MealPlan> {
        self.send(self.authed(Method::POST, "/meal-plans", token).json(request))
            .await
    }
}
