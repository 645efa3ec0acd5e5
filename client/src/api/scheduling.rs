//! Appointment and availability endpoints

use nutri_clinic_shared::models::{AppointmentRecord, NutritionistAvailability};
use nutri_clinic_shared::types::{BookAppointmentRequest, UpdateAvailabilityRequest};
use reqwest::Method;
use secrecy::SecretString;
use uuid::Uuid;

use super::ApiClient;
use crate::error::ClientResult;

impl ApiClient {
    /// GET /appointments
    pub async fn list_appointments(&self, token: &SecretString) -> ClientResult<Vec<AppointmentRecord>> {
        self.send(self.authed(Method::GET, "/appointments", token))
            .await
    }

    /// GET /nutritionists/{id}/appointments
    pub async fn nutritionist_appointments(
        &self,
        token: &SecretString,
        nutritionist_id: Uuid,
    ) -> ClientResult<Vec<AppointmentRecord>> {
        let path = format!("/nutritionists/{}/appointments", nutritionist_id);
        self.send(self.authed(Method::GET, &path, token)).await
    }

    /// POST /appointments
    pub async fn book_appointment(
        &self,
        token: &SecretString,
        request: &BookAppointmentRequest,
    ) -> ClientResult<AppointmentRecord> {
        self.send(self.authed(Method::POST, "/appointments", token).json(request))
            .await
    }

    /// POST /appointments/{id}/confirm
    pub async fn confirm_appointment(
        &self,
        token: &SecretString,
        appointment_id: Uuid,
    ) -> ClientResult<AppointmentRecord> {
        let path = format!("/appointments/{}/confirm", appointment_id);
        self.send(self.authed(Method::POST, &path, token)).await
    }

    /// GET /nutritionists/{id}/availability
    pub async fn availability(
        &self,
        token: &SecretString,
        nutritionist_id: Uuid,
    ) -> ClientResult<NutritionistAvailability> {
        let path = format!("/nutritionists/{}/availability", nutritionist_id);
        self.send(self.authed(Method::GET, &path, token)).await
    }

    /// PUT /nutritionists/{id}/availability
    pub async fn update_availability(
        &self,
        token: &SecretString,
        nutritionist_id: Uuid,
        request: &UpdateAvailabilityRequest,
    ) -> ClientResult<NutritionistAvailability> {
        let path = format!("/nutritionists/{}/availability", nutritionist_id);
        self.send(self.authed(Method::PUT, &path, token).json(request))
            .await
    }
}
