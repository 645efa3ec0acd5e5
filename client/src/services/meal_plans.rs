//! Meal plan service

use nutri_clinic_shared::models::{MealPlan, Role};
use nutri_clinic_shared::types::CreateMealPlanRequest;
use nutri_clinic_shared::validation::validate_meals;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::validation_error;
use crate::error::{ClientError, ClientResult};
use crate::state::ClientState;

/// Meal plan service
pub struct MealPlanService;

impl MealPlanService {
    /// Meal plans of a patient, newest first
    ///
    /// Without an explicit patient, a signed-in patient sees their own plans.
    pub async fn list(state: &ClientState, patient_id: Option<Uuid>) -> ClientResult<Vec<MealPlan>> {
        let patient_id = match patient_id {
            Some(id) => id,
            None => {
                let user = state.session.user().await.ok_or(ClientError::NotLoggedIn)?;
                if user.role != Role::Patient {
                    return Err(ClientError::Validation(
                        "A patient id is required when signed in as a nutritionist".to_string(),
                    ));
                }
                user.id
            }
        };

        let token = state.token().await?;
        let mut plans = state
            .check_auth(state.api.meal_plans(&token, patient_id).await)
            .await?;
        plans.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(plans)
    }

    /// Create a meal plan for a patient
    pub async fn create(state: &ClientState, request: CreateMealPlanRequest) -> ClientResult<MealPlan> {
        request.validate().map_err(|e| validation_error(&e))?;
        validate_meals(&request.meals).map_err(ClientError::Validation)?;

        let token = state.token().await?;
        let plan = state
            .check_auth(state.api.create_meal_plan(&token, &request).await)
            .await?;

        info!(
            plan_id = %plan.id,
            patient_id = %plan.patient_id,
            total_calories = plan.total_calories(),
            "Meal plan created"
        );
        Ok(plan)
    }
}
