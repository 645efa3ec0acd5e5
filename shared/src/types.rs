//! API request and response types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Meal, Role};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

// ============================================================================
// Authentication Types
// ============================================================================

/// Authentication tokens response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub expires_in: i64,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 120, message = "Name cannot be empty"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
    pub role: Role,
}

/// Account summary returned alongside tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
}

/// Login and registration response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub tokens: AuthTokens,
    pub user: AccountSummary,
}

// ============================================================================
// Scheduling Types
// ============================================================================

/// Book appointment request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub nutritionist_id: Uuid,
    pub scheduled_at: NaiveDateTime,
}

/// Replace a nutritionist's available hours
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAvailabilityRequest {
    pub available_hours: Vec<String>,
}

// ============================================================================
// Meal Plan Types
// ============================================================================

/// Create meal plan request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMealPlanRequest {
    pub patient_id: Uuid,
    #[validate(length(min = 1, max = 200, message = "Title cannot be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "A meal plan needs at least one meal"))]
    pub meals: Vec<Meal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_validation() {
        let ok = LoginRequest {
            email: "ana@clinica.com".to_string(),
            password: "segredo123".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = LoginRequest {
            email: "ana".to_string(),
            password: String::new(),
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_register_request_password_length() {
        let request = RegisterRequest {
            name: "Ana".to_string(),
            email: "ana@clinica.com".to_string(),
            password: "curta".to_string(),
            role: Role::Patient,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_meal_plan_requires_meals() {
        let request = CreateMealPlanRequest {
            patient_id: Uuid::new_v4(),
            title: "Semana 1".to_string(),
            meals: vec![],
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_auth_tokens_default_type() {
        let tokens: AuthTokens =
            serde_json::from_str(r#"{"access_token":"a","refresh_token":"r","expires_in":3600}"#).unwrap();
        assert_eq!(tokens.token_type, "Bearer");
    }
}
