//! Client services
//!
//! Services combine backend calls, the session store and the shared
//! calculations into the operations the application screens need.

pub mod auth;
pub mod dashboard;
pub mod meal_plans;
pub mod schedule;

pub use auth::AuthService;
pub use dashboard::{DashboardService, DashboardSummary};
pub use meal_plans::MealPlanService;
pub use schedule::{DaySchedule, ScheduleService};

use crate::error::ClientError;
use nutri_clinic_shared::validation::describe_errors;

/// Turn `validator` errors into a single validation error
pub(crate) fn validation_error(errors: &validator::ValidationErrors) -> ClientError {
    ClientError::Validation(describe_errors(errors).join("; "))
}
