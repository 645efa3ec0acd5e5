//! Input validation functions
//!
//! Custom validators for form input, used next to the `validator` derive
//! macros on the request types.

use chrono::NaiveDate;

use crate::appointments::parse_hour;
use crate::models::{Meal, PatientProfile};

// ============================================================================
// Profile Validation
// ============================================================================

/// Accepted body weight range, kg
pub const WEIGHT_RANGE_KG: (f64, f64) = (20.0, 500.0);
/// Accepted height range, cm
pub const HEIGHT_RANGE_CM: (f64, f64) = (50.0, 300.0);

fn check_range(value: f64, (min, max): (f64, f64), label: &str, unit: &str) -> Result<(), String> {
    if !value.is_finite() {
        return Err(format!("{} is not a number", label));
    }
    if value < min || value > max {
        return Err(format!("{} must be between {} and {} {}", label, min, max, unit));
    }
    Ok(())
}

/// Validate a body weight in kg
pub fn validate_weight(weight_kg: f64) -> Result<(), String> {
    check_range(weight_kg, WEIGHT_RANGE_KG, "Weight", "kg")
}

/// Validate a height in cm
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    check_range(height_cm, HEIGHT_RANGE_CM, "Height", "cm")
}

/// Validate a birth date against `today`
/// Must not be in the future, and age must not exceed 150 years
pub fn validate_birth_date(birth_date: NaiveDate, today: NaiveDate) -> Result<(), String> {
    if birth_date > today {
        return Err("Birth date cannot be in the future".to_string());
    }
    match today.years_since(birth_date) {
        Some(age) if age > 150 => Err("Age cannot exceed 150 years".to_string()),
        Some(_) => Ok(()),
        None => Err("Invalid birth date".to_string()),
    }
}

/// Validate every measured field of a patient profile
///
/// Collects all failures so a form can flag each field at once.
pub fn validate_profile(profile: &PatientProfile, today: NaiveDate) -> Result<(), Vec<ValidationError>> {
    let checks = [
        ("weight_kg", validate_weight(profile.weight_kg)),
        ("height_cm", validate_height_cm(profile.height_cm)),
        ("birth_date", validate_birth_date(profile.birth_date, today)),
    ];
    let errors: Vec<ValidationError> = checks
        .into_iter()
        .filter_map(|(field, result)| result.err().map(|message| ValidationError::new(field, &message)))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// ============================================================================
// Scheduling and Meal Plan Validation
// ============================================================================

/// Validate a nutritionist's list of available hours
pub fn validate_available_hours<S: AsRef<str>>(hours: &[S]) -> Result<(), String> {
    let mut seen = Vec::with_capacity(hours.len());
    for hour in hours {
        let time = parse_hour(hour.as_ref()).map_err(|e| e.to_string())?;
        if seen.contains(&time) {
            return Err(format!("Duplicate hour: {}", hour.as_ref()));
        }
        seen.push(time);
    }
    Ok(())
}

/// Validate the meals of a meal plan
pub fn validate_meals(meals: &[Meal]) -> Result<(), String> {
    for meal in meals {
        if meal.name.trim().is_empty() {
            return Err("Meal name cannot be empty".to_string());
        }
        if meal.calories < 0 {
            return Err(format!("{}: calories cannot be negative", meal.name));
        }
        if let Some(time) = &meal.time {
            parse_hour(time).map_err(|e| format!("{}: {}", meal.name, e))?;
        }
    }
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Form label for a request or profile field
pub fn field_label(field_name: &str) -> &str {
    match field_name {
        "name" => "Name",
        "email" => "Email",
        "password" => "Password",
        "weight" | "weight_kg" => "Current Weight",
        "height" | "height_cm" => "Height",
        "birth_date" => "Birth Date",
        "gender" => "Gender",
        "available_hours" => "Available Hours",
        "title" => "Title",
        "meals" => "Meals",
        _ => field_name,
    }
}

/// A failed check on one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", field_label(&self.field), self.message)
    }
}

/// Flatten `validator` errors into user-facing messages, sorted by field
pub fn describe_errors(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                ValidationError::new(field, &message).to_string()
            })
        })
        .collect();
    messages.sort();
    messages
}
