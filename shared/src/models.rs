//! Data models for the Nutri Clinic application

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::projection::age_in_years;

/// Gender as recorded on the patient profile
///
/// Only used to select the Harris-Benedict coefficient set. Anything that is
/// not recognised falls back to `Other`, which shares the non-male
/// coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Parse a gender label, case-insensitively
    ///
    /// Accepts the backend's Portuguese labels as well as English ones.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "masculino" | "male" => Gender::Male,
            "feminino" | "female" => Gender::Female,
            _ => Gender::Other,
        }
    }

    /// Label as stored by the backend
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "masculino",
            Gender::Female => "feminino",
            Gender::Other => "outro",
        }
    }

    pub fn is_male(&self) -> bool {
        matches!(self, Gender::Male)
    }
}

impl From<String> for Gender {
    fn from(label: String) -> Self {
        Gender::from_label(&label)
    }
}

impl From<&str> for Gender {
    fn from(label: &str) -> Self {
        Gender::from_label(label)
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        gender.as_str().to_string()
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Nutritionist,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Patient => f.write_str("patient"),
            Role::Nutritionist => f.write_str("nutritionist"),
        }
    }
}

/// Patient profile as returned by the profile endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub id: Uuid,
    pub name: String,
    /// Current weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    pub birth_date: NaiveDate,
    pub gender: Gender,
}

impl PatientProfile {
    /// Whole years of age on the given day
    pub fn age_years(&self, today: NaiveDate) -> i32 {
        age_in_years(self.birth_date, today)
    }
}

/// Hours a nutritionist accepts appointments at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionistAvailability {
    pub nutritionist_id: Uuid,
    /// Time-of-day strings, "HH:MM"
    #[serde(default)]
    pub available_hours: Vec<String>,
}

/// A booked appointment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub id: Uuid,
    pub patient_name: String,
    pub nutritionist_name: String,
    /// Clinic wall-clock time
    pub scheduled_at: NaiveDateTime,
    #[serde(default)]
    pub completed: bool,
}

impl AppointmentRecord {
    /// Flip the completed flag after the confirmation action succeeded
    pub fn mark_completed(&mut self) {
        self.completed = true;
    }

    pub fn date(&self) -> NaiveDate {
        self.scheduled_at.date()
    }
}

/// A single meal inside a meal plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    /// Optional "HH:MM" time of day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub calories: i32,
    #[serde(default)]
    pub items: Vec<String>,
}

/// Meal plan written by a nutritionist for a patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlan {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub title: String,
    pub meals: Vec<Meal>,
    pub created_at: DateTime<Utc>,
}

impl MealPlan {
    /// Sum of calories across all meals
    pub fn total_calories(&self) -> i32 {
        self.meals.iter().map(|m| m.calories).sum()
    }
}
