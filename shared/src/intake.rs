//! Daily calorie counting

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A food item the patient logged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodLogEntry {
    pub logged_at: NaiveDateTime,
    pub description: String,
    pub calories: i32,
}

/// Calories consumed on a day against the calorie goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyIntake {
    pub date: NaiveDate,
    pub goal_kcal: i32,
    pub consumed_kcal: i32,
    pub entries: Vec<FoodLogEntry>,
}

impl DailyIntake {
    /// Keep the entries logged on `date` and total them
    pub fn from_entries(date: NaiveDate, goal_kcal: i32, entries: &[FoodLogEntry]) -> Self {
        let entries: Vec<FoodLogEntry> = entries
            .iter()
            .filter(|e| e.logged_at.date() == date)
            .cloned()
            .collect();
        let consumed_kcal = entries.iter().map(|e| e.calories).sum();

        Self {
            date,
            goal_kcal,
            consumed_kcal,
            entries,
        }
    }

    /// Calories left for the day; negative once the goal is exceeded
    pub fn remaining_kcal(&self) -> i32 {
        self.goal_kcal - self.consumed_kcal
    }

    pub fn progress_percent(&self) -> f64 {
        if self.goal_kcal <= 0 {
            return 0.0;
        }
        self.consumed_kcal as f64 / self.goal_kcal as f64 * 100.0
    }
}
