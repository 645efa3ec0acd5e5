//! Weight projection and calorie goal calculations
//!
//! Provides the calculations behind the patient dashboard: ideal body weight
//! from a fixed BMI target, Harris-Benedict daily calories, and a weekly
//! weight trajectory toward a target weight.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: All calculations are pure, no side effects
//! 2. **Validated Input**: Non-positive weight or height is rejected
//! 3. **Coupled Constants**: The 500 kcal deficit and the 0.5 kg/week rate
//!    describe the same energy balance and change together

use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{ensure_positive, CalculationError};
use crate::models::Gender;

/// Target BMI used to back-calculate the ideal weight
pub const IDEAL_BMI: f64 = 22.5;

/// Moderate activity multiplier applied to the BMR
pub const ACTIVITY_MULTIPLIER: f64 = 1.55;

/// Safe weekly weight change in kilograms
pub const SAFE_WEEKLY_RATE_KG: f64 = 0.5;

/// Daily energy deficit matching `SAFE_WEEKLY_RATE_KG`
///
/// 500 kcal/day × 7 ≈ 3500 kcal ≈ 0.45 kg of adipose tissue.
pub const DAILY_DEFICIT_KCAL: i32 = 500;

/// Maximum number of points shown on the dashboard chart
pub const MAX_CHART_POINTS: usize = 8;

/// Longest projection produced, in weeks (a century)
pub const MAX_PROJECTION_WEEKS: i64 = 52 * 100;

/// Absorbs float noise in `|difference| / rate` before taking the ceiling
const STEP_TOLERANCE: f64 = 1e-9;

/// Round to one decimal place
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Whole years elapsed between `birth_date` and `today`
///
/// Returns 0 when the birth date lies after `today`.
pub fn age_in_years(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    today
        .years_since(birth_date)
        .map(|years| years as i32)
        .unwrap_or(0)
}

// ============================================================================
// Ideal Weight
// ============================================================================

/// Calculate the ideal body weight for a height
///
/// Formula: weight = 22.5 × height(m)², rounded to one decimal.
///
/// The gender is accepted but does not change the BMI target; every
/// category shares the same constant.
pub fn calculate_ideal_weight(height_cm: f64, _gender: Gender) -> Result<f64, CalculationError> {
    let height_cm = ensure_positive("height_cm", height_cm)?;
    let height_m = height_cm / 100.0;
    Ok(round_to_tenth(IDEAL_BMI * height_m * height_m))
}

// ============================================================================
// Daily Calories
// ============================================================================

/// Basal Metabolic Rate using the Harris-Benedict equation (revised)
///
/// Men: BMR = 88.362 + 13.397 × weight(kg) + 4.799 × height(cm) - 5.677 × age(y)
/// Others: BMR = 447.593 + 9.247 × weight(kg) + 3.098 × height(cm) - 4.330 × age(y)
pub fn calculate_bmr_harris_benedict(weight_kg: f64, height_cm: f64, age_years: i32, gender: Gender) -> f64 {
    if gender.is_male() {
        88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age_years as f64
    } else {
        447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age_years as f64
    }
}

/// Daily calorie expenditure at moderate activity, in kcal/day
///
/// Age is not bounds-checked.
pub fn calculate_daily_calories(
    weight_kg: f64,
    height_cm: f64,
    age_years: i32,
    gender: Gender,
) -> Result<i32, CalculationError> {
    let weight_kg = ensure_positive("weight_kg", weight_kg)?;
    let height_cm = ensure_positive("height_cm", height_cm)?;
    let bmr = calculate_bmr_harris_benedict(weight_kg, height_cm, age_years, gender);
    Ok((bmr * ACTIVITY_MULTIPLIER).round() as i32)
}

/// Recommended daily intake: expenditure minus the fixed deficit
pub fn calculate_recommended_calories(
    weight_kg: f64,
    height_cm: f64,
    age_years: i32,
    gender: Gender,
) -> Result<i32, CalculationError> {
    let daily = calculate_daily_calories(weight_kg, height_cm, age_years, gender)?;
    Ok(daily - DAILY_DEFICIT_KCAL)
}

// ============================================================================
// Weight Projection
// ============================================================================

/// One week on the projected weight trajectory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightProjectionPoint {
    pub date: NaiveDate,
    pub weight_kg: f64,
}

/// Project weekly weights from `current_weight_kg` to `target_weight_kg`
///
/// The first point is the current weight on `start_date`; every following
/// point is 7 days later and 0.5 kg closer to the target. The final point is
/// clamped to the target, so the trajectory never overshoots. Yields
/// `ceil(|difference| / 0.5) + 1` points, and a single point when both
/// weights are equal. Gaps longer than `MAX_PROJECTION_WEEKS`, or ending past
/// the last representable date, are rejected.
pub fn calculate_weight_projection(
    current_weight_kg: f64,
    target_weight_kg: f64,
    start_date: NaiveDate,
) -> Result<Vec<WeightProjectionPoint>, CalculationError> {
    let current = ensure_positive("current_weight_kg", current_weight_kg)?;
    let target = ensure_positive("target_weight_kg", target_weight_kg)?;

    let difference = target - current;
    let direction = if difference < 0.0 { -1.0 } else { 1.0 };
    let weeks = ((difference.abs() / SAFE_WEEKLY_RATE_KG) - STEP_TOLERANCE)
        .ceil()
        .max(0.0) as i64;

    if weeks > MAX_PROJECTION_WEEKS
        || start_date
            .checked_add_signed(Duration::days(7 * weeks))
            .is_none()
    {
        return Err(CalculationError::ProjectionOutOfRange { weeks });
    }

    let points = (0..=weeks)
        .map(|week| {
            let weight = if week == weeks {
                target
            } else {
                current + direction * SAFE_WEEKLY_RATE_KG * week as f64
            };
            WeightProjectionPoint {
                date: start_date + Duration::days(7 * week),
                weight_kg: round_to_tenth(weight),
            }
        })
        .collect();

    Ok(points)
}

/// Same as [`calculate_weight_projection`], starting from today's local date
pub fn calculate_weight_projection_from_today(
    current_weight_kg: f64,
    target_weight_kg: f64,
) -> Result<Vec<WeightProjectionPoint>, CalculationError> {
    calculate_weight_projection(current_weight_kg, target_weight_kg, Local::now().date_naive())
}

// ============================================================================
// Chart Helpers
// ============================================================================

/// Pick at most `MAX_CHART_POINTS` representative points for display
///
/// Keeps the first point, every Nth point after it with
/// `N = max(1, (len - 1) / 7)`, and always the last point.
pub fn downsample_for_chart<T: Clone>(points: &[T]) -> Vec<T> {
    if points.len() <= 1 {
        return points.to_vec();
    }

    let last = points.len() - 1;
    let step = (last / (MAX_CHART_POINTS - 1)).max(1);

    let mut selected: Vec<T> = (0..last)
        .step_by(step)
        .take(MAX_CHART_POINTS - 1)
        .map(|i| points[i].clone())
        .collect();
    selected.push(points[last].clone());
    selected
}

/// Chart data consumed by the UI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Day/month labels, "dd/MM"
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Render projection points as chart labels and values
pub fn to_chart_series(points: &[WeightProjectionPoint]) -> ChartSeries {
    ChartSeries {
        labels: points.iter().map(|p| p.date.format("%d/%m").to_string()).collect(),
        values: points.iter().map(|p| p.weight_kg).collect(),
    }
}
