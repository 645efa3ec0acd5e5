//! Nutri Clinic WASM Module
//!
//! Browser bindings for the dashboard calculations, so the web front end
//! shows the same figures as the CLI without a round trip.
//!
//! Invalid measurements yield `0` (or an empty chart) rather than a thrown
//! exception; the page only needs to know there is nothing to show.

use chrono::NaiveDate;
use nutri_clinic_shared::models::Gender;
use nutri_clinic_shared::projection::{
    calculate_daily_calories, calculate_ideal_weight, calculate_recommended_calories,
    calculate_weight_projection, downsample_for_chart, to_chart_series, ChartSeries,
};
use wasm_bindgen::prelude::*;

/// Ideal weight (kg) for a height in centimetres
#[wasm_bindgen]
pub fn ideal_weight(height_cm: f64, gender: &str) -> f64 {
    calculate_ideal_weight(height_cm, Gender::from_label(gender)).unwrap_or(0.0)
}

/// Daily energy expenditure (Harris-Benedict, moderately active)
#[wasm_bindgen]
pub fn daily_calories(weight_kg: f64, height_cm: f64, age_years: i32, gender: &str) -> i32 {
    calculate_daily_calories(weight_kg, height_cm, age_years, Gender::from_label(gender)).unwrap_or(0)
}

/// Daily intake target for steady weight loss
#[wasm_bindgen]
pub fn recommended_calories(weight_kg: f64, height_cm: f64, age_years: i32, gender: &str) -> i32 {
    calculate_recommended_calories(weight_kg, height_cm, age_years, Gender::from_label(gender))
        .unwrap_or(0)
}

/// Chart-ready weight projection as JSON: `{ "labels": [...], "values": [...] }`
///
/// `start_date` is an ISO date (`YYYY-MM-DD`).
#[wasm_bindgen]
pub fn projection_chart(current_kg: f64, target_kg: f64, start_date: &str) -> String {
    let series = build_chart(current_kg, target_kg, start_date).unwrap_or_default();
    serde_json::to_string(&series).unwrap_or_else(|_| "{\"labels\":[],\"values\":[]}".to_string())
}

fn build_chart(current_kg: f64, target_kg: f64, start_date: &str) -> Option<ChartSeries> {
    let start = NaiveDate::parse_from_str(start_date.trim(), "%Y-%m-%d").ok()?;
    let projection = calculate_weight_projection(current_kg, target_kg, start).ok()?;
    Some(to_chart_series(&downsample_for_chart(&projection)))
}
