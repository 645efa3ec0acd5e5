//! Patient dashboard service
//!
//! Turns the patient profile into the dashboard figures: ideal weight as the
//! target, daily and recommended calories, and the projection chart.

use chrono::NaiveDate;
use nutri_clinic_shared::intake::{DailyIntake, FoodLogEntry};
use nutri_clinic_shared::models::PatientProfile;
use nutri_clinic_shared::projection::{
    calculate_daily_calories, calculate_ideal_weight, calculate_weight_projection,
    downsample_for_chart, to_chart_series, ChartSeries, WeightProjectionPoint, DAILY_DEFICIT_KCAL,
};
use nutri_clinic_shared::validation::validate_profile;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::state::ClientState;

/// Figures shown on the patient dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub patient_name: String,
    pub age_years: i32,
    pub current_weight_kg: f64,
    /// Ideal weight, used as the projection target
    pub target_weight_kg: f64,
    pub daily_calories: i32,
    pub recommended_calories: i32,
    /// Weeks until the target at the safe weekly rate
    pub weeks_to_target: usize,
    pub projection: Vec<WeightProjectionPoint>,
    /// Downsampled projection for the chart
    pub chart: ChartSeries,
}

/// Build the dashboard for a profile as of `today`
///
/// Profiles with implausible measurements are refused before any figure is computed.
pub fn build_dashboard(profile: &PatientProfile, today: NaiveDate) -> ClientResult<DashboardSummary> {
    validate_profile(profile, today).map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        ClientError::Validation(messages.join("; "))
    })?;

    let age_years = profile.age_years(today);
    let target_weight_kg = calculate_ideal_weight(profile.height_cm, profile.gender)?;
    let daily_calories =
        calculate_daily_calories(profile.weight_kg, profile.height_cm, age_years, profile.gender)?;
    let projection = calculate_weight_projection(profile.weight_kg, target_weight_kg, today)?;
    let chart = to_chart_series(&downsample_for_chart(&projection));

    Ok(DashboardSummary {
        patient_name: profile.name.clone(),
        age_years,
        current_weight_kg: profile.weight_kg,
        target_weight_kg,
        daily_calories,
        recommended_calories: daily_calories - DAILY_DEFICIT_KCAL,
        weeks_to_target: projection.len() - 1,
        projection,
        chart,
    })
}

/// Dashboard service
pub struct DashboardService;

impl DashboardService {
    /// Patient profile, from the session cache unless `refresh` is set
    pub async fn load_profile(state: &ClientState, refresh: bool) -> ClientResult<PatientProfile> {
        if !refresh {
            if let Some(profile) = state.session.patient_profile().await {
                debug!("Using cached patient profile");
                return Ok(profile);
            }
        }

        let token = state.token().await?;
        let profile = state
            .check_auth(state.api.patient_profile(&token).await)
            .await?;
        state.session.cache_patient_profile(profile.clone()).await?;
        Ok(profile)
    }

    /// Build the signed-in patient's dashboard
    pub async fn patient_dashboard(
        state: &ClientState,
        today: NaiveDate,
        refresh: bool,
    ) -> ClientResult<DashboardSummary> {
        let profile = Self::load_profile(state, refresh).await?;
        build_dashboard(&profile, today)
    }

    /// Calories logged on `date` against the recommended intake
    pub fn calorie_progress(
        summary: &DashboardSummary,
        entries: &[FoodLogEntry],
        date: NaiveDate,
    ) -> DailyIntake {
        DailyIntake::from_entries(date, summary.recommended_calories, entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutri_clinic_shared::models::Gender;
    use uuid::Uuid;

    fn profile(weight_kg: f64) -> PatientProfile {
        PatientProfile {
            id: Uuid::new_v4(),
            name: "Bruno".to_string(),
            weight_kg,
            height_cm: 170.0,
            birth_date: NaiveDate::from_ymd_opt(1996, 1, 10).unwrap(),
            gender: Gender::Male,
        }
    }

    #[test]
    fn test_build_dashboard() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let summary = build_dashboard(&profile(80.0), today).unwrap();

        assert_eq!(summary.age_years, 30);
        assert_eq!(summary.target_weight_kg, 65.0);
        assert_eq!(summary.weeks_to_target, 30);
        assert_eq!(summary.projection.len(), 31);
        assert_eq!(summary.recommended_calories, summary.daily_calories - 500);

        assert!(summary.chart.values.len() <= 8);
        assert_eq!(summary.chart.values.first(), Some(&80.0));
        assert_eq!(summary.chart.values.last(), Some(&65.0));
        assert_eq!(summary.chart.labels.first().map(String::as_str), Some("19/10"));
    }

    #[test]
    fn test_build_dashboard_at_target() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let summary = build_dashboard(&profile(65.0), today).unwrap();
        assert_eq!(summary.weeks_to_target, 0);
        assert_eq!(summary.chart.values, vec![65.0]);
    }

    #[test]
    fn test_build_dashboard_rejects_invalid_profile() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let mut invalid = profile(80.0);
        invalid.height_cm = 0.0;
        let result = build_dashboard(&invalid, today);
        assert!(matches!(result, Err(ClientError::Validation(ref m)) if m.starts_with("Height")));
    }

    #[test]
    fn test_calorie_progress_uses_recommended_goal() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let summary = build_dashboard(&profile(80.0), today).unwrap();
        let entries = vec![FoodLogEntry {
            logged_at: today.and_hms_opt(12, 0, 0).unwrap(),
            description: "almoço".to_string(),
            calories: 700,
        }];

        let intake = DashboardService::calorie_progress(&summary, &entries, today);
        assert_eq!(intake.goal_kcal, summary.recommended_calories);
        assert_eq!(intake.remaining_kcal(), summary.recommended_calories - 700);
    }
}
