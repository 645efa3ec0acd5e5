//! Scheduling service - slots, bookings and availability

use chrono::{NaiveDate, NaiveDateTime};
use nutri_clinic_shared::appointments::{
    derive_available_slots, filter_upcoming, group_by_patient, TimeSlot, DEFAULT_DISPLAY_HOURS,
};
use nutri_clinic_shared::models::{AppointmentRecord, NutritionistAvailability};
use nutri_clinic_shared::types::{BookAppointmentRequest, UpdateAvailabilityRequest};
use nutri_clinic_shared::validation::validate_available_hours;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;
use uuid::Uuid;

use crate::error::{ClientError, ClientResult};
use crate::state::ClientState;

/// A nutritionist's slots for one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub nutritionist_id: Uuid,
    pub date: NaiveDate,
    /// Set when the nutritionist configured no hours and the default list is shown
    pub uses_default_hours: bool,
    pub slots: Vec<TimeSlot>,
}

impl DaySchedule {
    /// Slots still open for booking
    pub fn free_slots(&self) -> impl Iterator<Item = &TimeSlot> {
        self.slots.iter().filter(|s| !s.booked)
    }
}

/// Derive a day's schedule, falling back to the default hours
pub fn build_day_schedule(
    availability: &NutritionistAvailability,
    date: NaiveDate,
    appointments: &[AppointmentRecord],
) -> ClientResult<DaySchedule> {
    let booked: Vec<AppointmentRecord> = appointments
        .iter()
        .filter(|a| a.date() == date)
        .cloned()
        .collect();

    let uses_default_hours = availability.available_hours.is_empty();
    let slots = if uses_default_hours {
        derive_available_slots(DEFAULT_DISPLAY_HOURS, date, &booked)?
    } else {
        derive_available_slots(&availability.available_hours, date, &booked)?
    };

    Ok(DaySchedule {
        nutritionist_id: availability.nutritionist_id,
        date,
        uses_default_hours,
        slots,
    })
}

/// Scheduling service
pub struct ScheduleService;

impl ScheduleService {
    /// Slots of a nutritionist on `date`, booked ones marked
    pub async fn day_schedule(
        state: &ClientState,
        nutritionist_id: Uuid,
        date: NaiveDate,
    ) -> ClientResult<DaySchedule> {
        let token = state.token().await?;
        let availability = state
            .check_auth(state.api.availability(&token, nutritionist_id).await)
            .await?;
        let appointments = state
            .check_auth(state.api.nutritionist_appointments(&token, nutritionist_id).await)
            .await?;

        build_day_schedule(&availability, date, &appointments)
    }

    /// Upcoming appointments of the signed-in user, grouped by patient
    pub async fn upcoming_by_patient(
        state: &ClientState,
        now: NaiveDateTime,
    ) -> ClientResult<BTreeMap<String, Vec<AppointmentRecord>>> {
        let token = state.token().await?;
        let appointments = state
            .check_auth(state.api.list_appointments(&token).await)
            .await?;

        Ok(group_by_patient(&filter_upcoming(&appointments, now)))
    }

    /// Book an appointment at a slot
    pub async fn book(
        state: &ClientState,
        nutritionist_id: Uuid,
        scheduled_at: NaiveDateTime,
    ) -> ClientResult<AppointmentRecord> {
        let token = state.token().await?;
        let request = BookAppointmentRequest {
            nutritionist_id,
            scheduled_at,
        };
        let record = state
            .check_auth(state.api.book_appointment(&token, &request).await)
            .await?;

        info!(appointment_id = %record.id, %scheduled_at, "Appointment booked");
        Ok(record)
    }

    /// Confirm that an appointment took place
    pub async fn confirm(state: &ClientState, appointment_id: Uuid) -> ClientResult<AppointmentRecord> {
        let token = state.token().await?;
        let mut record = state
            .check_auth(state.api.confirm_appointment(&token, appointment_id).await)
            .await?;
        record.mark_completed();

        info!(%appointment_id, "Appointment confirmed");
        Ok(record)
    }

    /// Replace the nutritionist's available hours
    pub async fn update_availability(
        state: &ClientState,
        nutritionist_id: Uuid,
        hours: Vec<String>,
    ) -> ClientResult<NutritionistAvailability> {
        validate_available_hours(&hours).map_err(ClientError::Validation)?;

        let token = state.token().await?;
        let request = UpdateAvailabilityRequest {
            available_hours: hours,
        };
        let availability = state
            .check_auth(
                state
                    .api
                    .update_availability(&token, nutritionist_id, &request)
                    .await,
            )
            .await?;
        state.session.cache_availability(availability.clone()).await?;

        info!(%nutritionist_id, hours = availability.available_hours.len(), "Availability updated");
        Ok(availability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn appointment(scheduled_at: NaiveDateTime) -> AppointmentRecord {
        AppointmentRecord {
            id: Uuid::new_v4(),
            patient_name: "Ana".to_string(),
            nutritionist_name: "Dra. Lima".to_string(),
            scheduled_at,
            completed: false,
        }
    }

    #[test]
    fn test_build_day_schedule_configured_hours() {
        let availability = NutritionistAvailability {
            nutritionist_id: Uuid::from_u128(1),
            available_hours: vec!["09:00".to_string(), "10:00".to_string()],
        };
        let appointments = vec![appointment(at(20, 10)), appointment(at(21, 9))];

        let schedule = build_day_schedule(&availability, at(20, 0).date(), &appointments).unwrap();

        assert!(!schedule.uses_default_hours);
        assert_eq!(schedule.slots.len(), 2);
        assert!(!schedule.slots[0].booked);
        assert!(schedule.slots[1].booked);
        let free: Vec<&str> = schedule.free_slots().map(|s| s.label.as_str()).collect();
        assert_eq!(free, vec!["09:00"]);
    }

    #[test]
    fn test_build_day_schedule_falls_back_to_defaults() {
        let availability = NutritionistAvailability {
            nutritionist_id: Uuid::from_u128(1),
            available_hours: vec![],
        };
        let schedule = build_day_schedule(&availability, at(20, 0).date(), &[appointment(at(20, 8))]).unwrap();

        assert!(schedule.uses_default_hours);
        assert_eq!(schedule.slots.len(), DEFAULT_DISPLAY_HOURS.len());
        assert!(schedule.slots[0].booked);
    }

    #[test]
    fn test_build_day_schedule_rejects_bad_hour() {
        let availability = NutritionistAvailability {
            nutritionist_id: Uuid::from_u128(1),
            available_hours: vec!["nove".to_string()],
        };
        let result = build_day_schedule(&availability, at(20, 0).date(), &[]);
        assert!(matches!(result, Err(ClientError::Calculation(_))));
    }

    proptest! {
        #[test]
        fn prop_one_slot_per_configured_hour(
            minutes in proptest::collection::btree_set(0u32..24 * 60, 0..12),
            booked_index in 0usize..12,
        ) {
            let hours: Vec<String> = minutes
                .iter()
                .map(|m| format!("{:02}:{:02}", m / 60, m % 60))
                .collect();
            let date = at(20, 0).date();
            let appointments: Vec<AppointmentRecord> = minutes
                .iter()
                .nth(booked_index)
                .map(|m| appointment(date.and_hms_opt(m / 60, m % 60, 0).unwrap()))
                .into_iter()
                .collect();
            let availability = NutritionistAvailability {
                nutritionist_id: Uuid::from_u128(1),
                available_hours: hours.clone(),
            };

            let schedule = build_day_schedule(&availability, date, &appointments).unwrap();
            let default_len = DEFAULT_DISPLAY_HOURS.len();

            if hours.is_empty() {
                prop_assert_eq!(schedule.slots.len(), default_len);
            } else {
                prop_assert_eq!(schedule.slots.len(), hours.len());
                let labels: Vec<&str> = schedule.slots.iter().map(|s| s.label.as_str()).collect();
                prop_assert_eq!(labels, hours.iter().map(String::as_str).collect::<Vec<_>>());
                let booked = schedule.slots.iter().filter(|s| s.booked).count();
                prop_assert_eq!(booked, appointments.len());
            }
        }
    }
}
