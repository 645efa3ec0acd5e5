//! Appointment grouping and availability slots
//!
//! Appointments are point-in-time markers: a slot is booked when an
//! appointment starts at the same date, hour and minute. No durations or
//! overlaps are modelled.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::CalculationError;
use crate::models::AppointmentRecord;

/// Hours shown when a nutritionist has not configured any availability
pub const DEFAULT_DISPLAY_HOURS: &[&str] = &[
    "08:00", "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00",
];

/// A bookable time of day on a given date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// "HH:MM"
    pub label: String,
    pub booked: bool,
}

/// Parse an "HH:MM" hour string
pub fn parse_hour(hour: &str) -> Result<NaiveTime, CalculationError> {
    NaiveTime::parse_from_str(hour.trim(), "%H:%M")
        .map_err(|_| CalculationError::InvalidHour(hour.to_string()))
}

/// Partition appointments by patient name
///
/// Names are matched exactly. Each group is sorted most recent first; equal
/// timestamps are ordered by appointment id.
pub fn group_by_patient(appointments: &[AppointmentRecord]) -> BTreeMap<String, Vec<AppointmentRecord>> {
    let mut groups: BTreeMap<String, Vec<AppointmentRecord>> = BTreeMap::new();
    for appointment in appointments {
        groups
            .entry(appointment.patient_name.clone())
            .or_default()
            .push(appointment.clone());
    }

    for records in groups.values_mut() {
        records.sort_by(|a, b| {
            b.scheduled_at
                .cmp(&a.scheduled_at)
                .then_with(|| a.id.cmp(&b.id))
        });
    }
    groups
}

/// Partition appointments by calendar day, earliest first within a day
pub fn group_by_day(appointments: &[AppointmentRecord]) -> BTreeMap<NaiveDate, Vec<AppointmentRecord>> {
    let mut groups: BTreeMap<NaiveDate, Vec<AppointmentRecord>> = BTreeMap::new();
    for appointment in appointments {
        groups.entry(appointment.date()).or_default().push(appointment.clone());
    }

    for records in groups.values_mut() {
        records.sort_by(|a, b| {
            a.scheduled_at
                .cmp(&b.scheduled_at)
                .then_with(|| a.id.cmp(&b.id))
        });
    }
    groups
}

/// Build the day's slots from configured hours, marking booked ones
///
/// Slots follow the configured order. An empty hour list yields no slots.
pub fn derive_available_slots<S: AsRef<str>>(
    nutritionist_hours: &[S],
    date: NaiveDate,
    booked_appointments: &[AppointmentRecord],
) -> Result<Vec<TimeSlot>, CalculationError> {
    nutritionist_hours
        .iter()
        .map(|hour| {
            let time = parse_hour(hour.as_ref())?;
            let booked = booked_appointments
                .iter()
                .any(|a| starts_at(a.scheduled_at, date, time));
            Ok(TimeSlot {
                date,
                time,
                label: time.format("%H:%M").to_string(),
                booked,
            })
        })
        .collect()
}

fn starts_at(scheduled_at: NaiveDateTime, date: NaiveDate, time: NaiveTime) -> bool {
    scheduled_at.date() == date
        && scheduled_at.hour() == time.hour()
        && scheduled_at.minute() == time.minute()
}

/// Appointments scheduled strictly after `now`, in input order
pub fn filter_upcoming(appointments: &[AppointmentRecord], now: NaiveDateTime) -> Vec<AppointmentRecord> {
    appointments
        .iter()
        .filter(|a| a.scheduled_at > now)
        .cloned()
        .collect()
}
