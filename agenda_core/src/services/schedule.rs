//! Hourly slot arithmetic

use crate::config::ScheduleConfig;
use crate::models::Appointment;
use chrono::{NaiveDate, NaiveTime};
use std::collections::HashSet;

/// Every bookable hour, from opening to closing inclusive.
pub fn candidate_hours(schedule: &ScheduleConfig) -> Vec<NaiveTime> {
    (schedule.open_hour..=schedule.close_hour)
        .filter_map(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
        .collect()
}

/// Candidate hours on `date` that no appointment has taken yet.
pub fn available_hours(
    schedule: &ScheduleConfig,
    date: NaiveDate,
    appointments: &[Appointment],
) -> Vec<NaiveTime> {
    let booked: HashSet<NaiveTime> = appointments
        .iter()
        .filter(|appointment| appointment.date() == Some(date))
        .filter_map(Appointment::hour)
        .collect();

    candidate_hours(schedule)
        .into_iter()
        .filter(|hour| !booked.contains(hour))
        .collect()
}
