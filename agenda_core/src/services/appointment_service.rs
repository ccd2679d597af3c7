use crate::{
    config::ScheduleConfig,
    error::{AppError, Result},
    models::{Appointment, AppointmentForm},
    services::schedule,
    store::AppointmentStore,
    validation::{Validatable, ValidationResult, DATETIME_FORMAT, DATE_FORMAT, TIME_FORMAT},
};
use chrono::{NaiveDate, NaiveTime, Timelike};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppointmentService {
    store: Arc<dyn AppointmentStore>,
    schedule: ScheduleConfig,
}

impl AppointmentService {
    pub fn new(store: Arc<dyn AppointmentStore>, schedule: ScheduleConfig) -> Self {
        Self { store, schedule }
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    pub fn schedule(&self) -> &ScheduleConfig {
        &self.schedule
    }

    pub async fn list(&self) -> Result<Vec<Appointment>> {
        self.store.list_all().await
    }

    pub async fn available_hours(&self, date: NaiveDate) -> Result<Vec<NaiveTime>> {
        let appointments = self.store.list_all().await?;
        Ok(schedule::available_hours(&self.schedule, date, &appointments))
    }

    /// Same as [`available_hours`](Self::available_hours) for a `YYYY-MM-DD` string.
    pub async fn available_hours_for(&self, date: &str) -> Result<Vec<String>> {
        let date = parse_date(date)?;
        let hours = self.available_hours(date).await?;
        Ok(hours.iter().map(|h| h.format(TIME_FORMAT).to_string()).collect())
    }

    pub async fn book(&self, form: AppointmentForm) -> Result<Appointment> {
        let form = form.normalized();

        let missing = form.missing_fields();
        if !missing.is_empty() {
            warn!("Rejected booking with empty fields: {:?}", missing);
            let mut result = ValidationResult::success();
            for field in missing {
                result.add_error(field, "This field is required");
            }
            return Err(AppError::Validation(result.summary()));
        }

        form.validate_comprehensive().into_result()?;

        let slot = form
            .slot()
            .ok_or_else(|| AppError::Validation("Invalid date or time".to_string()))?;

        let on_schedule = slot.minute() == 0
            && (self.schedule.open_hour..=self.schedule.close_hour).contains(&slot.hour());
        if !on_schedule {
            return Err(AppError::Validation(format!(
                "Appointments start on the hour between {:02}:00 and {:02}:00",
                self.schedule.open_hour, self.schedule.close_hour
            )));
        }

        let appointments = self.store.list_all().await?;

        let free = schedule::available_hours(&self.schedule, slot.date(), &appointments);
        if !free.contains(&slot.time()) {
            return Err(AppError::SlotTaken(slot.format(DATETIME_FORMAT).to_string()));
        }

        let id = next_id(&appointments);
        let appointment = form.into_appointment(id, slot);
        self.store.append(appointment.clone()).await?;

        info!(
            "Booked appointment {} for {} on {}",
            appointment.id, appointment.name, appointment.datetime
        );
        Ok(appointment)
    }

    pub async fn cancel(&self, index: usize) -> Result<Appointment> {
        let removed = self.store.delete(index).await?;
        info!("Cancelled appointment {} ({})", removed.id, removed.datetime);
        Ok(removed)
    }

    pub async fn get_stats(&self) -> Result<serde_json::Value> {
        let appointments = self.store.list_all().await?;

        Ok(serde_json::json!({
            "total_appointments": appointments.len(),
            "source": self.store.backend_name(),
        }))
    }
}

pub fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map_err(|_| AppError::BadRequest(format!("Invalid date '{}', expected YYYY-MM-DD", date)))
}

/// Highest id in use plus one.
pub fn next_id(appointments: &[Appointment]) -> u64 {
    appointments.iter().map(|a| a.id).max().unwrap_or(0) + 1
}
