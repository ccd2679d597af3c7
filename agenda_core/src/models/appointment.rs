//! Appointment record and the booking form that produces it

use crate::validation::{
    validate_date, validate_single_line, validate_time, DATETIME_FORMAT, DATE_FORMAT, TIME_FORMAT,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Column order used by the spreadsheet backend.
pub const SHEET_HEADER: [&str; 5] = ["ID", "Nombre", "Email", "Fecha", "Motivo"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: u64,
    pub name: String,
    pub email: String,
    /// `YYYY-MM-DD HH:MM`
    pub datetime: String,
    pub reason: String,
}

impl Appointment {
    pub fn slot(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(self.datetime.trim(), DATETIME_FORMAT).ok()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.slot().map(|slot| slot.date())
    }

    /// Hour of the booked slot, truncated to the full hour.
    pub fn hour(&self) -> Option<NaiveTime> {
        self.slot()
            .and_then(|slot| NaiveTime::from_hms_opt(slot.hour(), 0, 0))
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            self.datetime.clone(),
            self.reason.clone(),
        ]
    }

    /// Builds a record from a spreadsheet row. Missing trailing cells read as
    /// empty strings and an unparseable id reads as 0.
    pub fn from_row(row: &[String]) -> Self {
        let cell = |i: usize| row.get(i).map(|c| c.trim().to_string()).unwrap_or_default();

        Self {
            id: cell(0).parse().unwrap_or(0),
            name: cell(1),
            email: cell(2),
            datetime: cell(3),
            reason: cell(4),
        }
    }

    pub fn is_header_row(row: &[String]) -> bool {
        row.first()
            .map(|first| first.trim().eq_ignore_ascii_case(SHEET_HEADER[0]))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AppointmentForm {
    #[serde(default)]
    #[validate(length(max = 200, message = "Name must not exceed 200 characters"))]
    #[validate(custom(function = "validate_single_line", message = "Name must fit on a single line"))]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "Email address is not valid"))]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "validate_date", message = "Date must use the YYYY-MM-DD format"))]
    pub date: String,

    #[serde(default)]
    #[validate(custom(function = "validate_time", message = "Time must use the HH:MM format"))]
    pub time: String,

    #[serde(default)]
    #[validate(length(max = 1000, message = "Reason must not exceed 1000 characters"))]
    pub reason: String,
}

impl AppointmentForm {
    /// Required fields left empty, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("date", &self.date),
            ("time", &self.time),
            ("reason", &self.reason),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Same form with surrounding whitespace stripped from every field.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            date: self.date.trim().to_string(),
            time: self.time.trim().to_string(),
            reason: self.reason.trim().to_string(),
        }
    }

    pub fn slot(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()?;
        let time = NaiveTime::parse_from_str(self.time.trim(), TIME_FORMAT).ok()?;
        Some(date.and_time(time))
    }

    pub fn into_appointment(self, id: u64, slot: NaiveDateTime) -> Appointment {
        Appointment {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            datetime: slot.format(DATETIME_FORMAT).to_string(),
            reason: self.reason.trim().to_string(),
        }
    }
}
