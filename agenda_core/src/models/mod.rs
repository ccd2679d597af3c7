pub mod appointment;
pub mod request;

pub use appointment::{Appointment, AppointmentForm, SHEET_HEADER};
pub use request::{ApiResponse, Availability, AvailabilityQuery, CancelForm, Screen, ScreenQuery};
