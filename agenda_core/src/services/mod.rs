pub mod appointment_service;
pub mod schedule;

pub use appointment_service::AppointmentService;
