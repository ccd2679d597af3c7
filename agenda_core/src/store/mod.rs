//! Persistence adapters for the appointment list
//!
//! Every backend exposes the whole list in insertion order. Deletion is by
//! position in that order and rewrites whatever the backend keeps, so none
//! of them detect concurrent writers.

pub mod json_file;
pub mod memory;
pub mod sheets;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use sheets::SheetsStore;

use crate::error::{AppError, Result};
use crate::models::Appointment;
use async_trait::async_trait;

#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Appointment>>;
    async fn append(&self, appointment: Appointment) -> Result<()>;
    /// Removes the record at `index` and returns it.
    async fn delete(&self, index: usize) -> Result<Appointment>;
    fn backend_name(&self) -> &'static str;
}

pub(crate) fn remove_at(appointments: &mut Vec<Appointment>, index: usize) -> Result<Appointment> {
    if index >= appointments.len() {
        return Err(AppError::NotFound(format!(
            "Appointment at position {} not found",
            index
        )));
    }

    Ok(appointments.remove(index))
}
