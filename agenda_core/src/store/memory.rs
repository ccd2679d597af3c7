//! In-process appointment list

use crate::error::Result;
use crate::models::Appointment;
use crate::store::{remove_at, AppointmentStore};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct MemoryStore {
    appointments: Arc<RwLock<Vec<Appointment>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_appointments(appointments: Vec<Appointment>) -> Self {
        Self {
            appointments: Arc::new(RwLock::new(appointments)),
        }
    }
}

#[async_trait]
impl AppointmentStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Appointment>> {
        Ok(self.appointments.read().clone())
    }

    async fn append(&self, appointment: Appointment) -> Result<()> {
        self.appointments.write().push(appointment);
        Ok(())
    }

    async fn delete(&self, index: usize) -> Result<Appointment> {
        let mut appointments = self.appointments.write();
        remove_at(&mut appointments, index)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
