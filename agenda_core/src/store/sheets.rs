//! Appointment list kept in a spreadsheet range
//!
//! Row 1 holds the column titles. Deleting rewrites the range: read every
//! row, drop one, clear, write the rest back. A failure between the clear
//! and the write leaves the sheet empty.

use crate::error::Result;
use crate::models::{Appointment, SHEET_HEADER};
use crate::sheets::SheetsClient;
use crate::store::{remove_at, AppointmentStore};
use async_trait::async_trait;
use tracing::{info, warn};

#[derive(Clone)]
pub struct SheetsStore {
    client: SheetsClient,
    range: String,
}

impl SheetsStore {
    pub fn new(client: SheetsClient, range: impl Into<String>) -> Self {
        Self {
            client,
            range: range.into(),
        }
    }

    fn header_row() -> Vec<String> {
        SHEET_HEADER.iter().map(|title| title.to_string()).collect()
    }

    /// Returns the data rows and whether the sheet already had a header.
    async fn read_rows(&self) -> Result<(Vec<Appointment>, bool)> {
        let rows = self.client.get_values(&self.range).await?;

        let has_header = rows
            .first()
            .map(|row| Appointment::is_header_row(row))
            .unwrap_or(false);

        let appointments = rows
            .iter()
            .skip(usize::from(has_header))
            .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
            .map(|row| Appointment::from_row(row))
            .collect();

        Ok((appointments, has_header))
    }
}

#[async_trait]
impl AppointmentStore for SheetsStore {
    async fn list_all(&self) -> Result<Vec<Appointment>> {
        let (appointments, _) = self.read_rows().await?;
        Ok(appointments)
    }

    async fn append(&self, appointment: Appointment) -> Result<()> {
        let rows = self.client.get_values(&self.range).await?;

        let mut new_rows = Vec::with_capacity(2);
        if rows.is_empty() {
            info!("Spreadsheet range {} is empty, writing header", self.range);
            new_rows.push(Self::header_row());
        }
        new_rows.push(appointment.to_row());

        self.client.append_values(&self.range, new_rows).await
    }

    async fn delete(&self, index: usize) -> Result<Appointment> {
        let (mut appointments, had_header) = self.read_rows().await?;
        let removed = remove_at(&mut appointments, index)?;

        if !had_header {
            warn!("Spreadsheet range {} had no header row, adding one on rewrite", self.range);
        }

        let mut rows = Vec::with_capacity(appointments.len() + 1);
        rows.push(Self::header_row());
        rows.extend(appointments.iter().map(Appointment::to_row));

        self.client.clear_values(&self.range).await?;
        self.client.update_values(&self.range, rows).await?;

        info!("Removed appointment {} from spreadsheet", removed.id);
        Ok(removed)
    }

    fn backend_name(&self) -> &'static str {
        "sheets"
    }
}
