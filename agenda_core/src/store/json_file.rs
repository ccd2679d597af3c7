//! Appointment list persisted as a JSON array on local disk

use crate::error::{AppError, Result};
use crate::models::Appointment;
use crate::store::{remove_at, AppointmentStore};
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::debug;

/// Every mutation reads the whole file and writes it back through a sibling
/// temp file renamed over the target, so readers see the old or the new list.
/// The mutex only orders writers inside this process.
#[derive(Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<Appointment>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("{} does not exist yet, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_str(&contents)?)
    }

    async fn save(&self, appointments: &[Appointment]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        tokio::fs::create_dir_all(&dir).await?;

        let body = serde_json::to_string_pretty(appointments)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            let mut tmp = NamedTempFile::new_in(&dir)?;
            tmp.write_all(body.as_bytes())?;
            tmp.as_file().sync_all()?;
            tmp.persist(&path).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Storage(format!("JSON write task failed: {}", e)))??;

        debug!("Wrote {} appointments to {}", appointments.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl AppointmentStore for JsonFileStore {
    async fn list_all(&self) -> Result<Vec<Appointment>> {
        self.load().await
    }

    async fn append(&self, appointment: Appointment) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut appointments = self.load().await?;
        appointments.push(appointment);
        self.save(&appointments).await
    }

    async fn delete(&self, index: usize) -> Result<Appointment> {
        let _guard = self.write_lock.lock().await;
        let mut appointments = self.load().await?;
        let removed = remove_at(&mut appointments, index)?;
        self.save(&appointments).await?;
        Ok(removed)
    }

    fn backend_name(&self) -> &'static str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn appointment(id: u64, datetime: &str) -> Appointment {
        Appointment {
            id,
            name: format!("Paciente {}", id),
            email: format!("p{}@example.com", id),
            datetime: datetime.to_string(),
            reason: "Consulta".to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("appointments.json"));
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_persists_to_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("appointments.json");
        let store = JsonFileStore::new(&path);

        store.append(appointment(1, "2024-05-01 09:00")).await.unwrap();

        let reopened = JsonFileStore::new(&path);
        let all = reopened.list_all().await.unwrap();
        assert_eq!(all, vec![appointment(1, "2024-05-01 09:00")]);
    }

    #[tokio::test]
    async fn test_delete_rewrites_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("appointments.json");
        let store = JsonFileStore::new(&path);

        for (id, slot) in [(1, "2024-05-01 09:00"), (2, "2024-05-01 10:00"), (3, "2024-05-02 09:00")] {
            store.append(appointment(id, slot)).await.unwrap();
        }

        let removed = store.delete(0).await.unwrap();
        assert_eq!(removed.id, 1);

        let raw = std::fs::read_to_string(&path).unwrap();
        let on_disk: Vec<Appointment> = serde_json::from_str(&raw).unwrap();
        let ids: Vec<u64> = on_disk.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_delete_out_of_range_leaves_file() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("appointments.json"));
        store.append(appointment(1, "2024-05-01 09:00")).await.unwrap();

        assert!(matches!(store.delete(3).await, Err(AppError::NotFound(_))));
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rewrite_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("appointments.json"));

        store.append(appointment(1, "2024-05-01 09:00")).await.unwrap();
        store.append(appointment(2, "2024-05-01 10:00")).await.unwrap();
        store.delete(0).await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_readers_never_see_partial_file() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("appointments.json"));
        store.append(appointment(1, "2024-05-01 09:00")).await.unwrap();

        let writer = {
            let store = store.clone();
            tokio::spawn(async move {
                for id in 2..40 {
                    store.append(appointment(id, "2024-05-02 09:00")).await.unwrap();
                }
            })
        };

        let mut seen = 1;
        while !writer.is_finished() {
            let count = store.list_all().await.unwrap().len();
            assert!(count >= seen);
            seen = count;
        }
        writer.await.unwrap();
        assert_eq!(store.list_all().await.unwrap().len(), 39);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("appointments.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.list_all().await, Err(AppError::JsonError(_))));
    }
}
