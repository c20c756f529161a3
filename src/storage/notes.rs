//! Note Store
//!
//! Short text notes kept as a JSON array of strings. All access goes through
//! one async mutex so read-modify-write cycles do not interleave.

use std::io::ErrorKind;
use std::path::PathBuf;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::{DashboardError, Result};

#[derive(Debug)]
pub struct NoteStore {
    path: PathBuf,
    max_notes: usize,
    max_note_length: usize,
    lock: Mutex<()>,
}

impl NoteStore {
    pub fn open(path: impl Into<PathBuf>, max_notes: usize, max_note_length: usize) -> Self {
        Self {
            path: path.into(),
            max_notes,
            max_note_length,
            lock: Mutex::new(()),
        }
    }

    /// Current notes. A missing or unreadable file reads as no notes.
    pub async fn list(&self) -> Vec<String> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    /// Appends `note` and returns the updated list.
    ///
    /// Rejects blank notes, notes longer than the configured limit and
    /// additions beyond the configured count.
    pub async fn add(&self, note: &str) -> Result<Vec<String>> {
        if note.trim().is_empty() {
            return Err(DashboardError::InvalidRequest(
                "Note cannot be empty".to_string(),
            ));
        }
        if note.chars().count() > self.max_note_length {
            return Err(DashboardError::InvalidRequest(format!(
                "Note exceeds maximum length of {} characters",
                self.max_note_length
            )));
        }

        let _guard = self.lock.lock().await;
        let mut notes = self.read().await;
        if notes.len() >= self.max_notes {
            return Err(DashboardError::InvalidRequest(format!(
                "Maximum number of notes ({}) reached",
                self.max_notes
            )));
        }

        notes.push(note.to_string());
        self.write(&notes).await?;
        Ok(notes)
    }

    /// Removes and returns the note at `index`.
    pub async fn delete(&self, index: usize) -> Result<String> {
        let _guard = self.lock.lock().await;
        let mut notes = self.read().await;
        if index >= notes.len() {
            return Err(DashboardError::NotFound(format!("Note {} not found", index)));
        }

        let removed = notes.remove(index);
        self.write(&notes).await?;
        Ok(removed)
    }

    async fn read(&self) -> Vec<String> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                warn!("Failed to read notes from {}: {}", self.path.display(), err);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(notes) => {
                debug!("Loaded {} notes from {}", notes.len(), self.path.display());
                notes
            }
            Err(err) => {
                warn!("Ignoring malformed notes file {}: {}", self.path.display(), err);
                Vec::new()
            }
        }
    }

    async fn write(&self, notes: &[String]) -> Result<()> {
        let storage_err =
            |err: std::io::Error| DashboardError::Storage(format!("Failed to save notes: {}", err));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(storage_err)?;
        }

        let body = serde_json::to_string_pretty(notes)
            .map_err(|err| DashboardError::Internal(err.to_string()))?;
        tokio::fs::write(&self.path, body).await.map_err(storage_err)?;

        debug!("Saved {} notes to {}", notes.len(), self.path.display());
        Ok(())
    }
}
