use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::models::{AvailabilityStatus, StatusRecord};
use crate::utils::error::Result;

/// File-backed store holding the single most recent [`StatusRecord`].
///
/// Reads never fail: a missing, unreadable or unrecognized file means there is
/// no prior observation. Write failures are reported to the caller, which
/// decides whether they matter.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Option<StatusRecord> {
        match self.try_load() {
            Ok(record) => Some(record),
            Err(e) => {
                debug!("No usable prior status in {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn try_load(&self) -> Result<StatusRecord> {
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self, status: AvailabilityStatus) -> Result<StatusRecord> {
        let record = StatusRecord::new(status);
        self.write(&record)?;
        Ok(record)
    }

    pub fn write(&self, record: &StatusRecord) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Persists `status`, logging instead of failing when the write does not
    /// go through.
    pub fn save_or_warn(&self, status: AvailabilityStatus) -> Option<StatusRecord> {
        match self.save(status) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Failed to save status to {}: {}", self.path.display(), e);
                None
            }
        }
    }
}
