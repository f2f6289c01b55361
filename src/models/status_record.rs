use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::AvailabilityStatus;

/// The single persisted observation: last status and when it was seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub status: AvailabilityStatus,
    /// Unix seconds. Records written without a timestamp load as 0.
    #[serde(default)]
    pub ts: i64,
}

impl StatusRecord {
    pub fn new(status: AvailabilityStatus) -> Self {
        Self {
            status,
            ts: Utc::now().timestamp(),
        }
    }

    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.ts, 0).single()
    }
}
