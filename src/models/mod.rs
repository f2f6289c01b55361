use serde::{Deserialize, Serialize};
use std::fmt;

pub mod status_record;

pub use status_record::StatusRecord;

/// Availability of the watched product as observed on one run.
///
/// Serialized with the identifiers the state file has always used so that
/// records written by earlier deployments stay readable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AvailabilityStatus {
    #[serde(rename = "in_stock")]
    Available,
    #[serde(rename = "out_of_stock")]
    Unavailable,
    #[serde(rename = "unknown")]
    Indeterminate,
}

impl AvailabilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "in_stock",
            AvailabilityStatus::Unavailable => "out_of_stock",
            AvailabilityStatus::Indeterminate => "unknown",
        }
    }

    /// Exit code reported for a completed run with this status.
    pub fn exit_code(&self) -> u8 {
        match self {
            AvailabilityStatus::Unavailable => 1,
            AvailabilityStatus::Available | AvailabilityStatus::Indeterminate => 0,
        }
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict of the classifier together with the signal that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub status: AvailabilityStatus,
    pub reason: String,
}

impl ClassificationResult {
    pub fn new(status: AvailabilityStatus, reason: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
        }
    }

    pub fn available(reason: impl Into<String>) -> Self {
        Self::new(AvailabilityStatus::Available, reason)
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::new(AvailabilityStatus::Unavailable, reason)
    }

    pub fn indeterminate(reason: impl Into<String>) -> Self {
        Self::new(AvailabilityStatus::Indeterminate, reason)
    }
}
