pub mod classifier;
pub mod config;
pub mod fetcher;
pub mod keywords;
pub mod models;
pub mod plugins;
pub mod state;
pub mod utils;
pub mod watcher;

// Re-export commonly used types
pub use crate::config::AppConfig;
pub use classifier::AvailabilityClassifier;
pub use models::{AvailabilityStatus, ClassificationResult, StatusRecord};
pub use utils::error::{AppError, Result};
pub use watcher::{CheckReport, Watcher};
