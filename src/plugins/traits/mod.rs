pub mod notifier;
pub mod strategy;

pub use notifier::{Notification, NotificationChannel};
pub use strategy::AvailabilityStrategy;
