pub mod manager;
pub mod notifiers;
pub mod strategies;
pub mod traits;

pub use manager::{DispatchReport, NotifierManager};
pub use traits::{AvailabilityStrategy, Notification, NotificationChannel};
