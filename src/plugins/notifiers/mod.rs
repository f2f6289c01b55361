// Notification channel implementations
pub mod email;
pub mod telegram;

pub use email::EmailNotifier;
pub use telegram::TelegramNotifier;
