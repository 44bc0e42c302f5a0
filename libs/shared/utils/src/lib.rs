pub mod notify;
pub mod telemetry;
pub mod test_utils;

pub use notify::{Notification, NotificationLevel, Notifier, TracingNotifier};
