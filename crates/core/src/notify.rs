//! User-facing error notification.
//!
//! The core decides *that* a message must be shown; the host decides how
//! (status bar, toast, dialog).

/// Sink for messages the user should see.
pub trait Notifier: Send + Sync {
    fn show_error(&self, message: &str);
}

/// Notifier for headless hosts: messages only go to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show_error(&self, message: &str) {
        log::error!("{}", message);
    }
}
