//! Host UI collaborators
//!
//! The client reports failures through a transient toast and redirects to the
//! login page after a 401. Both are host capabilities injected at construction.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastIcon {
    Success,
    Error,
    Loading,
    /// Text only.
    #[default]
    None,
}

/// Transient user notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub title: String,
    pub icon: ToastIcon,
}

impl Toast {
    /// Text-only toast, the only kind this crate shows.
    pub fn text(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: ToastIcon::None,
        }
    }
}

/// Shows transient notifications.
pub trait Notifier: Send + Sync {
    fn show_toast(&self, toast: Toast);
}

/// Opens a page of the host application.
pub trait Navigator: Send + Sync {
    fn navigate_to(&self, url: &str);
}

/// Notifier for headless hosts: writes the toast to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show_toast(&self, toast: Toast) {
        log::warn!("[toast] {}", toast.title);
    }
}

/// Navigator for headless hosts: writes the route to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate_to(&self, url: &str) {
        log::info!("[navigate] {url}");
    }
}
