//! Global notification slot.
//!
//! DESIGN
//! ======
//! One notification is visible at a time; showing a new one replaces the
//! current one. Each show bumps `seq` so an auto-dismiss timer started for an
//! older notification cannot close a newer one.

#[cfg(test)]
#[path = "notification_test.rs"]
mod notification_test;

/// Severity of a notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl NotificationKind {
    pub fn default_title(self) -> &'static str {
        match self {
            Self::Success => "Success!",
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::Info => "Information",
        }
    }

    /// CSS modifier for the toast.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "toast--success",
            Self::Error => "toast--error",
            Self::Warning => "toast--warning",
            Self::Info => "toast--info",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotificationState {
    pub current: Option<Notification>,
    pub seq: u64,
}

impl NotificationState {
    /// Show `message`. A blank `title` falls back to the kind's default.
    pub fn show(&mut self, kind: NotificationKind, message: impl Into<String>, title: &str) -> u64 {
        let title = if title.trim().is_empty() { kind.default_title().to_owned() } else { title.to_owned() };
        self.seq += 1;
        self.current = Some(Notification { kind, title, message: message.into() });
        self.seq
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.show(NotificationKind::Success, message, "")
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.show(NotificationKind::Error, message, "")
    }

    pub fn warning(&mut self, message: impl Into<String>) -> u64 {
        self.show(NotificationKind::Warning, message, "")
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.show(NotificationKind::Info, message, "")
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    /// Close only if `seq` still identifies the visible notification.
    pub fn expire(&mut self, seq: u64) {
        if self.seq == seq {
            self.close();
        }
    }
}
