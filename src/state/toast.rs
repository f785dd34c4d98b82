//! Transient user notices rendered by the toast host.
//!
//! DESIGN
//! ======
//! The request pipeline only knows "notify user with text"; this state is the
//! browser-side sink for those notices, kept separate from session state.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

/// Severity of a user notice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoticeLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    /// CSS modifier used by the toast host.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Info => "toast--info",
            Self::Success => "toast--success",
            Self::Warning => "toast--warning",
            Self::Error => "toast--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

/// Visible notices, oldest first.
#[derive(Clone, Debug, Default)]
pub struct ToastState {
    pub items: Vec<Toast>,
    next_id: u64,
}

/// Oldest notices are dropped past this many.
pub const MAX_VISIBLE_TOASTS: usize = 5;

impl ToastState {
    /// Append a notice and return its id.
    pub fn push(&mut self, level: NoticeLevel, message: &str) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast { id, level, message: message.to_owned() });
        if self.items.len() > MAX_VISIBLE_TOASTS {
            let excess = self.items.len() - MAX_VISIBLE_TOASTS;
            self.items.drain(..excess);
        }
        id
    }

    /// Remove the notice with `id`, if still visible.
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }
}
