//! User-feedback capabilities consumed by the request pipeline.
//!
//! SYSTEM CONTEXT
//! ==============
//! The inbound stage needs exactly two presentation capabilities: a
//! non-blocking notice and a yes/no question it can await. Both are traits so
//! the pipeline never depends on how they are drawn.

#[cfg(test)]
#[path = "feedback_test.rs"]
mod feedback_test;

use async_trait::async_trait;
use leptos::prelude::*;

pub use crate::state::toast::NoticeLevel;
use crate::state::toast::ToastState;

/// Non-blocking "notify user with text".
pub trait Notifier {
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// A yes/no question shown to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: &'static str,
    pub message: &'static str,
    pub confirm_label: &'static str,
    pub cancel_label: &'static str,
}

impl ConfirmPrompt {
    /// Asked when the server reports the session's credentials as invalid.
    pub fn session_expired() -> Self {
        Self {
            title: "Notice",
            message: "Your session has expired, please sign in again",
            confirm_label: "Sign in again",
            cancel_label: "Cancel",
        }
    }

    /// Confirmation before an irreversible action.
    pub fn destructive(message: &'static str, confirm_label: &'static str) -> Self {
        Self { title: "Confirm", message, confirm_label, cancel_label: "Cancel" }
    }

    /// Single-line text for prompts that cannot render a title.
    pub fn text(&self) -> String {
        format!("{}\n\n{}", self.title, self.message)
    }
}

/// "Ask yes/no and await the answer".
#[async_trait(?Send)]
pub trait Prompter {
    /// Resolves `true` only when the user confirms.
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool;
}

/// Default toast lifetime.
pub const TOAST_DISMISS_MS: u32 = 3_000;

/// Pushes notices into the shared [`ToastState`] signal.
#[derive(Clone, Copy)]
pub struct ToastNotifier {
    toasts: RwSignal<ToastState>,
    dismiss_after_ms: u32,
}

impl ToastNotifier {
    pub fn new(toasts: RwSignal<ToastState>) -> Self {
        Self { toasts, dismiss_after_ms: TOAST_DISMISS_MS }
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Error | NoticeLevel::Warning => log::warn!("notice: {message}"),
            NoticeLevel::Info | NoticeLevel::Success => log::info!("notice: {message}"),
        }
        let Some(id) = self.toasts.try_update(|s| s.push(level, message)) else {
            return;
        };
        #[cfg(feature = "hydrate")]
        {
            let toasts = self.toasts;
            let delay = self.dismiss_after_ms;
            leptos::task::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(delay).await;
                toasts.try_update(|s| s.dismiss(id));
            });
        }
        #[cfg(not(feature = "hydrate"))]
        log::trace!("toast {id} has no dismiss timer ({} ms) outside the browser", self.dismiss_after_ms);
    }
}

/// Blocking `window.confirm` dialog.
#[derive(Clone, Copy, Default)]
pub struct WindowConfirm;

#[async_trait(?Send)]
impl Prompter for WindowConfirm {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        #[cfg(feature = "hydrate")]
        {
            web_sys::window()
                .map(|w| w.confirm_with_message(&prompt.text()))
                .is_some_and(|answer| answer.unwrap_or(false))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            log::debug!("no browser to confirm {:?}; declining", prompt.text());
            false
        }
    }
}
