//! Fixed-position stack of transient notices.

use leptos::prelude::*;

use crate::state::toast::{Toast, ToastState};

/// Renders [`ToastState`] from context. Clicking a toast dismisses it early.
#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-host" aria-live="polite">
            <For
                each=move || toasts.get().items
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    view! {
                        <div
                            class=format!("toast {}", toast.level.css_class())
                            role="status"
                            on:click=move |_| toasts.update(|s| s.dismiss(id))
                        >
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
