//! Console chrome: sidebar navigation, header with the signed-in user, and
//! the logout action.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps every protected page. It is also where a session restored from
//! storage (token only) gets its profile filled in.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::app::{use_api_client, use_session_store};
use crate::routes::{RouteDescriptor, nav_routes};
use crate::state::session::Session;

/// Sidebar link class, marking the entry for `current_path` active.
pub fn nav_link_class(route: &RouteDescriptor, current_path: &str) -> &'static str {
    let current = current_path.trim_end_matches('/');
    if current == route.path { "sidebar__link sidebar__link--active" } else { "sidebar__link" }
}

/// Header label for the signed-in user.
pub fn user_label(session: &Session) -> String {
    session.profile().map(|p| p.display_name().to_owned()).unwrap_or_default()
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let store = use_session_store();
    let client = use_api_client();
    let pathname = use_location().pathname;

    // Token restored from storage without a profile: fetch it once.
    Effect::new(move || {
        if !session.with(|s| s.is_authenticated() && s.profile().is_none()) {
            return;
        }
        let (store, client) = (store.get_value(), client.get_value());
        leptos::task::spawn_local(async move {
            if let Err(err) = store.fetch_profile(&client).await {
                log::warn!("profile fetch failed: {err}");
            }
        });
    });

    // Logging out flips the session signal; the page guard then redirects.
    let on_logout = move |_| {
        let (store, client) = (store.get_value(), client.get_value());
        leptos::task::spawn_local(async move { store.logout(&client).await });
    };

    view! {
        <div class="layout">
            <aside class="sidebar">
                <div class="sidebar__brand">"Scheduler"</div>
                <nav class="sidebar__nav">
                    {nav_routes()
                        .map(|route| {
                            view! {
                                <a
                                    href=route.path
                                    class=move || nav_link_class(route, &pathname.get())
                                >
                                    {route.title}
                                </a>
                            }
                        })
                        .collect_view()}
                </nav>
            </aside>
            <div class="layout__main">
                <header class="header">
                    <span class="header__spacer"></span>
                    <span class="header__user">{move || session.with(user_label)}</span>
                    <button class="btn header__logout" on:click=on_logout>
                        "Sign out"
                    </button>
                </header>
                <main class="layout__content">{children()}</main>
            </div>
        </div>
    }
}
