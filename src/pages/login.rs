//! Username + password sign-in.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app::{use_api_client, use_session_store};
use crate::routes::LOGIN_PATH;
use crate::state::session::Session;
use crate::util::guard::install_route_guard;

/// Trim the username and require both fields.
pub fn validate_login_input(username: &str, password: &str) -> Result<(String, String), &'static str> {
    let username = username.trim();
    if username.is_empty() {
        return Err("Enter your username.");
    }
    if password.is_empty() {
        return Err("Enter your password.");
    }
    Ok((username.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let allowed = install_route_guard(LOGIN_PATH, session, use_navigate());

    view! {
        <Show when=move || allowed.get()>
            <LoginForm/>
        </Show>
    }
}

#[component]
fn LoginForm() -> impl IntoView {
    let store = use_session_store();
    let client = use_api_client();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let (user, pass) = match validate_login_input(&username.get_untracked(), &password.get_untracked()) {
            Ok(fields) => fields,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set(String::new());

        let (store, client) = (store.get_value(), client.get_value());
        leptos::task::spawn_local(async move {
            // On success the session flips and the login guard redirects away.
            if let Err(err) = store.login(&client, &user, &pass).await {
                log::debug!("sign-in rejected: {err}");
                busy.try_set(false);
            }
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Distributed Job Scheduler"</h1>
                <p class="login-card__subtitle">"Sign in to the operator console"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        autocomplete="username"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
