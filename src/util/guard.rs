//! Navigation guard: may this route transition proceed?
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page installs the guard for its own path. The decision itself is a
//! pure function of route metadata and the in-memory session; it never
//! touches the network and never suspends.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::routes::{LANDING_PATH, LOGIN_PATH, Resolution, RouteDescriptor, document_title, resolve};
use crate::state::session::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(&'static str),
}

/// Decide a transition to `target` given the current session.
pub fn decide(target: &RouteDescriptor, session: &Session) -> GuardDecision {
    if !target.requires_auth {
        if target.is_login() && session.is_authenticated() {
            return GuardDecision::Redirect(LANDING_PATH);
        }
        return GuardDecision::Proceed;
    }
    if session.is_authenticated() { GuardDecision::Proceed } else { GuardDecision::Redirect(LOGIN_PATH) }
}

/// Resolve `path` against the route table, then decide.
pub fn decide_path(path: &str, session: &Session) -> GuardDecision {
    match resolve(path) {
        Resolution::Route(route) => decide(route, session),
        Resolution::Redirect(to) => GuardDecision::Redirect(to),
    }
}

/// Install the guard for the page at `path`.
///
/// Sets the document title, redirects whenever the decision is not
/// [`GuardDecision::Proceed`] (re-evaluated on every session change), and
/// returns whether the page may render.
pub fn install_route_guard<F>(path: &'static str, session: RwSignal<Session>, navigate: F) -> Signal<bool>
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let route = match resolve(path) {
        Resolution::Route(route) => Some(route),
        Resolution::Redirect(_) => None,
    };
    crate::util::document::set_title(&document_title(route));

    Effect::new(move || {
        if let GuardDecision::Redirect(to) = session.with(|s| decide_path(path, s)) {
            log::debug!("guard: {path} -> {to}");
            navigate(to, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    Signal::derive(move || session.with(|s| decide_path(path, s)) == GuardDecision::Proceed)
}
