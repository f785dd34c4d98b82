//! Client-side navigation handle usable outside the router tree.
//!
//! SYSTEM CONTEXT
//! ==============
//! The API client is built before `<Router>` mounts, but a forced logout
//! must navigate through the router (no full reload). `RouterNavigator` is
//! created empty and filled in by [`RouterNavigatorBridge`] once the router
//! exists.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

/// Performs an in-app navigation to `path`.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

type NavigateFn = Rc<dyn Fn(&str)>;

/// Navigator backed by the router's navigate function once installed.
#[derive(Clone, Default)]
pub struct RouterNavigator {
    target: Rc<RefCell<Option<NavigateFn>>>,
}

impl RouterNavigator {
    pub fn install<F>(&self, navigate: F)
    where
        F: Fn(&str) + 'static,
    {
        *self.target.borrow_mut() = Some(Rc::new(navigate));
    }

    pub fn is_installed(&self) -> bool {
        self.target.borrow().is_some()
    }
}

impl Navigator for RouterNavigator {
    fn navigate(&self, path: &str) {
        // Clone out of the cell so the callback may re-enter `install`.
        let target = self.target.borrow().clone();
        match target {
            Some(navigate) => navigate(path),
            None => log::warn!("navigation to {path} requested before the router mounted"),
        }
    }
}

/// Installs the router's navigate function into the provided navigator.
/// Must be rendered inside `<Router>`.
#[component]
pub fn RouterNavigatorBridge(navigator: StoredValue<RouterNavigator, LocalStorage>) -> impl IntoView {
    let navigate = use_navigate();
    navigator.with_value(|nav| {
        nav.install(move |path| navigate(path, NavigateOptions::default()));
    });
}
