//! Static route table for the console.
//!
//! Paths here are the single source for the router, the sidebar, and the
//! navigation guard.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

pub const LOGIN_PATH: &str = "/login";
/// Where authenticated users land by default.
pub const LANDING_PATH: &str = "/dashboard";

pub const APP_TITLE: &str = "Scheduler";
pub const DEFAULT_PAGE_TITLE: &str = "Distributed Job Scheduler";

/// Metadata for one view route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub title: &'static str,
    /// Routes are protected unless marked otherwise.
    pub requires_auth: bool,
}

impl RouteDescriptor {
    const fn protected(path: &'static str, title: &'static str) -> Self {
        Self { path, title, requires_auth: true }
    }

    const fn public(path: &'static str, title: &'static str) -> Self {
        Self { path, title, requires_auth: false }
    }

    pub fn is_login(&self) -> bool {
        self.path == LOGIN_PATH
    }
}

pub const ROUTES: &[RouteDescriptor] = &[
    RouteDescriptor::public(LOGIN_PATH, "Login"),
    RouteDescriptor::protected(LANDING_PATH, "Dashboard"),
    RouteDescriptor::protected("/group", "Groups"),
    RouteDescriptor::protected("/task", "Tasks"),
    RouteDescriptor::protected("/instance", "Run History"),
    RouteDescriptor::protected("/executor", "Executors"),
];

/// Result of looking up a path in [`ROUTES`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Route(&'static RouteDescriptor),
    /// The path is not a view; go here instead.
    Redirect(&'static str),
}

/// Look up `path`. The root and unknown paths redirect to the landing route.
pub fn resolve(path: &str) -> Resolution {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    ROUTES
        .iter()
        .find(|r| r.path == trimmed)
        .map_or(Resolution::Redirect(LANDING_PATH), Resolution::Route)
}

/// Protected routes shown in the sidebar, in table order.
pub fn nav_routes() -> impl Iterator<Item = &'static RouteDescriptor> {
    ROUTES.iter().filter(|r| r.requires_auth)
}

/// Browser tab title for a route.
pub fn document_title(route: Option<&RouteDescriptor>) -> String {
    let title = route.map(|r| r.title).filter(|t| !t.is_empty()).unwrap_or(DEFAULT_PAGE_TITLE);
    format!("{title} - {APP_TITLE}")
}
