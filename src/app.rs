//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` is the composition root: it restores the session from storage, builds
//! the one [`ApiClient`], and hands both to the pages through context. Handles
//! that are not `Send` travel as local `StoredValue`s.

use std::rc::Rc;

use leptos::prelude::*;
#[cfg(feature = "ssr")]
use leptos_meta::MetaTags;
use leptos_meta::{Stylesheet, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::toast_host::ToastHost;
use crate::config::ClientConfig;
use crate::net::client::{ApiClient, UiHooks};
use crate::net::transport::default_transport;
use crate::pages::{
    dashboard::DashboardPage, executors::ExecutorsPage, groups::GroupsPage, instances::InstancesPage,
    login::LoginPage, tasks::TasksPage,
};
use crate::routes::LANDING_PATH;
use crate::state::session::{Session, SessionStore};
use crate::state::toast::ToastState;
use crate::util::feedback::{ToastNotifier, WindowConfirm};
use crate::util::navigation::{RouterNavigator, RouterNavigatorBridge};
use crate::util::spawn::LeptosSpawner;
use crate::util::token_storage::BrowserTokenStorage;

/// HTML shell rendered on the server for SSR + hydration.
#[cfg(feature = "ssr")]
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Copyable context handle to the shared [`ApiClient`].
pub type ClientHandle = StoredValue<ApiClient, LocalStorage>;

/// Copyable context handle to the shared [`SessionStore`].
pub type StoreHandle = StoredValue<SessionStore, LocalStorage>;

pub fn use_api_client() -> ClientHandle {
    expect_context::<ClientHandle>()
}

pub fn use_session_store() -> StoreHandle {
    expect_context::<StoreHandle>()
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env();
    let store = SessionStore::restore(Rc::new(BrowserTokenStorage));

    // Reactive mirror of the store for guards and views.
    let session = RwSignal::new(Session::clone(&store.snapshot()));
    store.subscribe(move |next| {
        if session.try_set(next.clone()).is_some() {
            log::debug!("session changed after the app was torn down");
        }
    });

    let toasts = RwSignal::new(ToastState::default());
    let navigator = RouterNavigator::default();
    let hooks = UiHooks {
        notifier: Rc::new(ToastNotifier::new(toasts)),
        prompter: Rc::new(WindowConfirm),
        navigator: Rc::new(navigator.clone()),
        spawner: Rc::new(LeptosSpawner),
    };
    let transport = default_transport(&config);
    let client = ApiClient::new(config, store.clone(), transport, hooks);

    provide_context(session);
    provide_context(toasts);
    provide_context(StoredValue::new_local(client));
    provide_context(StoredValue::new_local(store));
    let navigator = StoredValue::new_local(navigator);

    view! {
        <Stylesheet id="leptos" href="/pkg/scheduler-console.css"/>

        <Router>
            <RouterNavigatorBridge navigator=navigator/>
            <Routes fallback=|| view! { <Redirect path=LANDING_PATH/> }>
                <Route path=StaticSegment("") view=|| view! { <Redirect path=LANDING_PATH/> }/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
                <Route path=StaticSegment("group") view=GroupsPage/>
                <Route path=StaticSegment("task") view=TasksPage/>
                <Route path=StaticSegment("instance") view=InstancesPage/>
                <Route path=StaticSegment("executor") view=ExecutorsPage/>
            </Routes>
        </Router>
        <ToastHost/>
    }
}
