//! Landing page: run statistics, recent runs, and the account panel.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app::use_api_client;
use crate::components::data_table::{EmptyRow, cell_text};
use crate::components::layout::Layout;
use crate::net::types::{InstanceStatistics, StatisticsParams, TaskInstance};
use crate::net::{api, scheduler_api};
use crate::pages::instances::instance_status_label;
use crate::routes::LANDING_PATH;
use crate::state::session::Session;
use crate::util::feedback::{NoticeLevel, Notifier, ToastNotifier};
use crate::util::guard::install_route_guard;

const RECENT_LIMIT: u32 = 10;
const MIN_PASSWORD_LEN: usize = 6;

/// Summary cards, in display order.
pub fn stat_cards(stats: &InstanceStatistics) -> Vec<(&'static str, String)> {
    vec![
        ("Total runs", stats.total.to_string()),
        ("Succeeded", stats.success.to_string()),
        ("Failed", stats.failed.to_string()),
        ("Running", stats.running.to_string()),
        ("Success rate", format!("{:.1}%", stats.rate)),
    ]
}

/// Check a password change before sending it.
pub fn validate_password_change(old: &str, new: &str, confirm: &str) -> Result<(), &'static str> {
    if old.is_empty() || new.is_empty() {
        return Err("Enter both the current and the new password.");
    }
    if new.chars().count() < MIN_PASSWORD_LEN {
        return Err("The new password must be at least 6 characters.");
    }
    if new != confirm {
        return Err("The new passwords do not match.");
    }
    Ok(())
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let allowed = install_route_guard(LANDING_PATH, session, use_navigate());

    view! {
        <Show when=move || allowed.get()>
            <Layout>
                <StatisticsPanel/>
                <RecentRuns/>
                <AccountPanel/>
            </Layout>
        </Show>
    }
}

#[component]
fn StatisticsPanel() -> impl IntoView {
    let client = use_api_client();
    let stats = RwSignal::new(InstanceStatistics::default());

    Effect::new(move || {
        let client = client.get_value();
        leptos::task::spawn_local(async move {
            if let Ok(envelope) = scheduler_api::instance_statistics(&client, &StatisticsParams::default()).await {
                stats.try_set(envelope.data);
            }
        });
    });

    view! {
        <section class="stat-cards">
            {move || {
                stats
                    .with(stat_cards)
                    .into_iter()
                    .map(|(label, value)| {
                        view! {
                            <div class="stat-card">
                                <span class="stat-card__label">{label}</span>
                                <span class="stat-card__value">{value}</span>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </section>
    }
}

#[component]
fn RecentRuns() -> impl IntoView {
    let client = use_api_client();
    let rows = RwSignal::new(Vec::<TaskInstance>::new());
    let loading = RwSignal::new(true);

    Effect::new(move || {
        let client = client.get_value();
        leptos::task::spawn_local(async move {
            if let Ok(envelope) = scheduler_api::recent_instances(&client, Some(RECENT_LIMIT)).await {
                rows.try_set(envelope.data);
            }
            loading.try_set(false);
        });
    });

    view! {
        <section class="panel">
            <h2 class="panel__title">"Recent runs"</h2>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"ID"</th>
                        <th>"Task"</th>
                        <th>"Executor"</th>
                        <th>"Triggered"</th>
                        <th>"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || rows.with(Vec::is_empty)>
                        <EmptyRow columns=5 loading=loading/>
                    </Show>
                    <For
                        each=move || rows.get()
                        key=|run| run.id
                        children=move |run: TaskInstance| {
                            let task = run.task.as_ref().map(|t| t.name.clone()).unwrap_or_else(|| run.task_id.to_string());
                            view! {
                                <tr>
                                    <td>{run.id}</td>
                                    <td>{task}</td>
                                    <td>{cell_text(&run.executor_address)}</td>
                                    <td>{cell_text(&run.trigger_time)}</td>
                                    <td>{instance_status_label(run.status)}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </section>
    }
}

#[component]
fn AccountPanel() -> impl IntoView {
    let client = use_api_client();
    let notifier = ToastNotifier::new(expect_context());
    let old_password = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let (old, new) = (old_password.get_untracked(), new_password.get_untracked());
        if let Err(msg) = validate_password_change(&old, &new, &confirm_password.get_untracked()) {
            notifier.notify(NoticeLevel::Warning, msg);
            return;
        }
        busy.set(true);
        let client = client.get_value();
        leptos::task::spawn_local(async move {
            if api::change_password(&client, &old, &new).await.is_ok() {
                notifier.notify(NoticeLevel::Success, "Password changed");
                for field in [old_password, new_password, confirm_password] {
                    field.try_set(String::new());
                }
            }
            busy.try_set(false);
        });
    };

    let input = move |field: RwSignal<String>, placeholder: &'static str, autocomplete: &'static str| {
        view! {
            <input
                class="form-input"
                type="password"
                placeholder=placeholder
                autocomplete=autocomplete
                prop:value=move || field.get()
                on:input=move |ev| field.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <section class="panel">
            <h2 class="panel__title">"Change password"</h2>
            <form class="form form--inline" on:submit=on_submit>
                {input(old_password, "Current password", "current-password")}
                {input(new_password, "New password", "new-password")}
                {input(confirm_password, "Confirm new password", "new-password")}
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    "Update"
                </button>
            </form>
        </section>
    }
}
