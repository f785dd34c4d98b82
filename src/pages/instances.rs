//! Run history: filter by task and status, cancel or retry runs, read logs.

#[cfg(test)]
#[path = "instances_test.rs"]
mod instances_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app::use_api_client;
use crate::components::data_table::{EmptyRow, Pager, cell_text};
use crate::components::layout::Layout;
use crate::net::scheduler_api;
use crate::net::types::{InstanceListParams, PageParams, TaskInstance, TaskLog};
use crate::state::session::Session;
use crate::util::feedback::{NoticeLevel, Notifier, ToastNotifier};
use crate::util::guard::install_route_guard;

pub const INSTANCE_PATH: &str = "/instance";

/// Run statuses in server order, with labels.
pub const INSTANCE_STATUSES: [(i32, &str); 6] = [
    (0, "Pending"),
    (1, "Scheduling"),
    (2, "Running"),
    (3, "Succeeded"),
    (4, "Failed"),
    (5, "Cancelled"),
];

pub fn instance_status_label(status: i32) -> &'static str {
    INSTANCE_STATUSES.iter().find(|(code, _)| *code == status).map_or("Unknown", |&(_, label)| label)
}

/// Runs that have not finished may be cancelled.
pub fn can_cancel(status: i32) -> bool {
    (0..=2).contains(&status)
}

/// Failed and cancelled runs may be retried.
pub fn can_retry(status: i32) -> bool {
    matches!(status, 4 | 5)
}

/// Parse a `<select>` or text filter value; blank means "any".
pub fn parse_filter<T: std::str::FromStr>(value: &str) -> Option<T> {
    value.trim().parse().ok()
}

#[component]
pub fn InstancesPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let allowed = install_route_guard(INSTANCE_PATH, session, use_navigate());

    view! {
        <Show when=move || allowed.get()>
            <Layout>
                <InstancesView/>
            </Layout>
        </Show>
    }
}

#[component]
fn InstancesView() -> impl IntoView {
    let client = use_api_client();
    let notifier = ToastNotifier::new(expect_context());
    let page = RwSignal::new(1_u32);
    let task_input = RwSignal::new(String::new());
    let task_filter = RwSignal::new(None::<i64>);
    let status_filter = RwSignal::new(None::<i32>);
    let rows = RwSignal::new(Vec::<TaskInstance>::new());
    let total = RwSignal::new(0_i64);
    let loading = RwSignal::new(true);
    let refresh = RwSignal::new(0_u32);
    let selected = RwSignal::new(None::<i64>);
    let page_size = PageParams::default().page_size;

    Effect::new(move || {
        refresh.track();
        let params = InstanceListParams {
            page: PageParams { page: page.get(), page_size },
            task_id: task_filter.get(),
            status: status_filter.get(),
            ..InstanceListParams::default()
        };
        let client = client.get_value();
        loading.set(true);
        leptos::task::spawn_local(async move {
            if let Ok(envelope) = scheduler_api::list_instances(&client, &params).await {
                rows.try_set(envelope.data.list);
                total.try_set(envelope.data.total);
            }
            loading.try_set(false);
        });
    });

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        task_filter.set(parse_filter(&task_input.get_untracked()));
        page.set(1);
    };

    let on_cancel = move |id: i64| {
        let client = client.get_value();
        leptos::task::spawn_local(async move {
            if scheduler_api::cancel_instance(&client, id).await.is_ok() {
                notifier.notify(NoticeLevel::Success, "Run cancelled");
                refresh.try_update(|n| *n += 1);
            }
        });
    };

    let on_retry = move |id: i64| {
        let client = client.get_value();
        leptos::task::spawn_local(async move {
            if let Ok(envelope) = scheduler_api::retry_instance(&client, id).await {
                log::info!("run {id} retried as {}", envelope.data.id);
                notifier.notify(NoticeLevel::Success, "Retry scheduled");
                refresh.try_update(|n| *n += 1);
            }
        });
    };

    view! {
        <section class="panel">
            <h2 class="panel__title">"Run history"</h2>
            <form class="toolbar-form" on:submit=on_search>
                <input
                    class="form-input"
                    type="number"
                    min="1"
                    placeholder="Task ID"
                    prop:value=move || task_input.get()
                    on:input=move |ev| task_input.set(event_target_value(&ev))
                />
                <select
                    class="form-select"
                    on:change=move |ev| {
                        status_filter.set(parse_filter(&event_target_value(&ev)));
                        page.set(1);
                    }
                >
                    <option value="">"Any status"</option>
                    {INSTANCE_STATUSES
                        .into_iter()
                        .map(|(code, label)| view! { <option value=code.to_string()>{label}</option> })
                        .collect_view()}
                </select>
                <button class="btn" type="submit">"Search"</button>
            </form>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"ID"</th>
                        <th>"Task"</th>
                        <th>"Trigger"</th>
                        <th>"Executor"</th>
                        <th>"Shard"</th>
                        <th>"Started"</th>
                        <th>"Finished"</th>
                        <th>"Status"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || rows.with(Vec::is_empty)>
                        <EmptyRow columns=9 loading=loading/>
                    </Show>
                    <For
                        each=move || rows.get()
                        key=|run| (run.id, run.status)
                        children=move |run: TaskInstance| {
                            let id = run.id;
                            let status = run.status;
                            let task = run.task.as_ref().map_or_else(|| run.task_id.to_string(), |t| t.name.clone());
                            view! {
                                <tr>
                                    <td>{id}</td>
                                    <td>{task}</td>
                                    <td>{cell_text(&run.trigger_type)}</td>
                                    <td>{cell_text(&run.executor_address)}</td>
                                    <td>{format!("{}/{}", run.shard_index, run.shard_total)}</td>
                                    <td>{cell_text(&run.start_time)}</td>
                                    <td>{cell_text(&run.end_time)}</td>
                                    <td>{instance_status_label(status)}</td>
                                    <td class="data-table__actions">
                                        <button class="btn" on:click=move |_| selected.set(Some(id))>
                                            "Logs"
                                        </button>
                                        <Show when=move || can_cancel(status)>
                                            <button class="btn" on:click=move |_| on_cancel(id)>
                                                "Cancel"
                                            </button>
                                        </Show>
                                        <Show when=move || can_retry(status)>
                                            <button class="btn" on:click=move |_| on_retry(id)>
                                                "Retry"
                                            </button>
                                        </Show>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            <Pager page=page total=total page_size=page_size/>
        </section>
        <Show when=move || selected.get().is_some()>
            <RunLogs selected=selected/>
        </Show>
    }
}

#[component]
fn RunLogs(selected: RwSignal<Option<i64>>) -> impl IntoView {
    let client = use_api_client();
    let detail = RwSignal::new(None::<TaskInstance>);
    let logs = RwSignal::new(Vec::<TaskLog>::new());

    Effect::new(move || {
        let Some(id) = selected.get() else {
            return;
        };
        let client = client.get_value();
        leptos::task::spawn_local(async move {
            if let Ok(envelope) = scheduler_api::instance_detail(&client, id).await {
                detail.try_set(Some(envelope.data));
            }
            if let Ok(envelope) = scheduler_api::instance_logs(&client, id, PageParams::default()).await {
                logs.try_set(envelope.data.list);
            }
        });
    });

    let heading = move || {
        detail.with(|d| match d {
            Some(run) => format!("Run {} - {}", run.id, instance_status_label(run.status)),
            None => "Run logs".to_owned(),
        })
    };

    view! {
        <section class="panel">
            <div class="panel__header">
                <h2 class="panel__title">{heading}</h2>
                <button class="btn" on:click=move |_| selected.set(None)>"Close"</button>
            </div>
            <p class="panel__note">{move || detail.with(|d| d.as_ref().map(|run| cell_text(&run.result_msg)).unwrap_or_default())}</p>
            <pre class="log-view">
                <For
                    each=move || logs.get()
                    key=|line| line.id
                    children=|line: TaskLog| view! { <div class="log-view__line">{format_log_line(&line)}</div> }
                />
            </pre>
        </section>
    }
}

/// "2026-10-19 02:00:01 [INFO] message".
pub fn format_log_line(line: &TaskLog) -> String {
    let time = if line.log_time.is_empty() { &line.created_at } else { &line.log_time };
    format!("{time} [{}] {}", line.log_level, line.log_content)
}
