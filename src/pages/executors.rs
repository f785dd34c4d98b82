//! Registered executor processes and their load.

#[cfg(test)]
#[path = "executors_test.rs"]
mod executors_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app::use_api_client;
use crate::components::data_table::{EmptyRow, Pager, cell_text};
use crate::components::layout::Layout;
use crate::net::scheduler_api;
use crate::net::types::{ExecutorListParams, ExecutorNode, PageParams, TaskGroup};
use crate::pages::tasks::{GroupSelect, parse_group_filter};
use crate::state::session::Session;
use crate::util::guard::install_route_guard;

pub const EXECUTOR_PATH: &str = "/executor";

pub fn executor_status_label(status: i32) -> &'static str {
    match status {
        1 => "Online",
        0 => "Offline",
        _ => "Unknown",
    }
}

/// "3 / 10" running jobs against the concurrency limit.
pub fn load_text(node: &ExecutorNode) -> String {
    format!("{} / {}", node.current_load, node.max_concurrent)
}

/// Resource usage percentage with one decimal.
pub fn usage_text(value: f64) -> String {
    if value.is_finite() { format!("{value:.1}%") } else { "-".to_owned() }
}

#[component]
pub fn ExecutorsPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let allowed = install_route_guard(EXECUTOR_PATH, session, use_navigate());

    view! {
        <Show when=move || allowed.get()>
            <Layout>
                <ExecutorsView/>
            </Layout>
        </Show>
    }
}

#[component]
fn ExecutorsView() -> impl IntoView {
    let client = use_api_client();
    let groups = RwSignal::new(Vec::<TaskGroup>::new());
    let page = RwSignal::new(1_u32);
    let group_filter = RwSignal::new(None::<i64>);
    let online_only = RwSignal::new(false);
    let rows = RwSignal::new(Vec::<ExecutorNode>::new());
    let total = RwSignal::new(0_i64);
    let loading = RwSignal::new(true);
    let selected = RwSignal::new(None::<ExecutorNode>);
    let page_size = PageParams::default().page_size;

    Effect::new(move || {
        let client = client.get_value();
        leptos::task::spawn_local(async move {
            if let Ok(envelope) = scheduler_api::all_groups(&client).await {
                groups.try_set(envelope.data);
            }
        });
    });

    Effect::new(move || {
        let group_id = group_filter.get();
        let online = online_only.get();
        let params = ExecutorListParams { page: PageParams { page: page.get(), page_size }, group_id, status: None };
        let client = client.get_value();
        loading.set(true);
        leptos::task::spawn_local(async move {
            // The online listing is per group and unpaged.
            match (online, group_id) {
                (true, Some(group_id)) => {
                    if let Ok(envelope) = scheduler_api::online_executors(&client, group_id).await {
                        total.try_set(i64::try_from(envelope.data.len()).unwrap_or(i64::MAX));
                        rows.try_set(envelope.data);
                    }
                }
                _ => {
                    if let Ok(envelope) = scheduler_api::list_executors(&client, &params).await {
                        rows.try_set(envelope.data.list);
                        total.try_set(envelope.data.total);
                    }
                }
            }
            loading.try_set(false);
        });
    });

    let on_select = move |id: String| {
        let client = client.get_value();
        leptos::task::spawn_local(async move {
            if let Ok(envelope) = scheduler_api::executor_detail(&client, &id).await {
                selected.try_set(Some(envelope.data));
            }
        });
    };

    view! {
        <section class="panel">
            <h2 class="panel__title">"Executors"</h2>
            <div class="toolbar-form">
                <GroupSelect
                    groups=groups
                    placeholder="All groups"
                    on_change=Callback::new(move |value: String| {
                        group_filter.set(parse_group_filter(&value));
                        page.set(1);
                    })
                />
                <label class="form-check">
                    <input
                        type="checkbox"
                        prop:checked=move || online_only.get()
                        disabled=move || group_filter.get().is_none()
                        on:change=move |ev| online_only.set(event_target_checked(&ev))
                    />
                    "Online only"
                </label>
            </div>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"ID"</th>
                        <th>"App"</th>
                        <th>"Address"</th>
                        <th>"Load"</th>
                        <th>"CPU"</th>
                        <th>"Memory"</th>
                        <th>"Heartbeat"</th>
                        <th>"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || rows.with(Vec::is_empty)>
                        <EmptyRow columns=8 loading=loading/>
                    </Show>
                    <For
                        each=move || rows.get()
                        key=|node| (node.id.clone(), node.status, node.last_heartbeat.clone())
                        children=move |node: ExecutorNode| {
                            let id = node.id.clone();
                            view! {
                                <tr>
                                    <td>
                                        <a href="#" on:click=move |ev| {
                                            ev.prevent_default();
                                            on_select(id.clone());
                                        }>{node.id.clone()}</a>
                                    </td>
                                    <td>{node.app_name.clone()}</td>
                                    <td>{node.address()}</td>
                                    <td>{load_text(&node)}</td>
                                    <td>{usage_text(node.cpu_usage)}</td>
                                    <td>{usage_text(node.memory_usage)}</td>
                                    <td>{cell_text(&node.last_heartbeat)}</td>
                                    <td>{executor_status_label(node.status)}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            <Show when=move || !(online_only.get() && group_filter.get().is_some())>
                <Pager page=page total=total page_size=page_size/>
            </Show>
        </section>
        <Show when=move || selected.with(Option::is_some)>
            <section class="panel">
                <div class="panel__header">
                    <h2 class="panel__title">
                        {move || selected.with(|s| s.as_ref().map(ExecutorNode::address).unwrap_or_default())}
                    </h2>
                    <button class="btn" on:click=move |_| selected.set(None)>"Close"</button>
                </div>
                <dl class="detail-list">
                    {move || selected.with(|s| s.as_ref().map(detail_rows).unwrap_or_default())
                        .into_iter()
                        .map(|(label, value)| view! { <dt>{label}</dt><dd>{value}</dd> })
                        .collect_view()}
                </dl>
            </section>
        </Show>
    }
}

/// Label/value pairs for the executor detail panel.
pub fn detail_rows(node: &ExecutorNode) -> Vec<(&'static str, String)> {
    vec![
        ("Executor ID", node.id.clone()),
        ("App", cell_text(&node.app_name)),
        ("Group", node.group_id.to_string()),
        ("Weight", node.weight.to_string()),
        ("Load", load_text(node)),
        ("Registered", cell_text(&node.registered_at)),
        ("Last heartbeat", cell_text(&node.last_heartbeat)),
        ("Status", executor_status_label(node.status).to_owned()),
    ]
}
