//! Task group management: search, create, delete.

#[cfg(test)]
#[path = "groups_test.rs"]
mod groups_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app::use_api_client;
use crate::components::data_table::{EmptyRow, Pager, cell_text, optional_text};
use crate::components::layout::Layout;
use crate::net::scheduler_api;
use crate::net::types::{CreateGroupRequest, GroupListParams, PageParams, TaskGroup};
use crate::state::session::Session;
use crate::util::feedback::{ConfirmPrompt, NoticeLevel, Notifier, Prompter, ToastNotifier, WindowConfirm};
use crate::util::guard::install_route_guard;

pub const GROUP_PATH: &str = "/group";

pub fn group_status_label(status: i32) -> &'static str {
    match status {
        1 => "Enabled",
        0 => "Disabled",
        _ => "Unknown",
    }
}

/// Build a create request from raw form input.
pub fn build_group_request(name: &str, app_name: &str, description: &str) -> Result<CreateGroupRequest, &'static str> {
    let name = optional_text(name).ok_or("Enter a group name.")?;
    let app_name = optional_text(app_name).ok_or("Enter the executor app name.")?;
    Ok(CreateGroupRequest { name, app_name, description: optional_text(description) })
}

#[component]
pub fn GroupsPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let allowed = install_route_guard(GROUP_PATH, session, use_navigate());

    view! {
        <Show when=move || allowed.get()>
            <Layout>
                <GroupsView/>
            </Layout>
        </Show>
    }
}

#[component]
fn GroupsView() -> impl IntoView {
    let client = use_api_client();
    let notifier = ToastNotifier::new(expect_context());
    let page = RwSignal::new(1_u32);
    let keyword_input = RwSignal::new(String::new());
    let keyword = RwSignal::new(None::<String>);
    let rows = RwSignal::new(Vec::<TaskGroup>::new());
    let total = RwSignal::new(0_i64);
    let loading = RwSignal::new(true);
    let refresh = RwSignal::new(0_u32);
    let page_size = PageParams::default().page_size;

    Effect::new(move || {
        refresh.track();
        let params = GroupListParams { page: PageParams { page: page.get(), page_size }, keyword: keyword.get() };
        let client = client.get_value();
        loading.set(true);
        leptos::task::spawn_local(async move {
            if let Ok(envelope) = scheduler_api::list_groups(&client, &params).await {
                rows.try_set(envelope.data.list);
                total.try_set(envelope.data.total);
            }
            loading.try_set(false);
        });
    });

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        keyword.set(optional_text(&keyword_input.get_untracked()));
        page.set(1);
    };

    let on_delete = move |id: i64| {
        let client = client.get_value();
        leptos::task::spawn_local(async move {
            let prompt = ConfirmPrompt::destructive("Delete this group? Tasks in it must be removed first.", "Delete");
            if !WindowConfirm.confirm(&prompt).await {
                return;
            }
            if scheduler_api::delete_group(&client, id).await.is_ok() {
                notifier.notify(NoticeLevel::Success, "Group deleted");
                refresh.try_update(|n| *n += 1);
            }
        });
    };

    view! {
        <section class="panel">
            <h2 class="panel__title">"Task groups"</h2>
            <form class="toolbar-form" on:submit=on_search>
                <input
                    class="form-input"
                    type="search"
                    placeholder="Name or app"
                    prop:value=move || keyword_input.get()
                    on:input=move |ev| keyword_input.set(event_target_value(&ev))
                />
                <button class="btn" type="submit">"Search"</button>
            </form>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"ID"</th>
                        <th>"Name"</th>
                        <th>"App"</th>
                        <th>"Description"</th>
                        <th>"Status"</th>
                        <th>"Created"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || rows.with(Vec::is_empty)>
                        <EmptyRow columns=7 loading=loading/>
                    </Show>
                    <For
                        each=move || rows.get()
                        key=|group| group.id
                        children=move |group: TaskGroup| {
                            let id = group.id;
                            view! {
                                <tr>
                                    <td>{id}</td>
                                    <td>{group.name}</td>
                                    <td>{group.app_name}</td>
                                    <td>{cell_text(&group.description)}</td>
                                    <td>{group_status_label(group.status)}</td>
                                    <td>{cell_text(&group.created_at)}</td>
                                    <td>
                                        <button class="btn btn--danger" on:click=move |_| on_delete(id)>
                                            "Delete"
                                        </button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            <Pager page=page total=total page_size=page_size/>
        </section>
        <CreateGroupForm on_created=Callback::new(move |()| refresh.update(|n| *n += 1))/>
    }
}

#[component]
fn CreateGroupForm(on_created: Callback<()>) -> impl IntoView {
    let client = use_api_client();
    let notifier = ToastNotifier::new(expect_context());
    let name = RwSignal::new(String::new());
    let app_name = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let request = match build_group_request(&name.get_untracked(), &app_name.get_untracked(), &description.get_untracked()) {
            Ok(request) => request,
            Err(msg) => {
                notifier.notify(NoticeLevel::Warning, msg);
                return;
            }
        };
        let client = client.get_value();
        leptos::task::spawn_local(async move {
            if scheduler_api::create_group(&client, &request).await.is_ok() {
                notifier.notify(NoticeLevel::Success, "Group created");
                for field in [name, app_name, description] {
                    field.try_set(String::new());
                }
                on_created.run(());
            }
        });
    };

    view! {
        <section class="panel">
            <h2 class="panel__title">"New group"</h2>
            <form class="form form--inline" on:submit=on_submit>
                <input
                    class="form-input"
                    placeholder="Name"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <input
                    class="form-input"
                    placeholder="App name"
                    prop:value=move || app_name.get()
                    on:input=move |ev| app_name.set(event_target_value(&ev))
                />
                <input
                    class="form-input"
                    placeholder="Description"
                    prop:value=move || description.get()
                    on:input=move |ev| description.set(event_target_value(&ev))
                />
                <button class="btn btn--primary" type="submit">"Create"</button>
            </form>
        </section>
    }
}
