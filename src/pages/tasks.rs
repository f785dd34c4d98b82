//! Job definitions: filter, start/stop, manual trigger, create with a cron
//! preview, delete.

#[cfg(test)]
#[path = "tasks_test.rs"]
mod tasks_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app::use_api_client;
use crate::components::data_table::{EmptyRow, Pager, cell_text, optional_text};
use crate::components::layout::Layout;
use crate::net::scheduler_api;
use crate::net::types::{CreateTaskRequest, PageParams, Task, TaskGroup, TaskListParams};
use crate::state::session::Session;
use crate::util::feedback::{ConfirmPrompt, NoticeLevel, Notifier, Prompter, ToastNotifier, WindowConfirm};
use crate::util::guard::install_route_guard;

pub const TASK_PATH: &str = "/task";
pub const DEFAULT_EXECUTOR_TYPE: &str = "HTTP";
pub const EXECUTOR_TYPES: [&str; 3] = ["HTTP", "GRPC", "SCRIPT"];
const PREVIEW_COUNT: u32 = 5;

pub fn task_status_label(status: i32) -> &'static str {
    match status {
        1 => "Enabled",
        0 => "Disabled",
        _ => "Unknown",
    }
}

/// The state change offered for a task in the given status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleAction {
    Start,
    Stop,
}

impl ToggleAction {
    pub fn for_status(status: i32) -> Self {
        if status == 1 { Self::Stop } else { Self::Start }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Stop => "Stop",
        }
    }
}

/// Parse a group `<select>` value; blank or invalid means "all groups".
pub fn parse_group_filter(value: &str) -> Option<i64> {
    value.trim().parse().ok().filter(|id| *id > 0)
}

/// Raw create-form input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub group_id: String,
    pub name: String,
    pub cron: String,
    pub executor_type: String,
    pub executor_handler: String,
    pub executor_param: String,
    pub description: String,
}

/// Validate the form and build a create request.
pub fn build_task_request(form: &TaskForm) -> Result<CreateTaskRequest, &'static str> {
    let group_id = parse_group_filter(&form.group_id).ok_or("Choose a group.")?;
    let name = optional_text(&form.name).ok_or("Enter a task name.")?;
    let cron = optional_text(&form.cron).ok_or("Enter a cron expression.")?;
    let executor_handler = optional_text(&form.executor_handler).ok_or("Enter the executor handler.")?;
    let executor_type = optional_text(&form.executor_type).unwrap_or_else(|| DEFAULT_EXECUTOR_TYPE.to_owned());
    if !EXECUTOR_TYPES.contains(&executor_type.as_str()) {
        return Err("Unknown executor type.");
    }
    Ok(CreateTaskRequest {
        group_id,
        name,
        cron,
        executor_type,
        executor_handler,
        executor_param: optional_text(&form.executor_param),
        description: optional_text(&form.description),
        ..CreateTaskRequest::default()
    })
}

#[component]
pub fn TasksPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let allowed = install_route_guard(TASK_PATH, session, use_navigate());

    view! {
        <Show when=move || allowed.get()>
            <Layout>
                <TasksView/>
            </Layout>
        </Show>
    }
}

#[component]
fn TasksView() -> impl IntoView {
    let client = use_api_client();
    let notifier = ToastNotifier::new(expect_context());
    let groups = RwSignal::new(Vec::<TaskGroup>::new());
    let page = RwSignal::new(1_u32);
    let group_filter = RwSignal::new(None::<i64>);
    let keyword_input = RwSignal::new(String::new());
    let keyword = RwSignal::new(None::<String>);
    let rows = RwSignal::new(Vec::<Task>::new());
    let total = RwSignal::new(0_i64);
    let loading = RwSignal::new(true);
    let refresh = RwSignal::new(0_u32);
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
        refresh.track();
        let params = TaskListParams {
            page: PageParams { page: page.get(), page_size },
            group_id: group_filter.get(),
            keyword: keyword.get(),
            status: None,
        };
        let client = client.get_value();
        loading.set(true);
        leptos::task::spawn_local(async move {
            if let Ok(envelope) = scheduler_api::list_tasks(&client, &params).await {
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

    let on_toggle = move |id: i64, action: ToggleAction| {
        let client = client.get_value();
        leptos::task::spawn_local(async move {
            let result = match action {
                ToggleAction::Start => scheduler_api::start_task(&client, id).await,
                ToggleAction::Stop => scheduler_api::stop_task(&client, id).await,
            };
            if result.is_ok() {
                notifier.notify(NoticeLevel::Success, if action == ToggleAction::Start { "Task started" } else { "Task stopped" });
                refresh.try_update(|n| *n += 1);
            }
        });
    };

    let on_trigger = move |id: i64| {
        let client = client.get_value();
        leptos::task::spawn_local(async move {
            if scheduler_api::trigger_task(&client, id, None).await.is_ok() {
                notifier.notify(NoticeLevel::Success, "Run triggered");
            }
        });
    };

    let on_delete = move |id: i64| {
        let client = client.get_value();
        leptos::task::spawn_local(async move {
            if !WindowConfirm.confirm(&ConfirmPrompt::destructive("Delete this task?", "Delete")).await {
                return;
            }
            if scheduler_api::delete_task(&client, id).await.is_ok() {
                notifier.notify(NoticeLevel::Success, "Task deleted");
                refresh.try_update(|n| *n += 1);
            }
        });
    };

    view! {
        <section class="panel">
            <h2 class="panel__title">"Tasks"</h2>
            <form class="toolbar-form" on:submit=on_search>
                <GroupSelect
                    groups=groups
                    placeholder="All groups"
                    on_change=Callback::new(move |value: String| {
                        group_filter.set(parse_group_filter(&value));
                        page.set(1);
                    })
                />
                <input
                    class="form-input"
                    type="search"
                    placeholder="Task name"
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
                        <th>"Group"</th>
                        <th>"Cron"</th>
                        <th>"Handler"</th>
                        <th>"Next run"</th>
                        <th>"Status"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || rows.with(Vec::is_empty)>
                        <EmptyRow columns=8 loading=loading/>
                    </Show>
                    <For
                        each=move || rows.get()
                        key=|task| (task.id, task.version, task.status)
                        children=move |task: Task| {
                            let id = task.id;
                            let action = ToggleAction::for_status(task.status);
                            let group = task.group.as_ref().map_or_else(|| task.group_id.to_string(), |g| g.name.clone());
                            view! {
                                <tr>
                                    <td>{id}</td>
                                    <td>{task.name}</td>
                                    <td>{group}</td>
                                    <td><code>{task.cron}</code></td>
                                    <td>{format!("{} {}", task.executor_type, task.executor_handler)}</td>
                                    <td>{cell_text(&task.next_trigger_time)}</td>
                                    <td>{task_status_label(task.status)}</td>
                                    <td class="data-table__actions">
                                        <button class="btn" on:click=move |_| on_toggle(id, action)>
                                            {action.label()}
                                        </button>
                                        <button class="btn" on:click=move |_| on_trigger(id)>
                                            "Run once"
                                        </button>
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
        <CreateTaskForm groups=groups on_created=Callback::new(move |()| refresh.update(|n| *n += 1))/>
    }
}

#[component]
pub(crate) fn GroupSelect(groups: RwSignal<Vec<TaskGroup>>, placeholder: &'static str, on_change: Callback<String>) -> impl IntoView {
    view! {
        <select class="form-select" on:change=move |ev| on_change.run(event_target_value(&ev))>
            <option value="">{placeholder}</option>
            <For
                each=move || groups.get()
                key=|group| group.id
                children=|group: TaskGroup| {
                    view! { <option value=group.id.to_string()>{group.name}</option> }
                }
            />
        </select>
    }
}

#[component]
fn CreateTaskForm(groups: RwSignal<Vec<TaskGroup>>, on_created: Callback<()>) -> impl IntoView {
    let client = use_api_client();
    let notifier = ToastNotifier::new(expect_context());
    let group_id = RwSignal::new(String::new());
    let name = RwSignal::new(String::new());
    let cron = RwSignal::new(String::new());
    let executor_type = RwSignal::new(DEFAULT_EXECUTOR_TYPE.to_owned());
    let handler = RwSignal::new(String::new());
    let param = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let preview = RwSignal::new(Vec::<String>::new());

    let on_preview = move |_| {
        let Some(expr) = optional_text(&cron.get_untracked()) else {
            notifier.notify(NoticeLevel::Warning, "Enter a cron expression.");
            return;
        };
        let client = client.get_value();
        leptos::task::spawn_local(async move {
            let times = scheduler_api::next_trigger_times(&client, &expr, Some(PREVIEW_COUNT))
                .await
                .map(|envelope| envelope.data)
                .unwrap_or_default();
            preview.try_set(times);
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = TaskForm {
            group_id: group_id.get_untracked(),
            name: name.get_untracked(),
            cron: cron.get_untracked(),
            executor_type: executor_type.get_untracked(),
            executor_handler: handler.get_untracked(),
            executor_param: param.get_untracked(),
            description: description.get_untracked(),
        };
        let request = match build_task_request(&form) {
            Ok(request) => request,
            Err(msg) => {
                notifier.notify(NoticeLevel::Warning, msg);
                return;
            }
        };
        let client = client.get_value();
        leptos::task::spawn_local(async move {
            if scheduler_api::create_task(&client, &request).await.is_ok() {
                notifier.notify(NoticeLevel::Success, "Task created");
                for field in [name, cron, handler, param, description] {
                    field.try_set(String::new());
                }
                preview.try_set(Vec::new());
                on_created.run(());
            }
        });
    };

    let text_input = |field: RwSignal<String>, placeholder: &'static str| {
        view! {
            <input
                class="form-input"
                placeholder=placeholder
                prop:value=move || field.get()
                on:input=move |ev| field.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <section class="panel">
            <h2 class="panel__title">"New task"</h2>
            <form class="form" on:submit=on_submit>
                <GroupSelect
                    groups=groups
                    placeholder="Choose a group"
                    on_change=Callback::new(move |value: String| group_id.set(value))
                />
                {text_input(name, "Name")}
                <div class="form__row">
                    {text_input(cron, "Cron, e.g. 0 0/5 * * * ?")}
                    <button class="btn" type="button" on:click=on_preview>
                        "Preview"
                    </button>
                </div>
                <Show when=move || !preview.with(Vec::is_empty)>
                    <ul class="cron-preview">
                        <For each=move || preview.get() key=|time| time.clone() children=|time| view! { <li>{time}</li> }/>
                    </ul>
                </Show>
                <select class="form-select" on:change=move |ev| executor_type.set(event_target_value(&ev))>
                    {EXECUTOR_TYPES
                        .into_iter()
                        .map(|kind| view! { <option value=kind selected={kind == DEFAULT_EXECUTOR_TYPE}>{kind}</option> })
                        .collect_view()}
                </select>
                {text_input(handler, "Handler")}
                {text_input(param, "Parameter")}
                {text_input(description, "Description")}
                <button class="btn btn--primary" type="submit">"Create"</button>
            </form>
        </section>
    }
}
