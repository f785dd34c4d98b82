//! Group, task, instance and executor endpoints.
//!
//! Thin wrappers: one fixed path each, no logic beyond the path.

#[cfg(test)]
#[path = "scheduler_api_test.rs"]
mod scheduler_api_test;

use serde::Serialize;

use super::client::ApiClient;
use super::envelope::{Envelope, PageResult};
use super::error::ApiError;
use super::types::{
    CreateGroupRequest, CreateTaskRequest, ExecutorListParams, ExecutorNode, GroupListParams, InstanceListParams,
    InstanceStatistics, PageParams, StatisticsParams, Task, TaskGroup, TaskInstance, TaskListParams, TaskLog,
};

type ApiResult<T> = Result<Envelope<T>, ApiError>;

pub(crate) fn group_path(id: i64) -> String {
    format!("/group/{id}")
}

pub(crate) fn task_path(id: i64) -> String {
    format!("/task/{id}")
}

pub(crate) fn task_action_path(id: i64, action: &str) -> String {
    format!("/task/{id}/{action}")
}

pub(crate) fn instance_path(id: i64) -> String {
    format!("/instance/{id}")
}

pub(crate) fn executor_path(id: &str) -> String {
    format!("/executor/{id}")
}

// Groups

/// # Errors
/// Returns the client's [`ApiError`] for any non-success classification.
pub async fn list_groups(client: &ApiClient, params: &GroupListParams) -> ApiResult<PageResult<TaskGroup>> {
    client.get_with("/group", params).await
}

/// # Errors
/// Returns the client's [`ApiError`] for any non-success classification.
pub async fn all_groups(client: &ApiClient) -> ApiResult<Vec<TaskGroup>> {
    client.get("/group/all").await
}

/// # Errors
/// Returns the client's [`ApiError`] for any non-success classification.
pub async fn group_detail(client: &ApiClient, id: i64) -> ApiResult<TaskGroup> {
    client.get(&group_path(id)).await
}

/// # Errors
/// Returns the client's [`ApiError`] for any non-success classification.
pub async fn create_group(client: &ApiClient, body: &CreateGroupRequest) -> ApiResult<TaskGroup> {
    client.post("/group", body).await
}

/// # Errors
/// Returns the client's [`ApiError`] for any non-success classification.
pub async fn update_group(client: &ApiClient, id: i64, body: &CreateGroupRequest) -> ApiResult<TaskGroup> {
    client.put(&group_path(id), body).await
}

/// # Errors
/// Returns the client's [`ApiError`] for any non-success classification.
pub async fn delete_group(client: &ApiClient, id: i64) -> ApiResult<()> {
    client.delete(&group_path(id)).await
}

// Tasks

/// # Errors
/// Returns the client's [`ApiError`] for any non-success classification.
pub async fn list_tasks(client: &ApiClient, params: &TaskListParams) -> ApiResult<PageResult<Task>> {
    client.get_with("/task", params).await
}

/// # Errors
/// Returns the client's [`ApiError`] for any non-success classification.
pub async fn task_detail(client: &ApiClient, id: i64) -> ApiResult<Task> {
    client.get(&task_path(id)).await
}

/// # Errors
/// Returns the client's [`ApiError`] for any non-success classification.
pub async fn create_task(client: &ApiClient, body: &CreateTaskRequest) -> ApiResult<Task> {
    client.post("/task", body).await
}

/// # Errors
/// Returns the client's [`ApiError`] for any non-success classification.
pub async fn update_task(client: &ApiClient, id: i64, body: &CreateTaskRequest) -> ApiResult<Task> {
    client.put(&task_path(id), body).await
}

/// # Errors
/// Returns the client's [`ApiError`] for any non-success classification.
pub async fn delete_task(client: &ApiClient, id: i64) -> ApiResult<()> {
    client.delete(&task_path(id)).await
}

/// # Errors
/// Returns the client's [`ApiError`] for any non-success classification.
pub async fn start_task(client: &ApiClient, id: i64) -> ApiResult<()> {
    client.post_empty(&task_action_path(id, "start")).await
}

/// # Errors
/// Returns the client's [`ApiError`] for any non-success classification.
pub async fn stop_task(client: &ApiClient, id: i64) -> ApiResult<()> {
    client.post_empty(&task_action_path(id, "stop")).await
}

#[derive(Serialize)]
struct TriggerBody<'a> {
    param: Option<&'a str>,
}

/// Run a task once now, optionally overriding its executor parameter.
///
/// # Errors
/// Returns the client's [`ApiError`] for any non-success classification.
pub async fn trigger_task(client: &ApiClient, id: i64, param: Option<&str>) -> ApiResult<()> {
    client.post(&task_action_path(id, "trigger"), &TriggerBody { param }).await
}

#[derive(Serialize)]
struct NextTriggerQuery<'a> {
    cron: &'a str,
    count: u32,
}

/// Upcoming fire times for a cron expression; `count` defaults to 5.
///
/// # Errors
/// Returns the client's [`ApiError`] for any non-success classification.
pub async fn next_trigger_times(client: &ApiClient, cron: &str, count: Option<u32>) -> ApiResult<Vec<String>> {
    let query = NextTriggerQuery { cron, count: count.unwrap_or(5) };
    client.get_with("/task/next-trigger-times", &query).await
}

// Instances

/// # Errors
/// Returns the client's [`ApiError`] for any non-success classification.
pub async fn list_instances(client: &ApiClient, params: &InstanceListParams) -> ApiResult<PageResult<TaskInstance>> {
    client.get_with("/instance", params).await
}

/// # Errors
/// Returns the client's [`ApiError`] for any non-success classification.
pub async fn instance_detail(client: &ApiClient, id: i64) -> ApiResult<TaskInstance> {
    client.get(&instance_path(id)).await
}

/// # Errors
/// Returns the client's [`ApiError`] for any non-success classification.
pub async fn cancel_instance(client: &ApiClient, id: i64) -> ApiResult<()> {
    client.post_empty(&format!("{}/cancel", instance_path(id))).await
}

/// # Errors
/// Returns the client's [`ApiError`] for any non-success classification.
pub async fn retry_instance(client: &ApiClient, id: i64) -> ApiResult<TaskInstance> {
    client.post_empty(&format!("{}/retry", instance_path(id))).await
}

/// # Errors
/// Returns the client's [`ApiError`] for any non-success classification.
pub async fn instance_logs(client: &ApiClient, id: i64, page: PageParams) -> ApiResult<PageResult<TaskLog>> {
    client.get_with(&format!("{}/logs", instance_path(id)), &page).await
}

/// # Errors
/// Returns the client's [`ApiError`] for any non-success classification.
pub async fn instance_statistics(client: &ApiClient, params: &StatisticsParams) -> ApiResult<InstanceStatistics> {
    client.get_with("/instance/statistics", params).await
}

#[derive(Serialize)]
struct RecentQuery {
    limit: u32,
}

/// Most recent runs; `limit` defaults to 10.
///
/// # Errors
/// Returns the client's [`ApiError`] for any non-success classification.
pub async fn recent_instances(client: &ApiClient, limit: Option<u32>) -> ApiResult<Vec<TaskInstance>> {
    client.get_with("/instance/recent", &RecentQuery { limit: limit.unwrap_or(10) }).await
}

// Executors

/// # Errors
/// Returns the client's [`ApiError`] for any non-success classification.
pub async fn list_executors(client: &ApiClient, params: &ExecutorListParams) -> ApiResult<PageResult<ExecutorNode>> {
    client.get_with("/executor", params).await
}

/// # Errors
/// Returns the client's [`ApiError`] for any non-success classification.
pub async fn executor_detail(client: &ApiClient, id: &str) -> ApiResult<ExecutorNode> {
    client.get(&executor_path(id)).await
}

#[derive(Serialize)]
struct OnlineQuery {
    group_id: i64,
}

/// # Errors
/// Returns the client's [`ApiError`] for any non-success classification.
pub async fn online_executors(client: &ApiClient, group_id: i64) -> ApiResult<Vec<ExecutorNode>> {
    client.get_with("/executor/online", &OnlineQuery { group_id }).await
}
