//! Wire DTOs returned by the scheduler API.
//!
//! DESIGN
//! ======
//! Structs mirror server payloads field-for-field and default every field, so
//! a server that omits optional columns still decodes.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// A role granted to a console user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub description: String,
}

/// The signed-in operator as returned by `/user/current`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub nickname: String,
    pub email: String,
    pub phone: String,
    pub avatar: String,
    pub status: i32,
    pub last_login_time: String,
    pub last_login_ip: String,
    pub created_at: String,
    pub roles: Vec<Role>,
}

impl UserProfile {
    /// Nickname when set, otherwise the login name.
    pub fn display_name(&self) -> &str {
        if self.nickname.is_empty() { &self.username } else { &self.nickname }
    }
}

/// Payload of a successful `/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResult {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Clone, Debug, Serialize)]
pub struct ChangePasswordRequest<'a> {
    pub old_password: &'a str,
    pub new_password: &'a str,
}

/// A group of jobs owned by one executor application.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskGroup {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub app_name: String,
    pub status: i32,
    pub created_by: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// A scheduled job definition.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    pub id: i64,
    pub group_id: i64,
    pub name: String,
    pub description: String,
    pub cron: String,
    pub executor_type: String,
    pub executor_handler: String,
    pub executor_param: String,
    pub route_strategy: String,
    pub block_strategy: String,
    pub shard_num: i32,
    pub retry_count: i32,
    pub retry_interval: i32,
    pub timeout: i32,
    pub alarm_email: String,
    pub priority: i32,
    pub status: i32,
    pub version: i64,
    pub next_trigger_time: String,
    pub last_trigger_time: String,
    pub created_by: i64,
    pub created_at: String,
    pub updated_at: String,
    pub group: Option<TaskGroup>,
}

/// One run of a job on one executor shard.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskInstance {
    pub id: i64,
    pub task_id: i64,
    pub group_id: i64,
    pub executor_id: String,
    pub executor_address: String,
    pub executor_handler: String,
    pub executor_param: String,
    pub shard_index: i32,
    pub shard_total: i32,
    pub trigger_type: String,
    pub trigger_time: String,
    pub schedule_time: String,
    pub start_time: String,
    pub end_time: String,
    pub status: i32,
    pub result_code: i32,
    pub result_msg: String,
    pub retry_count: i32,
    pub alarm_status: i32,
    pub created_at: String,
    pub updated_at: String,
    pub task: Option<Task>,
}

/// A log line emitted by a run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskLog {
    pub id: i64,
    pub instance_id: i64,
    pub task_id: i64,
    pub log_time: String,
    pub log_level: String,
    pub log_content: String,
    pub created_at: String,
}

/// A registered executor process.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorNode {
    pub id: String,
    pub group_id: i64,
    pub app_name: String,
    pub host: String,
    pub port: u16,
    pub weight: i32,
    pub max_concurrent: i32,
    pub current_load: i32,
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub status: i32,
    pub last_heartbeat: String,
    pub registered_at: String,
    pub updated_at: String,
}

impl ExecutorNode {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Run counters for the dashboard.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceStatistics {
    pub total: i64,
    pub success: i64,
    pub failed: i64,
    pub running: i64,
    pub pending: i64,
    pub cancelled: i64,
    pub rate: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PageParams {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self { page: 1, page_size: 20 }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GroupListParams {
    #[serde(flatten)]
    pub page: PageParams,
    pub keyword: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TaskListParams {
    #[serde(flatten)]
    pub page: PageParams,
    pub group_id: Option<i64>,
    pub keyword: Option<String>,
    pub status: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct InstanceListParams {
    #[serde(flatten)]
    pub page: PageParams,
    pub task_id: Option<i64>,
    pub status: Option<i32>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ExecutorListParams {
    #[serde(flatten)]
    pub page: PageParams,
    pub group_id: Option<i64>,
    pub status: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatisticsParams {
    pub task_id: Option<i64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CreateGroupRequest {
    pub name: String,
    pub description: Option<String>,
    pub app_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CreateTaskRequest {
    pub group_id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub cron: String,
    pub executor_type: String,
    pub executor_handler: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executor_param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_strategy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_strategy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shard_num: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_interval: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alarm_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependency_ids: Vec<i64>,
}
