use super::*;
use serde_json::json;

#[test]
fn user_profile_decodes_with_missing_fields() {
    let user: UserProfile = serde_json::from_value(json!({"id": 7, "username": "alice"})).unwrap();
    assert_eq!(user.id, 7);
    assert_eq!(user.username, "alice");
    assert!(user.roles.is_empty());
    assert_eq!(user.display_name(), "alice");
}

#[test]
fn display_name_prefers_nickname() {
    let user = UserProfile { username: "alice".to_owned(), nickname: "Alice L.".to_owned(), ..UserProfile::default() };
    assert_eq!(user.display_name(), "Alice L.");
}

#[test]
fn login_result_requires_token() {
    let missing = serde_json::from_value::<LoginResult>(json!({"user": {"username": "alice"}}));
    assert!(missing.is_err());
    let ok: LoginResult = serde_json::from_value(json!({"token": "t1", "user": {"username": "alice"}})).unwrap();
    assert_eq!(ok.token, "t1");
}

#[test]
fn task_decodes_nested_group() {
    let task: Task = serde_json::from_value(json!({
        "id": 3,
        "name": "nightly-report",
        "cron": "0 0 2 * * ?",
        "group": {"id": 1, "name": "reports", "app_name": "report-svc"}
    }))
    .unwrap();
    assert_eq!(task.group.map(|g| g.app_name), Some("report-svc".to_owned()));
}

#[test]
fn executor_address_joins_host_and_port() {
    let node = ExecutorNode { host: "10.0.0.4".to_owned(), port: 9999, ..ExecutorNode::default() };
    assert_eq!(node.address(), "10.0.0.4:9999");
}

#[test]
fn list_params_flatten_paging_fields() {
    let params = TaskListParams { group_id: Some(2), ..TaskListParams::default() };
    let value = serde_json::to_value(&params).unwrap();
    assert_eq!(value["page"], json!(1));
    assert_eq!(value["page_size"], json!(20));
    assert_eq!(value["group_id"], json!(2));
    assert!(value["keyword"].is_null());
}

#[test]
fn create_task_request_omits_unset_optionals() {
    let req = CreateTaskRequest {
        group_id: 1,
        name: "sync".to_owned(),
        cron: "*/5 * * * * ?".to_owned(),
        executor_type: "bean".to_owned(),
        executor_handler: "syncHandler".to_owned(),
        ..CreateTaskRequest::default()
    };
    let value = serde_json::to_value(&req).unwrap();
    let obj = value.as_object().unwrap();
    assert!(!obj.contains_key("description"));
    assert!(!obj.contains_key("dependency_ids"));
    assert_eq!(obj["executor_handler"], json!("syncHandler"));
}
