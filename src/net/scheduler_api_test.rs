use super::*;

#[test]
fn entity_paths_embed_ids() {
    assert_eq!(group_path(4), "/group/4");
    assert_eq!(task_path(12), "/task/12");
    assert_eq!(task_action_path(12, "trigger"), "/task/12/trigger");
    assert_eq!(instance_path(99), "/instance/99");
    assert_eq!(executor_path("exec-a1"), "/executor/exec-a1");
}

#[test]
fn trigger_body_sends_null_param_when_absent() {
    let body = serde_json::to_value(TriggerBody { param: None }).unwrap();
    assert_eq!(body, serde_json::json!({"param": null}));
}
