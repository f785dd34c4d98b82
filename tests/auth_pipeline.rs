//! End-to-end behavior of the outbound and inbound request stages.

mod support;

use std::collections::HashMap;

use futures::channel::oneshot;
use scheduler_console::net::envelope::Envelope;
use scheduler_console::net::error::{
    ApiError, MSG_MALFORMED, MSG_NOT_FOUND, MSG_TIMEOUT, MSG_UNAUTHORIZED, MSG_UNREACHABLE, TransportError,
};
use scheduler_console::net::transport::{HttpMethod, HttpResponse};
use scheduler_console::routes::LOGIN_PATH;
use scheduler_console::util::token_storage::TokenStorage;
use serde_json::{Value, json};
use support::{Harness, Reply, envelope, failure};

#[test]
fn no_authorization_header_without_token() {
    let mut h = Harness::new(None);
    h.transport.push(envelope(200, json!({"code": 0, "message": "success", "data": []})));

    let result = h.pool.run_until(h.client.get::<Value>("/task"));

    assert!(result.is_ok());
    let sent = h.transport.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].header("Authorization"), None);
    assert_eq!(sent[0].header("Content-Type"), Some("application/json"));
    assert_eq!(sent[0].url, "/api/v1/task");
}

#[test]
fn bearer_header_attached_with_token() {
    let mut h = Harness::new(Some("t1"));
    h.transport.push(envelope(200, json!({"code": 0, "message": "success", "data": null})));

    let result = h.pool.run_until(h.client.post_empty::<()>("/task/3/start"));

    assert!(result.is_ok());
    let sent = h.transport.sent.borrow();
    assert_eq!(sent[0].method, HttpMethod::Post);
    assert_eq!(sent[0].header("authorization"), Some("Bearer t1"));
}

#[test]
fn success_resolves_with_full_envelope_and_no_notice() {
    let mut h = Harness::new(Some("t1"));
    h.transport.push(envelope(200, json!({"code": 0, "message": "success", "data": {"total": 3}})));

    let result = h.pool.run_until(h.client.get::<HashMap<String, i64>>("/instance/statistics"));

    let env = result.unwrap();
    assert_eq!(
        env,
        Envelope { code: 0, message: "success".to_owned(), data: HashMap::from([("total".to_owned(), 3)]) }
    );
    assert!(h.notifier.notices.borrow().is_empty());
    assert_eq!(h.prompter.asked.get(), 0);
}

#[test]
fn query_parameters_are_forwarded() {
    let mut h = Harness::new(Some("t1"));
    h.transport.push(envelope(200, json!({"code": 0, "message": "", "data": ["2026-10-19 02:00:00"]})));

    let result = h.pool.run_until(h.client.get_with::<Vec<String>, _>(
        "/task/next-trigger-times",
        &json!({"cron": "0 0 2 * * ?", "count": 1}),
    ));

    assert_eq!(result.unwrap().data.len(), 1);
    let sent = h.transport.sent.borrow();
    assert!(sent[0].query.contains(&("count".to_owned(), "1".to_owned())));
    assert!(sent[0].query.contains(&("cron".to_owned(), "0 0 2 * * ?".to_owned())));
}

#[test]
fn auth_invalid_declined_keeps_session_and_rejects_with_message() {
    let mut h = Harness::new(Some("t1"));
    h.answer_prompt(false);
    h.transport.push(envelope(200, json!({"code": 10005, "message": "expired"})));

    let result = h.pool.run_until(h.client.get::<Value>("/task"));

    // The caller's error is returned before the user answers.
    assert_eq!(result, Err(ApiError::AuthInvalid { code: 10005, message: "expired".to_owned() }));
    assert_eq!(result.unwrap_err().to_string(), "expired");
    assert_eq!(h.prompter.asked.get(), 0);

    h.pool.run();

    assert_eq!(h.prompter.asked.get(), 1);
    assert_eq!(h.token().as_deref(), Some("t1"));
    assert_eq!(h.storage.load().as_deref(), Some("t1"));
    assert!(h.navigator.paths.borrow().is_empty());
    assert!(h.notifier.notices.borrow().is_empty());
}

#[test]
fn auth_invalid_confirmed_logs_out_and_navigates_to_login() {
    let mut h = Harness::new(Some("t1"));
    h.answer_prompt(true);
    h.transport.push(envelope(200, json!({"code": 10006, "message": "token invalid"})));
    h.transport.push(envelope(200, json!({"code": 0, "message": "success"})));

    let result = h.pool.run_until(h.client.get::<Value>("/executor"));
    h.pool.run();

    assert!(matches!(result, Err(ApiError::AuthInvalid { code: 10006, .. })));
    assert_eq!(h.prompter.asked.get(), 1);
    assert_eq!(h.token(), None);
    assert!(h.session.snapshot().profile().is_none());
    assert_eq!(h.storage.load(), None);
    assert_eq!(*h.navigator.paths.borrow(), vec![LOGIN_PATH.to_owned()]);
    assert_eq!(h.transport.sent_urls(), vec!["/api/v1/executor", "/api/v1/auth/logout"]);
}

#[test]
fn each_auth_invalid_response_prompts_once() {
    let mut h = Harness::new(Some("t1"));
    h.transport.push(envelope(200, json!({"code": 401, "message": "unauthorized"})));
    h.transport.push(envelope(200, json!({"code": 10005, "message": "expired"})));

    let first = h.pool.run_until(h.client.get::<Value>("/task"));
    let second = h.pool.run_until(h.client.get::<Value>("/group"));
    h.pool.run();

    assert!(first.is_err() && second.is_err());
    assert_eq!(h.prompter.asked.get(), 2);
}

#[test]
fn business_error_notifies_and_rejects_with_message() {
    let mut h = Harness::new(Some("t1"));
    h.transport.push(envelope(200, json!({"code": 10008, "message": "task not found"})));

    let result = h.pool.run_until(h.client.get::<Value>("/task/77"));
    h.pool.run();

    assert_eq!(result, Err(ApiError::Business { code: 10008, message: "task not found".to_owned() }));
    assert_eq!(h.notifier.messages(), vec!["task not found".to_owned()]);
    assert_eq!(h.prompter.asked.get(), 0);
    assert_eq!(h.token().as_deref(), Some("t1"));
}

#[test]
fn http_401_logs_out_without_prompt_and_navigates_once() {
    let mut h = Harness::new(Some("t1"));
    h.transport.push(envelope(401, json!({"code": 401, "message": "unauthorized"})));
    h.transport.push(envelope(200, json!({"code": 0, "message": "success"})));

    let result = h.pool.run_until(h.client.get::<Value>("/task"));
    h.pool.run();

    assert_eq!(
        result,
        Err(ApiError::Transport(TransportError::Status { status: 401, message: Some("unauthorized".to_owned()) }))
    );
    assert_eq!(h.prompter.asked.get(), 0);
    assert_eq!(h.token(), None);
    assert_eq!(h.storage.load(), None);
    assert_eq!(*h.navigator.paths.borrow(), vec![LOGIN_PATH.to_owned()]);
    assert_eq!(h.notifier.messages(), vec![MSG_UNAUTHORIZED.to_owned()]);
    let sent = h.transport.sent.borrow();
    let logout = &sent[1];
    assert_eq!(logout.url, "/api/v1/auth/logout");
    assert_eq!(logout.header("Authorization"), Some("Bearer t1"));
}

#[test]
fn http_401_clears_and_navigates_without_waiting_for_server_logout() {
    let mut h = Harness::new(Some("t1"));
    h.transport.push(envelope(401, json!({"code": 401, "message": "unauthorized"})));
    h.transport.push(Reply::Hang);

    let result = h.pool.run_until(h.client.get::<Value>("/task"));
    h.pool.run_until_stalled();

    assert!(matches!(result, Err(ApiError::Transport(TransportError::Status { status: 401, .. }))));
    assert_eq!(h.token(), None);
    assert_eq!(h.storage.load(), None);
    assert_eq!(*h.navigator.paths.borrow(), vec![LOGIN_PATH.to_owned()]);
    assert_eq!(h.transport.sent_urls(), vec!["/api/v1/task", "/api/v1/auth/logout"]);
    assert_eq!(h.transport.sent.borrow()[1].header("Authorization"), Some("Bearer t1"));
}

#[test]
fn http_401_during_logout_call_does_not_recurse() {
    let mut h = Harness::new(Some("t1"));
    h.transport.push(envelope(401, json!({"code": 401, "message": "unauthorized"})));
    h.transport.push(envelope(401, json!({"code": 401, "message": "unauthorized"})));

    let result = h.pool.run_until(h.client.get::<Value>("/task"));
    h.pool.run();

    assert!(result.is_err());
    assert_eq!(h.transport.sent.borrow().len(), 2);
    assert_eq!(h.navigator.paths.borrow().len(), 1);
    assert_eq!(h.notifier.notices.borrow().len(), 1);
    assert_eq!(h.token(), None);
}

#[test]
fn http_404_notifies_not_found_and_leaves_session() {
    let mut h = Harness::new(Some("t1"));
    h.transport.push(Reply::Now(Ok(HttpResponse { status: 404, body: "404 page not found".to_owned() })));

    let result = h.pool.run_until(h.client.get::<Value>("/nope"));

    assert_eq!(result, Err(ApiError::Transport(TransportError::Status { status: 404, message: None })));
    assert_eq!(h.notifier.messages(), vec![MSG_NOT_FOUND.to_owned()]);
    assert_eq!(h.token().as_deref(), Some("t1"));
    assert!(h.navigator.paths.borrow().is_empty());
}

#[test]
fn other_status_uses_server_message() {
    let mut h = Harness::new(Some("t1"));
    h.transport.push(envelope(429, json!({"code": 429, "message": "slow down"})));

    let result = h.pool.run_until(h.client.get::<Value>("/task"));

    assert!(matches!(result, Err(ApiError::Transport(TransportError::Status { status: 429, .. }))));
    assert_eq!(h.notifier.messages(), vec!["slow down".to_owned()]);
}

#[test]
fn statusless_failures_notify_by_cause() {
    let mut h = Harness::new(Some("t1"));
    h.transport.push(failure(TransportError::Timeout));
    h.transport.push(failure(TransportError::Unreachable("Failed to fetch".to_owned())));

    let timeout = h.pool.run_until(h.client.get::<Value>("/task"));
    let unreachable = h.pool.run_until(h.client.get::<Value>("/task"));

    assert_eq!(timeout, Err(ApiError::Transport(TransportError::Timeout)));
    assert!(matches!(unreachable, Err(ApiError::Transport(TransportError::Unreachable(_)))));
    assert_eq!(h.notifier.messages(), vec![MSG_TIMEOUT.to_owned(), MSG_UNREACHABLE.to_owned()]);
    assert_eq!(h.token().as_deref(), Some("t1"));
}

#[test]
fn malformed_success_body_notifies_once() {
    let mut h = Harness::new(Some("t1"));
    h.transport.push(Reply::Now(Ok(HttpResponse { status: 200, body: "<!doctype html>".to_owned() })));
    h.transport.push(envelope(200, json!({"code": 0, "message": "", "data": "not a list"})));

    let garbage = h.pool.run_until(h.client.get::<Value>("/task"));
    let mismatch = h.pool.run_until(h.client.get::<Vec<i64>>("/task"));

    assert!(matches!(garbage, Err(ApiError::Decode(_))));
    assert!(matches!(mismatch, Err(ApiError::Decode(_))));
    assert_eq!(h.notifier.messages(), vec![MSG_MALFORMED.to_owned(), MSG_MALFORMED.to_owned()]);
}

#[test]
fn unencodable_body_is_rejected_before_sending() {
    let mut h = Harness::new(Some("t1"));
    let mut body = HashMap::new();
    body.insert((1, 2), "tuple keys are not JSON");

    let result = h.pool.run_until(h.client.post::<Value, _>("/task", &body));

    assert!(matches!(result, Err(ApiError::Encode(_))));
    assert!(h.transport.sent.borrow().is_empty());
    assert!(h.notifier.notices.borrow().is_empty());
}

#[test]
fn in_flight_request_keeps_token_snapshot_across_logout() {
    let mut h = Harness::new(Some("t1"));
    let (tx, rx) = oneshot::channel();
    h.transport.push(Reply::Deferred(rx));

    let pending = h.client.clone();
    let request = async move { pending.get::<Value>("/instance").await };
    let handle = {
        use futures::task::LocalSpawnExt;
        h.pool.spawner().spawn_local_with_handle(request).unwrap()
    };
    h.pool.run_until_stalled();

    h.session.clear();
    assert_eq!(h.token(), None);

    tx.send(Ok(HttpResponse { status: 200, body: json!({"code": 0, "message": "ok", "data": 1}).to_string() }))
        .unwrap();
    let result = h.pool.run_until(handle);

    assert_eq!(result.map(|env| env.data), Ok(json!(1)));
    assert_eq!(h.transport.sent.borrow()[0].header("Authorization"), Some("Bearer t1"));
}
