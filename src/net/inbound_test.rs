use super::*;
use serde_json::json;

fn ok(status: u16, body: serde_json::Value) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse { status, body: body.to_string() })
}

#[test]
fn code_zero_is_success_with_full_envelope() {
    let outcome = classify(ok(200, json!({"code": 0, "message": "success", "data": {"id": 1}})));
    assert_eq!(
        outcome,
        Outcome::Success(RawEnvelope { code: 0, message: "success".to_owned(), data: json!({"id": 1}) })
    );
}

#[test]
fn reserved_codes_are_auth_invalid() {
    for code in [401, 10005, 10006] {
        let outcome = classify(ok(200, json!({"code": code, "message": "expired"})));
        assert_eq!(outcome, Outcome::AuthInvalid { code, message: "expired".to_owned() });
    }
}

#[test]
fn auth_invalid_without_message_uses_fallback() {
    let outcome = classify(ok(200, json!({"code": 10006, "message": ""})));
    assert_eq!(outcome, Outcome::AuthInvalid { code: 10006, message: MSG_LOGIN_EXPIRED.to_owned() });
}

#[test]
fn other_codes_are_business_errors() {
    let outcome = classify(ok(200, json!({"code": 10008, "message": "task not found"})));
    assert_eq!(outcome, Outcome::Business { code: 10008, message: "task not found".to_owned() });

    let outcome = classify(ok(200, json!({"code": -1})));
    assert_eq!(outcome, Outcome::Business { code: -1, message: MSG_REQUEST_FAILED.to_owned() });
}

#[test]
fn non_2xx_is_transport_even_with_envelope() {
    let outcome = classify(ok(401, json!({"code": 401, "message": "unauthorized"})));
    assert_eq!(
        outcome,
        Outcome::Transport(TransportError::Status { status: 401, message: Some("unauthorized".to_owned()) })
    );
}

#[test]
fn non_2xx_without_envelope_has_no_message() {
    let outcome = classify(Ok(HttpResponse { status: 502, body: "Bad Gateway".to_owned() }));
    assert_eq!(outcome, Outcome::Transport(TransportError::Status { status: 502, message: None }));
}

#[test]
fn transport_errors_pass_through() {
    assert_eq!(classify(Err(TransportError::Timeout)), Outcome::Transport(TransportError::Timeout));
}

#[test]
fn success_status_with_garbage_body_is_malformed() {
    let outcome = classify(Ok(HttpResponse { status: 200, body: "<!doctype html>".to_owned() }));
    assert!(matches!(outcome, Outcome::Malformed(_)));
}

#[test]
fn into_result_maps_each_outcome() {
    let env = RawEnvelope { code: 0, message: String::new(), data: json!(null) };
    assert_eq!(Outcome::Success(env.clone()).into_result(), Ok(env));
    assert_eq!(
        Outcome::AuthInvalid { code: 10005, message: "expired".to_owned() }.into_result(),
        Err(ApiError::AuthInvalid { code: 10005, message: "expired".to_owned() })
    );
    assert_eq!(
        Outcome::Transport(TransportError::Timeout).into_result(),
        Err(ApiError::Transport(TransportError::Timeout))
    );
    assert!(matches!(Outcome::Malformed("x".to_owned()).into_result(), Err(ApiError::Decode(_))));
}
