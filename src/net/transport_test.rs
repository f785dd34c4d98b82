use super::*;

fn request(headers: &[(&str, &str)]) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        url: "/api/v1/task".to_owned(),
        query: Vec::new(),
        headers: headers.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect(),
        body: None,
    }
}

#[test]
fn header_lookup_ignores_case() {
    let req = request(&[("Content-Type", "application/json"), ("Authorization", "Bearer t")]);
    assert_eq!(req.header("authorization"), Some("Bearer t"));
    assert_eq!(req.header("CONTENT-TYPE"), Some("application/json"));
    assert_eq!(req.header("X-Trace"), None);
}

#[test]
fn header_lookup_returns_first_match() {
    let req = request(&[("Accept", "a"), ("accept", "b")]);
    assert_eq!(req.header("Accept"), Some("a"));
}

#[test]
fn success_range_is_2xx_only() {
    let ok = |status| HttpResponse { status, body: String::new() }.is_success();
    assert!(ok(200));
    assert!(ok(204));
    assert!(!ok(199));
    assert!(!ok(301));
    assert!(!ok(401));
}

#[test]
fn method_names_are_uppercase_verbs() {
    let names: Vec<_> = [HttpMethod::Get, HttpMethod::Post, HttpMethod::Put, HttpMethod::Delete]
        .into_iter()
        .map(HttpMethod::as_str)
        .collect();
    assert_eq!(names, ["GET", "POST", "PUT", "DELETE"]);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn offline_transport_reports_unreachable() {
    let result = futures::executor::block_on(OfflineTransport.send(request(&[])));
    assert!(matches!(result, Err(TransportError::Unreachable(ref msg)) if msg.contains("/api/v1/task")));
}
