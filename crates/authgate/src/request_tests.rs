// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use reqwest::header::CONTENT_TYPE;
use reqwest::Method;

use super::{resolve_url, RequestAttempt, RequestOptions};

#[test]
fn resolve_absolute_http_passes_through() {
    let url = resolve_url("http://localhost:4000", "http://other:9000/x");
    assert_eq!(url, "http://other:9000/x");
}

#[test]
fn resolve_absolute_https_passes_through() {
    let url = resolve_url("http://localhost:4000", "https://api.example.com/v1/menus");
    assert_eq!(url, "https://api.example.com/v1/menus");
}

#[test]
fn resolve_path_joins_base() {
    let url = resolve_url("http://localhost:4000", "/api/v1/menus");
    assert_eq!(url, "http://localhost:4000/api/v1/menus");
}

#[test]
fn resolve_trims_trailing_slash_on_base() {
    let url = resolve_url("http://localhost:4000/", "/api/v1/menus");
    assert_eq!(url, "http://localhost:4000/api/v1/menus");
}

#[test]
fn resolve_inserts_separator_when_missing() {
    let url = resolve_url("http://localhost:4000", "api/v1/menus");
    assert_eq!(url, "http://localhost:4000/api/v1/menus");
}

#[test]
fn new_attempt_is_not_retried() {
    let attempt =
        RequestAttempt::new(Method::GET, "http://x/a".to_owned(), RequestOptions::default());
    assert!(!attempt.retried);
}

#[test]
fn retried_marks_copy_without_mutating_original() {
    let attempt =
        RequestAttempt::new(Method::GET, "http://x/a".to_owned(), RequestOptions::default());
    let replay = attempt.retried();
    assert!(replay.retried);
    assert!(!attempt.retried);
    assert_eq!(replay.url, attempt.url);
    assert_eq!(replay.method, attempt.method);
}

#[test]
fn retried_preserves_headers_and_body() {
    let options = RequestOptions::json(&serde_json::json!({ "name": "margherita" }))
        .expect("json options");
    let attempt = RequestAttempt::new(Method::POST, "http://x/a".to_owned(), options);
    let replay = attempt.retried();
    assert_eq!(replay.headers.get(CONTENT_TYPE), attempt.headers.get(CONTENT_TYPE));
    assert_eq!(replay.body, attempt.body);
}

#[test]
fn json_options_set_content_type() {
    let options = RequestOptions::json(&serde_json::json!({ "a": 1 })).expect("json options");
    assert_eq!(
        options.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
    let body = options.body.expect("body");
    let value: serde_json::Value = serde_json::from_slice(&body).expect("parse body");
    assert_eq!(value["a"], 1);
}
