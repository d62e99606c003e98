// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use reqwest::StatusCode;

use super::GatewayError;

#[test]
fn as_str_covers_all_variants() {
    let upstream =
        GatewayError::Upstream { status: StatusCode::INTERNAL_SERVER_ERROR, body: String::new() };
    assert_eq!(GatewayError::SessionExpired.as_str(), "SESSION_EXPIRED");
    assert_eq!(upstream.as_str(), "UPSTREAM_ERROR");
}

#[test]
fn display_includes_upstream_status() {
    let err = GatewayError::Upstream {
        status: StatusCode::BAD_GATEWAY,
        body: "gateway down".to_owned(),
    };
    let rendered = err.to_string();
    assert!(rendered.contains("502"), "got: {rendered}");
}

#[test]
fn display_session_expired() {
    assert_eq!(GatewayError::SessionExpired.to_string(), "session expired");
}

#[test]
fn status_accessor_only_for_upstream() {
    let upstream =
        GatewayError::Upstream { status: StatusCode::NOT_FOUND, body: String::new() };
    assert_eq!(upstream.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(GatewayError::SessionExpired.status(), None);
}
