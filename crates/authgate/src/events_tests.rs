// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{SessionEvent, REASON_SESSION_EXPIRED};

#[test]
fn session_expired_wire_shape() {
    let event = SessionEvent::SessionExpired { reason: REASON_SESSION_EXPIRED.to_owned() };
    let value = serde_json::to_value(&event).expect("serialize");
    assert_eq!(
        value,
        serde_json::json!({ "event": "session_expired", "reason": "session_expired" })
    );
}

#[test]
fn session_expired_round_trips() {
    let json = r#"{"event":"session_expired","reason":"session_expired"}"#;
    let event: SessionEvent = serde_json::from_str(json).expect("deserialize");
    let SessionEvent::SessionExpired { reason } = event;
    assert_eq!(reason, REASON_SESSION_EXPIRED);
}
