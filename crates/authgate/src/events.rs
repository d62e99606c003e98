// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session lifecycle notifications.
//!
//! The gateway's only observable side effect besides HTTP traffic: a
//! broadcast event telling UI collaborators the session is gone and the
//! user must re-authenticate. Delivery is lossy broadcast; send errors
//! (no subscribers) are ignored.

use serde::{Deserialize, Serialize};

/// Reason string carried by [`SessionEvent::SessionExpired`].
pub const REASON_SESSION_EXPIRED: &str = "session_expired";

/// Events broadcast by the gateway to application collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// The session is no longer recoverable.
    SessionExpired { reason: String },
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
