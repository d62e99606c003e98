// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Authgate: authenticated request gateway with single-flight credential refresh.
//!
//! Wraps outbound HTTP calls to a REST backend: injects the current access
//! token as a bearer credential, recovers transparently from expired-token
//! failures by refreshing once and replaying queued requests, and broadcasts
//! a session-expired notification when recovery is impossible. Every other
//! failure passes through unchanged so callers keep their own handling.

pub mod config;
pub mod credential;
pub mod error;
pub mod events;
pub mod gateway;
pub mod request;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use events::SessionEvent;
pub use gateway::Gateway;
pub use request::{RequestAttempt, RequestOptions};
