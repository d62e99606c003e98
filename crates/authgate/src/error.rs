// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt;

use reqwest::StatusCode;

/// Errors surfaced by the gateway.
///
/// Only authorization failures (401/403) are acted on internally; they are
/// either recovered by the refresh protocol or converted to
/// [`GatewayError::SessionExpired`]. Everything else passes through so
/// calling code retains its normal error handling.
#[derive(Debug)]
pub enum GatewayError {
    /// Transport-level failure from the underlying HTTP client (connect,
    /// timeout, or body decode in the JSON helpers). Never retried.
    Network(reqwest::Error),
    /// The session cannot be recovered: the refresh endpoint rejected the
    /// refresh token, no refresh token is stored, or the request already
    /// spent its one retry.
    SessionExpired,
    /// Any other non-2xx response, with the body captured.
    Upstream { status: StatusCode, body: String },
}

impl GatewayError {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network(_) => "NETWORK_ERROR",
            Self::SessionExpired => "SESSION_EXPIRED",
            Self::Upstream { .. } => "UPSTREAM_ERROR",
        }
    }

    /// Upstream status code, if this error carries one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(e) => write!(f, "network error: {e}"),
            Self::SessionExpired => f.write_str("session expired"),
            Self::Upstream { status, .. } => write!(f, "upstream error ({status})"),
        }
    }
}

impl std::error::Error for GatewayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Network(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e)
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
