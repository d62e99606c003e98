// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

/// Configuration for the request gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL that relative request paths are resolved against
    /// (e.g. `http://localhost:4000`).
    pub base_url: String,

    /// Path (or absolute URL) of the credential refresh endpoint.
    pub refresh_path: String,

    /// Per-request timeout in milliseconds. Also bounds how long queued
    /// callers can wait on an in-flight refresh, since the refresh call
    /// itself is subject to it.
    pub timeout_ms: u64,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            refresh_path: "/auth/refresh".to_owned(),
            timeout_ms: 30_000,
        }
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }
}
