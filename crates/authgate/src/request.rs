// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request descriptions that can be replayed after a credential refresh.

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;

/// Caller-supplied options for an outbound request.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl RequestOptions {
    /// Options carrying a JSON body with the content type set.
    pub fn json<T: serde::Serialize>(value: &T) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(Self { headers, body: Some(Bytes::from(serde_json::to_vec(value)?)) })
    }
}

/// A single attempt at an outbound request.
///
/// The caller's method, URL, headers, and body are captured once so the
/// gateway can re-issue the call after a refresh without mutating caller
/// input. `retried` marks an attempt that already went through one refresh
/// cycle; an attempt is replayed at most once.
#[derive(Debug, Clone)]
pub struct RequestAttempt {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
    pub retried: bool,
}

impl RequestAttempt {
    pub fn new(method: Method, url: String, options: RequestOptions) -> Self {
        Self { method, url, headers: options.headers, body: options.body, retried: false }
    }

    /// Copy of this attempt with its one retry spent.
    pub fn retried(&self) -> Self {
        Self { retried: true, ..self.clone() }
    }

    /// Build the outbound request, attaching the bearer token when present.
    pub fn build(&self, client: &reqwest::Client, token: Option<&str>) -> reqwest::RequestBuilder {
        let mut req = client.request(self.method.clone(), &self.url).headers(self.headers.clone());
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        if let Some(ref body) = self.body {
            req = req.body(body.clone());
        }
        req
    }
}

/// Resolve a caller-supplied URL against the configured base.
///
/// Absolute `http(s)://` URLs pass through; anything else is joined to the
/// base with a single `/` separator.
pub fn resolve_url(base: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_owned();
    }
    let base = base.trim_end_matches('/');
    if url.starts_with('/') {
        format!("{base}{url}")
    } else {
        format!("{base}/{url}")
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
