// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Credential refresh against the token endpoint.

use serde::{Deserialize, Serialize};

/// Request body sent to the refresh endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// Token pair reissued by the refresh endpoint. Both tokens rotate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// Perform a single refresh request.
///
/// Any non-2xx response is a refresh failure. The refresh itself is never
/// retried; a failed refresh is terminal for the current session.
pub async fn do_refresh(
    client: &reqwest::Client,
    refresh_url: &str,
    refresh_token: &str,
) -> anyhow::Result<RefreshResponse> {
    let resp = client
        .post(refresh_url)
        .json(&RefreshRequest { refresh_token })
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        anyhow::bail!("refresh failed ({status}): {text}");
    }

    let token: RefreshResponse = resp.json().await?;
    Ok(token)
}
