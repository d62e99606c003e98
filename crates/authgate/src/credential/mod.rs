// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Credential types, storage, and refresh.
//!
//! The gateway owns one credential pair: a short-lived access token attached
//! to every authenticated request, and a longer-lived refresh token that is
//! never sent anywhere except the refresh endpoint.

pub mod persist;
pub mod refresh;

use serde::{Deserialize, Serialize};

/// An access/refresh token pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl CredentialPair {
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self { access_token: access_token.into(), refresh_token }
    }
}
