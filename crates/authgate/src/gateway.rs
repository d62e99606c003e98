// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The authenticated request gateway.
//!
//! Issues HTTP requests with bearer injection and recovers transparently
//! from one class of failure: an expired access token. A 401/403 triggers a
//! single-flight refresh; requests failing while the refresh is in flight
//! are queued and replayed in FIFO order once it settles. Each request is
//! retried at most once. All other failures pass through unchanged.

use std::sync::Arc;

use reqwest::{Method, Response, StatusCode};
use tokio::sync::{broadcast, oneshot, Mutex, RwLock};

use crate::config::GatewayConfig;
use crate::credential::persist::{CredentialStore, MemoryStore};
use crate::credential::refresh::do_refresh;
use crate::credential::CredentialPair;
use crate::error::GatewayError;
use crate::events::{SessionEvent, REASON_SESSION_EXPIRED};
use crate::request::{resolve_url, RequestAttempt, RequestOptions};

type ReplyTx = oneshot::Sender<Result<Response, GatewayError>>;
type ReplyRx = oneshot::Receiver<Result<Response, GatewayError>>;

/// A request parked behind the in-flight refresh.
///
/// Created when a call fails authorization while a refresh is already
/// running; settled exactly once when that refresh settles. Never outlives
/// process memory.
struct PendingRequest {
    attempt: RequestAttempt,
    reply: ReplyTx,
}

/// Refresh coordination state.
///
/// The queue exists only while a refresh is in flight and is drained in
/// FIFO order when it settles. At most one refresh runs at any time;
/// callers that fail authorization meanwhile enqueue instead of starting
/// their own.
enum RefreshState {
    Idle,
    Refreshing { queue: Vec<PendingRequest> },
}

/// What a caller that hit an authorization failure ends up doing.
enum Role {
    /// A refresh is already in flight; wait for it to settle.
    Queued(ReplyRx),
    /// Won the idle state; drive the refresh cycle.
    Winner,
    /// Another caller already rotated the credentials between our failed
    /// attempt and the lock; just replay against the current token.
    Replay,
}

/// Gateway wrapping outbound HTTP calls with credential injection and
/// single-flight refresh.
///
/// Construct one per application and pass it by reference; all state is
/// internal to the instance, so gateways in different tests never interact.
pub struct Gateway {
    config: GatewayConfig,
    http: reqwest::Client,
    creds: RwLock<Option<CredentialPair>>,
    store: Arc<dyn CredentialStore>,
    refresh: Mutex<RefreshState>,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl Gateway {
    /// Create a gateway with an in-memory credential store.
    pub fn new(config: GatewayConfig) -> Self {
        Self::with_store(config, Arc::new(MemoryStore::default()))
    }

    /// Create a gateway backed by the given credential store.
    ///
    /// Credentials already present in the store are loaded immediately.
    pub fn with_store(config: GatewayConfig, store: Arc<dyn CredentialStore>) -> Self {
        let creds = match store.load() {
            Ok(pair) => pair,
            Err(e) => {
                tracing::warn!(err = %e, "failed to load persisted credentials");
                None
            }
        };
        let (event_tx, _) = broadcast::channel(16);
        Self {
            http: reqwest::Client::builder()
                .timeout(config.timeout())
                .build()
                .unwrap_or_default(),
            config,
            creds: RwLock::new(creds),
            store,
            refresh: Mutex::new(RefreshState::Idle),
            event_tx,
        }
    }

    /// Subscribe to session lifecycle events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    /// Atomically replace the stored credential pair.
    ///
    /// Nothing is queued or replayed by this call.
    pub async fn set_credentials(
        &self,
        access_token: impl Into<String>,
        refresh_token: Option<String>,
    ) {
        let pair = CredentialPair::new(access_token, refresh_token);
        *self.creds.write().await = Some(pair.clone());
        if let Err(e) = self.store.save(&pair) {
            tracing::warn!(err = %e, "failed to persist credentials");
        }
    }

    /// Remove the stored credential pair.
    ///
    /// Subsequent authorization failures skip refresh entirely.
    pub async fn clear_credentials(&self) {
        *self.creds.write().await = None;
        if let Err(e) = self.store.clear() {
            tracing::warn!(err = %e, "failed to clear persisted credentials");
        }
    }

    /// Issue a request, resolving `url` against the configured base.
    ///
    /// The current access token is attached as a bearer credential when
    /// present. A 401/403 triggers the refresh protocol; transport failures
    /// and other non-2xx responses pass through unchanged.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<Response, GatewayError> {
        let resolved = resolve_url(&self.config.base_url, url);
        self.dispatch(RequestAttempt::new(method, resolved, options)).await
    }

    /// GET `path` and decode the response body as JSON.
    pub async fn get_json(&self, path: &str) -> anyhow::Result<serde_json::Value> {
        let resp = self.request(Method::GET, path, RequestOptions::default()).await?;
        Ok(resp.json().await?)
    }

    /// POST a JSON body to `path` and return the response body.
    pub async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> anyhow::Result<serde_json::Value> {
        let resp = self.request(Method::POST, path, RequestOptions::json(body)?).await?;
        let bytes = resp.bytes().await?;
        if bytes.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn access_token(&self) -> Option<String> {
        self.creds.read().await.as_ref().map(|p| p.access_token.clone())
    }

    async fn refresh_token(&self) -> Option<String> {
        self.creds.read().await.as_ref().and_then(|p| p.refresh_token.clone())
    }

    /// First send plus authorization recovery.
    async fn dispatch(&self, attempt: RequestAttempt) -> Result<Response, GatewayError> {
        let token = self.access_token().await;
        let resp = attempt.build(&self.http, token.as_deref()).send().await?;

        if !is_auth_status(resp.status()) {
            return finish(resp).await;
        }

        let Some(refresh_token) = self.refresh_token().await else {
            self.notify_expired();
            return Err(GatewayError::SessionExpired);
        };

        // Join or start the single-flight cycle. Check-and-set happens under
        // the lock, so concurrent failures cannot start competing refreshes.
        let role = {
            let mut refresh = self.refresh.lock().await;
            match &mut *refresh {
                RefreshState::Refreshing { queue } => {
                    let (tx, rx) = oneshot::channel();
                    queue.push(PendingRequest { attempt: attempt.retried(), reply: tx });
                    Role::Queued(rx)
                }
                RefreshState::Idle => {
                    // A refresh may have completed between our failed attempt
                    // and the lock; spending the rotated refresh token on a
                    // second cycle would kill the session.
                    if self.access_token().await != token {
                        Role::Replay
                    } else {
                        *refresh = RefreshState::Refreshing { queue: Vec::new() };
                        Role::Winner
                    }
                }
            }
        };

        match role {
            Role::Queued(rx) => rx.await.unwrap_or_else(|_| Err(GatewayError::SessionExpired)),
            Role::Replay => self.send_attempt(&attempt.retried()).await,
            Role::Winner => self.run_refresh(attempt, refresh_token).await,
        }
    }

    /// Drive the in-flight refresh to completion: call the refresh endpoint,
    /// settle the queue in FIFO order, then replay the triggering request.
    ///
    /// Credentials are updated (or cleared) before the state returns to
    /// Idle, so a request failing right after the cycle settles sees the
    /// rotated token instead of starting a doomed refresh with the old one.
    async fn run_refresh(
        &self,
        attempt: RequestAttempt,
        refresh_token: String,
    ) -> Result<Response, GatewayError> {
        let refresh_url = resolve_url(&self.config.base_url, &self.config.refresh_path);
        let outcome = do_refresh(&self.http, &refresh_url, &refresh_token).await;

        match outcome {
            Ok(token) => {
                self.set_credentials(token.access_token, Some(token.refresh_token)).await;
                let queue = self.take_queue().await;
                tracing::debug!(queued = queue.len(), "credentials refreshed");
                for pending in queue {
                    let result = self.send_attempt(&pending.attempt).await;
                    let _ = pending.reply.send(result);
                }
                self.send_attempt(&attempt.retried()).await
            }
            Err(e) => {
                self.clear_credentials().await;
                let queue = self.take_queue().await;
                tracing::warn!(err = %e, queued = queue.len(), "credential refresh failed");
                self.notify_expired();
                for pending in queue {
                    let _ = pending.reply.send(Err(GatewayError::SessionExpired));
                }
                Err(GatewayError::SessionExpired)
            }
        }
    }

    /// Take the queued requests and return the state to Idle in one step;
    /// requests failing from here on start their own cycle.
    async fn take_queue(&self) -> Vec<PendingRequest> {
        let mut refresh = self.refresh.lock().await;
        match std::mem::replace(&mut *refresh, RefreshState::Idle) {
            RefreshState::Refreshing { queue } => queue,
            RefreshState::Idle => Vec::new(),
        }
    }

    /// Send one attempt with the current access token and settle it.
    ///
    /// Every caller passes a replayed attempt, whose one retry is spent:
    /// another authorization failure is terminal, never a second refresh.
    async fn send_attempt(&self, attempt: &RequestAttempt) -> Result<Response, GatewayError> {
        let token = self.access_token().await;
        let resp = attempt.build(&self.http, token.as_deref()).send().await?;
        if attempt.retried && is_auth_status(resp.status()) {
            self.notify_expired();
            return Err(GatewayError::SessionExpired);
        }
        finish(resp).await
    }

    fn notify_expired(&self) {
        let _ = self.event_tx.send(SessionEvent::SessionExpired {
            reason: REASON_SESSION_EXPIRED.to_owned(),
        });
    }
}

/// 401 and 403 both count as the presented credential being rejected.
fn is_auth_status(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}

/// Map a settled response: 2xx passes through, anything else is an upstream
/// error with the body captured for the caller.
async fn finish(resp: Response) -> Result<Response, GatewayError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(GatewayError::Upstream { status, body })
}
