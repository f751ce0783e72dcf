//! Single-flight refresh coordination
//!
//! At most one refresh call is in flight at any time. Requests that
//! hit a 401 while it is outstanding queue behind it and are released,
//! in arrival order, once the refresh settles. A failed refresh ends
//! the session: the store is cleared and the whole batch is rejected.

use tokio::sync::{oneshot, Mutex};
use tracing::{debug, info, warn};

use crate::auth::token_store::{TokenPair, TokenStore};
use crate::error::{ApiError, Result};
use crate::types::RefreshRequest;

/// Queued callers receive the refreshed access token, or `None` when
/// the refresh failed and the session is gone.
type Waiter = oneshot::Sender<Option<String>>;

enum RefreshState {
    Idle,
    Refreshing { waiters: Vec<Waiter> },
}

/// Coordinates token refresh across concurrent requests.
///
/// Owned by the client instance rather than living in process-wide
/// state, so independent clients never share refresh state.
pub(crate) struct RefreshCoordinator {
    http: reqwest::Client,
    refresh_url: String,
    state: Mutex<RefreshState>,
}

impl RefreshCoordinator {
    pub(crate) fn new(http: reqwest::Client, refresh_url: String) -> Self {
        Self {
            http,
            refresh_url,
            state: Mutex::new(RefreshState::Idle),
        }
    }

    /// Obtain a fresh access token, joining an in-flight refresh when
    /// one exists.
    ///
    /// The first caller to arrive while idle flips the state to
    /// refreshing and performs the wire call; everyone else queues.
    /// No await point sits between observing `Idle` and flipping the
    /// state, so the transition is atomic with respect to concurrent
    /// callers.
    pub(crate) async fn fresh_access_token(&self, store: &TokenStore) -> Result<String> {
        let rx = {
            let mut state = self.state.lock().await;
            match &mut *state {
                RefreshState::Refreshing { waiters } => {
                    let (tx, rx) = oneshot::channel();
                    waiters.push(tx);
                    Some(rx)
                }
                RefreshState::Idle => {
                    *state = RefreshState::Refreshing {
                        waiters: Vec::new(),
                    };
                    None
                }
            }
        };

        if let Some(rx) = rx {
            debug!("refresh already in flight, queueing");
            return match rx.await {
                Ok(Some(token)) => Ok(token),
                _ => Err(ApiError::AuthExpired),
            };
        }

        match self.refresh_once(store).await {
            Ok(pair) => {
                self.settle(Some(pair.access_token.clone())).await;
                Ok(pair.access_token)
            }
            Err(err) => {
                warn!("token refresh failed: {err}");
                if let Err(err) = store.clear().await {
                    warn!("failed to clear credentials after refresh failure: {err}");
                }
                self.settle(None).await;
                Err(ApiError::AuthExpired)
            }
        }
    }

    /// Perform the wire call and persist the rotated pair.
    async fn refresh_once(&self, store: &TokenStore) -> Result<TokenPair> {
        let current = store.get().await.ok_or(ApiError::AuthExpired)?;
        debug!("refreshing access token");

        let response = self
            .http
            .post(&self.refresh_url)
            .json(&RefreshRequest {
                refresh_token: &current.refresh_token,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Http { status, body });
        }

        let rotated: RotatedPair = response.json().await?;
        // Some backend revisions rotate only the access token.
        let pair = TokenPair::new(
            rotated.access_token,
            rotated
                .refresh_token
                .unwrap_or(current.refresh_token),
        );
        store.set(&pair).await?;
        info!("access token refreshed");
        Ok(pair)
    }

    /// Release every queued waiter, in arrival order, and return to idle.
    async fn settle(&self, outcome: Option<String>) {
        let waiters = {
            let mut state = self.state.lock().await;
            match std::mem::replace(&mut *state, RefreshState::Idle) {
                RefreshState::Refreshing { waiters } => waiters,
                RefreshState::Idle => Vec::new(),
            }
        };
        for waiter in waiters {
            // A dropped receiver means the caller abandoned the request.
            let _ = waiter.send(outcome.clone());
        }
    }
}

#[derive(serde::Deserialize)]
struct RotatedPair {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}
