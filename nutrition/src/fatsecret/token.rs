//! OAuth token cache
//!
//! Process-wide cache for the FatSecret client-credentials token. The
//! slot is guarded by an async mutex held across the refresh call, so
//! concurrent requests single-flight instead of racing to fetch
//! redundant tokens.

use crate::fatsecret::UpstreamError;
use chrono::{DateTime, Duration, Utc};
use std::future::Future;
use tokio::sync::Mutex;

/// Seconds subtracted from the provider's stated expiry so a token is
/// never used right at its deadline.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_valid(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Mutex-guarded token slot, lazily refreshed.
#[derive(Debug, Default)]
pub struct TokenCache {
    slot: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached token, refreshing through `refresh` only when
    /// the slot is empty or past its expiry. `refresh` yields the raw
    /// token and the provider's `expires_in` seconds; the safety margin
    /// is applied here.
    pub async fn get_or_refresh<F, Fut>(&self, refresh: F) -> Result<String, UpstreamError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(String, i64), UpstreamError>>,
    {
        let mut slot = self.slot.lock().await;
        let now = Utc::now();
        if let Some(cached) = slot.as_ref() {
            if cached.is_valid(now) {
                return Ok(cached.access_token.clone());
            }
        }

        let (access_token, expires_in) = refresh().await?;
        let cached = CachedToken {
            access_token: access_token.clone(),
            expires_at: now + Duration::seconds(expires_in - EXPIRY_MARGIN_SECS),
        };
        *slot = Some(cached);
        tracing::debug!(expires_in, "Refreshed OAuth token");
        Ok(access_token)
    }
}
