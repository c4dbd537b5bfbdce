//! One-time action tokens (anti-replay).
//!
//! An operator first asks for a token bound to a specific action, then presents
//! it when triggering that action. A token is accepted at most once.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use storekeep_core::{DomainError, OperatorId};

/// Operator-triggered maintenance actions that require a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceAction {
    ImageReview,
    DuplicateCleanup,
}

impl MaintenanceAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceAction::ImageReview => "image_review",
            MaintenanceAction::DuplicateCleanup => "duplicate_cleanup",
        }
    }
}

impl core::fmt::Display for MaintenanceAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque single-use token.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionToken(Uuid);

impl ActionToken {
    fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl core::fmt::Display for ActionToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl core::str::FromStr for ActionToken {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::parse_str(s.trim())
            .map_err(|e| DomainError::invalid_id(format!("ActionToken: {e}")))?;
        Ok(Self(uuid))
    }
}

/// A freshly issued token and its expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedToken {
    pub token: ActionToken,
    pub action: MaintenanceAction,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("unknown or already used action token")]
    Unknown,

    #[error("action token has expired")]
    Expired,

    #[error("action token was issued for a different operator or action")]
    Mismatch,
}

#[derive(Debug, Clone)]
struct TokenEntry {
    operator_id: OperatorId,
    action: MaintenanceAction,
    expires_at: DateTime<Utc>,
}

/// In-process token registry.
#[derive(Debug)]
pub struct ActionTokens {
    ttl: Duration,
    inner: Mutex<HashMap<ActionToken, TokenEntry>>,
}

impl ActionTokens {
    pub const DEFAULT_TTL_SECS: i64 = 30 * 60;

    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Issue a token for `action` on behalf of `operator_id`.
    ///
    /// Expired tokens are purged opportunistically.
    pub fn issue(&self, operator_id: OperatorId, action: MaintenanceAction, now: DateTime<Utc>) -> IssuedToken {
        let token = ActionToken::random();
        let expires_at = now + self.ttl;

        let mut map = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        map.retain(|_, entry| entry.expires_at > now);
        map.insert(
            token,
            TokenEntry {
                operator_id,
                action,
                expires_at,
            },
        );

        tracing::debug!(%operator_id, %action, %expires_at, "issued action token");

        IssuedToken {
            token,
            action,
            expires_at,
        }
    }

    /// Consume a token.
    ///
    /// A mismatched token is left in place for its rightful owner; a matching
    /// token is removed whether it is still valid or already expired.
    pub fn consume(
        &self,
        operator_id: OperatorId,
        action: MaintenanceAction,
        token: ActionToken,
        now: DateTime<Utc>,
    ) -> Result<(), TokenError> {
        let mut map = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let entry = map.get(&token).ok_or(TokenError::Unknown)?;
        if entry.operator_id != operator_id || entry.action != action {
            return Err(TokenError::Mismatch);
        }

        let expires_at = entry.expires_at;
        map.remove(&token);

        if now >= expires_at {
            return Err(TokenError::Expired);
        }
        Ok(())
    }
}

impl Default for ActionTokens {
    fn default() -> Self {
        Self::new(Duration::seconds(Self::DEFAULT_TTL_SECS))
    }
}
