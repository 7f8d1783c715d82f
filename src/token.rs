// ABOUTME: Immutable access token value with expiry checks
// ABOUTME: Provides the clock seam used for deterministic expiry testing
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Access Tokens
//!
//! Represents an access token (RFC 6749 §1.4). Tokens are created by
//! successful token-response parsing and are immutable afterwards. The
//! expiry, when set, is always an absolute instant; relative
//! `expires_in` values are normalized during parsing.
//!
//! Expiry checks take "now" from a [`Clock`] so tests can pin time
//! without any process-wide override.

use crate::errors::{OAuthError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Source of the current time for expiry checks.
///
/// [`SystemClock`] is the production implementation; [`FixedClock`]
/// pins time for deterministic tests.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// The current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a fixed instant, for tests
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Clock frozen at the given Unix timestamp (seconds)
    ///
    /// # Panics
    ///
    /// Panics if the timestamp is outside the representable range.
    #[must_use]
    pub fn at_timestamp(seconds: i64) -> Self {
        Self(DateTime::from_timestamp(seconds, 0).expect("timestamp in range"))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// An issued OAuth 2.0 access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resource_owner_id: Option<String>,
}

impl AccessToken {
    /// Construct a token value directly.
    ///
    /// Token exchanges construct this through response parsing; direct
    /// construction exists for deserialization and tests.
    #[must_use]
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires: Option<DateTime<Utc>>,
        resource_owner_id: Option<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
            expires,
            resource_owner_id,
        }
    }

    /// The access token string
    #[must_use]
    pub fn token(&self) -> &str {
        &self.access_token
    }

    /// The refresh token, if the server issued one
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Absolute expiry instant, if known
    #[must_use]
    pub const fn expires(&self) -> Option<DateTime<Utc>> {
        self.expires
    }

    /// The resource owner identifier, if the response carried one
    #[must_use]
    pub fn resource_owner_id(&self) -> Option<&str> {
        self.resource_owner_id.as_deref()
    }

    /// Checks whether this token has expired against the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::ExpiryNotSet`] when the token has no expiry.
    pub fn has_expired(&self) -> Result<bool> {
        self.has_expired_at(SystemClock.now())
    }

    /// Checks whether this token had expired at the given instant.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::ExpiryNotSet`] when the token has no expiry.
    pub fn has_expired_at(&self, now: DateTime<Utc>) -> Result<bool> {
        match self.expires {
            Some(expires) => Ok(expires < now),
            None => Err(OAuthError::ExpiryNotSet),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_check_without_expiry_is_an_error() {
        let token = AccessToken::new("abc", None, None, None);
        assert!(matches!(
            token.has_expired_at(FixedClock::at_timestamp(1_000).now()),
            Err(OAuthError::ExpiryNotSet)
        ));
    }
}
