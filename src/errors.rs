// ABOUTME: Unified error types for OAuth 2.0 client flows
// ABOUTME: Covers grant preparation, transport, provider responses, and token expiry failures
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Unified Error Handling
//!
//! Every fallible boundary in the crate returns [`OAuthError`]: grant
//! preparation, request transport, response validation, token expiry
//! checks, and PKCE method resolution. Transport failures are surfaced
//! unchanged; nothing at this layer retries.

use thiserror::Error;

/// Error returned by the HTTP transport collaborator.
///
/// Wraps whatever the underlying HTTP client reported. The provider
/// surfaces it to the caller as [`OAuthError::Transport`] without retry.
#[derive(Debug, Error)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);

/// OAuth client error types
#[derive(Debug, Error)]
pub enum OAuthError {
    /// A required grant parameter was absent from the caller-supplied options
    #[error("required parameter not passed: {0}")]
    MissingParameter(String),

    /// The HTTP layer failed before a response body was obtained
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The authorization server reported an error in the response body
    #[error("authorization server returned an error: {message} (code {code})")]
    Provider {
        /// Value of the configured error field, stringified when not a string
        message: String,
        /// Value of the configured error-code field, 0 when absent or non-numeric
        code: i64,
    },

    /// The response body was not a JSON object
    #[error("invalid response received from authorization server, expected JSON object")]
    MalformedResponse,

    /// The token response carried no usable `access_token` field
    #[error("required field not found in token response: access_token")]
    MissingAccessToken,

    /// The token response `expires_in` value was not numeric
    #[error("expires_in value must be numeric")]
    InvalidExpiry,

    /// An expiry check was requested on a token without an expiry
    #[error("expiry is not set on the token")]
    ExpiryNotSet,

    /// The configured PKCE method is neither `S256` nor `plain`
    #[error("unknown PKCE method \"{0}\"")]
    UnknownPkceMethod(String),
}

/// Convenience result type used throughout the crate
pub type Result<T> = std::result::Result<T, OAuthError>;
