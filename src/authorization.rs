// ABOUTME: Authorization endpoint query parameters and RFC 3986 serialization
// ABOUTME: Builds the redirect query string including optional PKCE extensions
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Authorization Request Parameters
//!
//! The parameter bundle appended to the authorization endpoint URL when
//! redirecting the resource owner. Serialization is percent-encoded per
//! RFC 3986 (spaces become `%20`, never `+`), fields are emitted in
//! declaration order, and unset optional fields are omitted entirely.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Query parameters for an authorization-endpoint redirect.
///
/// Immutable once built; the provider fills `state`, `scope`, and the
/// PKCE fields from its configuration before handing the value out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationParameters {
    /// Requested response type, `code` for the authorization code flow
    pub response_type: String,
    /// OAuth client identifier
    pub client_id: String,
    /// Approval prompt hint, defaults to `auto`
    pub approval_prompt: String,
    /// Redirect URI the authorization server sends the resource owner back to
    pub redirect_uri: String,
    /// Opaque anti-CSRF state, caller-supplied or securely random
    pub state: String,
    /// Requested scopes, already joined with the provider's separator
    pub scope: Option<String>,
    /// PKCE challenge method (`S256` or `plain`), when PKCE is in use
    pub code_challenge_method: Option<String>,
    /// PKCE code challenge derived from the stored verifier
    pub code_challenge: Option<String>,
}

impl AuthorizationParameters {
    /// Create a parameter bundle without PKCE fields
    #[must_use]
    pub fn new(
        response_type: impl Into<String>,
        approval_prompt: impl Into<String>,
        client_id: impl Into<String>,
        redirect_uri: impl Into<String>,
        state: impl Into<String>,
        scope: Option<String>,
    ) -> Self {
        Self {
            response_type: response_type.into(),
            client_id: client_id.into(),
            approval_prompt: approval_prompt.into(),
            redirect_uri: redirect_uri.into(),
            state: state.into(),
            scope,
            code_challenge_method: None,
            code_challenge: None,
        }
    }

    /// Serializes all set fields as an RFC 3986 percent-encoded query string.
    #[must_use]
    pub fn authorization_query(&self) -> String {
        let mut pairs = vec![
            ("response_type", self.response_type.clone()),
            ("client_id", self.client_id.clone()),
            ("approval_prompt", self.approval_prompt.clone()),
            ("redirect_uri", self.redirect_uri.clone()),
            ("state", self.state.clone()),
        ];
        if let Some(scope) = &self.scope {
            pairs.push(("scope", scope.clone()));
        }
        if let Some(method) = &self.code_challenge_method {
            pairs.push(("code_challenge_method", method.clone()));
        }
        if let Some(challenge) = &self.code_challenge {
            pairs.push(("code_challenge", challenge.clone()));
        }
        encode_pairs(pairs)
    }
}

/// Percent-encodes `key=value` pairs per RFC 3986 and joins them with `&`.
pub(crate) fn encode_pairs<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    pairs
        .into_iter()
        .map(|(key, value)| format!("{}={}", encode(key), encode(&value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// Appends a query string to a URL, preserving any existing query component.
pub(crate) fn append_query(url: &str, query: &str) -> String {
    let query = query.trim_matches(|c| c == '?' || c == '&');
    if query.is_empty() {
        return url.to_owned();
    }
    let glue = if url.contains('?') { '&' } else { '?' };
    format!("{url}{glue}{query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_pairs_uses_percent_twenty_for_spaces() {
        let encoded = encode_pairs(vec![("scope", "read write".to_owned())]);
        assert_eq!(encoded, "scope=read%20write");
    }

    #[test]
    fn encode_pairs_escapes_reserved_characters() {
        let encoded = encode_pairs(vec![(
            "redirect_uri",
            "https://example.com/cb?a=1&b=2".to_owned(),
        )]);
        assert_eq!(
            encoded,
            "redirect_uri=https%3A%2F%2Fexample.com%2Fcb%3Fa%3D1%26b%3D2"
        );
    }

    #[test]
    fn append_query_respects_existing_query_component() {
        assert_eq!(
            append_query("https://example.com/authorize", "a=1"),
            "https://example.com/authorize?a=1"
        );
        assert_eq!(
            append_query("https://example.com/authorize?tenant=x", "a=1"),
            "https://example.com/authorize?tenant=x&a=1"
        );
        assert_eq!(
            append_query("https://example.com/authorize", "?&"),
            "https://example.com/authorize"
        );
    }
}
