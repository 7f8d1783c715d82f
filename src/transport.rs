// ABOUTME: HTTP transport seam with a reqwest-backed default implementation
// ABOUTME: Executes fully specified requests and returns raw response bodies
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # HTTP Transport
//!
//! The provider never talks to the network directly: it builds a
//! [`RequestSpec`] and hands it to an [`HttpTransport`]. The default
//! [`ReqwestTransport`] uses timeouts tuned for token exchanges, which
//! should be fast operations. Cancellation, timeouts, and retries beyond
//! that are the transport's business, not the provider's.

use crate::errors::TransportError;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// HTTP methods the OAuth flows use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    /// GET request, parameters in the query string
    Get,
    /// POST request, parameters form-encoded in the body
    Post,
}

impl HttpMethod {
    /// Canonical method name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully specified outbound HTTP request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    /// Request method
    pub method: HttpMethod,
    /// Absolute request URL, query string included
    pub url: String,
    /// Header name/value pairs in emission order
    pub headers: Vec<(String, String)>,
    /// Form-encoded body, when the request carries one
    pub body: Option<String>,
}

impl RequestSpec {
    /// Looks up a header value by case-insensitive name
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Executes outbound HTTP requests for the OAuth flows.
///
/// Implementations must support GET and POST with custom headers and a
/// form-urlencoded body, returning the raw response body on success.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Execute the request and return the raw response body
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] for any network or HTTP-layer failure.
    async fn execute(&self, request: RequestSpec) -> std::result::Result<String, TransportError>;
}

/// Default transport backed by a shared `reqwest::Client`
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with timeouts tuned for OAuth exchanges
    /// (15s request, 5s connect).
    #[must_use]
    pub fn new() -> Self {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(15))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client }
    }

    /// Create a transport around a caller-configured client
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: RequestSpec) -> std::result::Result<String, TransportError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        response
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_is_case_insensitive() {
        let request = RequestSpec {
            method: HttpMethod::Get,
            url: "https://example.com".to_owned(),
            headers: vec![("Authorization".to_owned(), "Bearer abc".to_owned())],
            body: None,
        };

        assert_eq!(request.header("authorization"), Some("Bearer abc"));
        assert_eq!(request.header("content-type"), None);
    }
}
