// ABOUTME: Shared test helpers for OAuth client integration tests
// ABOUTME: Provides a scripted mock transport that records outbound requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(dead_code)]

use async_trait::async_trait;
use oauth2_generic_client::{HttpTransport, RequestSpec, TransportError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Transport double that replays scripted responses and records every
/// request the provider builds.
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<String, TransportError>>>,
    requests: Mutex<Vec<RequestSpec>>,
}

impl MockTransport {
    pub fn new(responses: Vec<Result<String, TransportError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Transport that answers every request with the same body
    pub fn replying(body: &str) -> Arc<Self> {
        Self::new(vec![Ok(body.to_owned())])
    }

    /// Transport whose single response is a transport failure
    pub fn failing(message: &str) -> Arc<Self> {
        Self::new(vec![Err(TransportError(message.to_owned()))])
    }

    /// Requests the provider issued, in order
    pub fn recorded(&self) -> Vec<RequestSpec> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: RequestSpec) -> Result<String, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted response left".to_owned())))
    }
}
