// ABOUTME: Main library entry point for the generic OAuth 2.0 client
// ABOUTME: Exposes grants, providers, tokens, and the transport seam
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # Generic OAuth 2.0 Client
//!
//! A client-side implementation of the OAuth 2.0 authorization framework
//! (RFC 6749) for any standards-compliant provider: authorization URL
//! construction, grant-to-token exchange, token refresh, and
//! resource-owner lookup, with PKCE (RFC 7636) support.
//!
//! ## Features
//!
//! - **All four standard grants**: authorization code, client
//!   credentials, resource owner password, refresh token
//! - **PKCE**: `S256` and `plain` challenge methods
//! - **Configurable response mapping**: error, error-code, and
//!   resource-owner-id field names adapt to non-standard providers
//! - **Pluggable transport**: HTTP runs behind a trait; the default
//!   implementation uses `reqwest`
//! - **Deterministic expiry**: expiry computation and checks take time
//!   from an injectable clock
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::collections::HashMap;
//! use oauth2_generic_client::{GenericProvider, Grant, ProviderConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> oauth2_generic_client::Result<()> {
//!     let config = ProviderConfig::new(
//!         "my-client-id",
//!         "my-client-secret",
//!         "https://my-app.example/callback",
//!         "https://provider.example/oauth/authorize",
//!         "https://provider.example/oauth/token",
//!         "https://provider.example/api/me",
//!     );
//!     let mut provider = GenericProvider::new(config);
//!
//!     // Send the resource owner here, then handle the redirect back.
//!     let params = provider.authorization_parameters(None, None, None)?;
//!     println!("authorize at: {}", provider.authorization_url(&params));
//!
//!     let grant = Grant::authorization_code(
//!         provider.client_id(),
//!         provider.client_secret(),
//!         provider.redirect_uri(),
//!         provider.pkce_code().map(ToOwned::to_owned),
//!     );
//!     let options = HashMap::from([("code".to_owned(), "callback-code".to_owned())]);
//!     let token = provider.request_access_token(grant, &options).await?;
//!
//!     let owner = provider.resource_owner(&token).await?;
//!     println!("authenticated as {:?}", owner.id());
//!     Ok(())
//! }
//! ```

/// Authorization endpoint parameters and query serialization
pub mod authorization;

/// OAuth protocol constants and configuration defaults
pub mod constants;

/// Unified error handling for every fallible boundary
pub mod errors;

/// Authorization grant types and request parameter preparation
pub mod grant;

/// Request option providers deciding auth headers and body encoding
pub mod options;

/// PKCE code verifier and challenge generation
pub mod pkce;

/// The generic provider orchestrating authorization and token flows
pub mod provider;

/// Access tokens, expiry checks, and the clock seam
pub mod token;

/// The HTTP transport seam and its reqwest-backed default
pub mod transport;

pub use authorization::AuthorizationParameters;
pub use errors::{OAuthError, Result, TransportError};
pub use grant::{Grant, GrantKind};
pub use options::OptionProvider;
pub use pkce::PkceMethod;
pub use provider::{GenericProvider, GenericResourceOwner, ProviderConfig};
pub use token::{AccessToken, Clock, FixedClock, SystemClock};
pub use transport::{HttpMethod, HttpTransport, ReqwestTransport, RequestSpec};
