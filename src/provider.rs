// ABOUTME: Generic OAuth 2.0 provider orchestrating authorization and token flows
// ABOUTME: Builds authorization URLs, exchanges grants for tokens, fetches resource owners
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Generic Provider
//!
//! [`GenericProvider`] works against any standards-compliant OAuth 2.0
//! authorization server using Bearer token authentication. It owns its
//! [`ProviderConfig`] and [`OptionProvider`], delegates HTTP to an
//! injected [`HttpTransport`], and takes time from an injected
//! [`Clock`].
//!
//! A token exchange moves through grant preparation, request
//! construction, transport execution, response validation, and token
//! issuance; the first failure aborts the exchange and surfaces a typed
//! error. The stored PKCE verifier is the only state a failed exchange
//! leaves behind, so retrying with the same verifier stays valid.

use crate::authorization::{append_query, encode_pairs, AuthorizationParameters};
use crate::constants::{authorization as authorization_defaults, fields, pkce, time};
use crate::errors::{OAuthError, Result};
use crate::grant::Grant;
use crate::options::OptionProvider;
use crate::pkce::{code_challenge, random_code_verifier, PkceMethod};
use crate::token::{AccessToken, Clock, SystemClock};
use crate::transport::{HttpMethod, HttpTransport, ReqwestTransport};
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Configuration for a [`GenericProvider`].
///
/// Immutable after construction. The `Option` fields are overrides;
/// unset values fall back to protocol defaults at use time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// OAuth client ID issued by the provider
    pub client_id: String,
    /// OAuth client secret issued by the provider
    pub client_secret: String,
    /// Redirect URI registered with the provider
    pub redirect_uri: String,
    /// Authorization endpoint URL
    pub url_authorize: String,
    /// Token endpoint URL
    pub url_access_token: String,
    /// Resource-owner details endpoint URL
    pub url_resource_owner_details: String,
    /// HTTP method for token requests, POST when unset
    pub access_token_method: Option<HttpMethod>,
    /// Token response key naming the resource owner, unset for none
    pub access_token_resource_owner_id: Option<String>,
    /// Separator when joining scopes, `,` when unset
    pub scope_separator: Option<String>,
    /// Response field checked for provider errors, `error` when unset
    pub response_error: Option<String>,
    /// Response field holding the provider error code, unset for none
    pub response_code: Option<String>,
    /// Resource-owner details field holding the owner id, `id` when unset
    pub response_resource_owner_id: Option<String>,
    /// Default scopes requested during authorization
    pub scopes: Option<String>,
    /// PKCE challenge method (`S256` or `plain`), unset to disable PKCE
    pub pkce_method: Option<String>,
}

impl ProviderConfig {
    /// Configuration with the given endpoints and no overrides
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
        url_authorize: impl Into<String>,
        url_access_token: impl Into<String>,
        url_resource_owner_details: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            url_authorize: url_authorize.into(),
            url_access_token: url_access_token.into(),
            url_resource_owner_details: url_resource_owner_details.into(),
            access_token_method: None,
            access_token_resource_owner_id: None,
            scope_separator: None,
            response_error: None,
            response_code: None,
            response_resource_owner_id: None,
            scopes: None,
            pkce_method: None,
        }
    }
}

/// The resource owner behind an access token, as the provider reported it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericResourceOwner {
    response: Map<String, Value>,
    resource_owner_id_key: String,
}

impl GenericResourceOwner {
    /// Wrap a decoded resource-owner response
    #[must_use]
    pub const fn new(response: Map<String, Value>, resource_owner_id_key: String) -> Self {
        Self {
            response,
            resource_owner_id_key,
        }
    }

    /// The resource owner identifier under the configured key, numeric
    /// identifiers stringified
    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.response
            .get(&self.resource_owner_id_key)
            .and_then(string_value)
    }

    /// The full decoded response object
    #[must_use]
    pub const fn raw(&self) -> &Map<String, Value> {
        &self.response
    }
}

/// A generic OAuth 2.0 service provider client
pub struct GenericProvider {
    config: ProviderConfig,
    option_provider: OptionProvider,
    transport: Arc<dyn HttpTransport>,
    clock: Arc<dyn Clock>,
    state: Option<String>,
    pkce_code: Option<String>,
}

impl GenericProvider {
    /// Create a provider with the default transport, clock, and
    /// [`OptionProvider::PostAuth`]
    #[must_use]
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            option_provider: OptionProvider::default(),
            transport: Arc::new(ReqwestTransport::new()),
            clock: Arc::new(SystemClock),
            state: None,
            pkce_code: None,
        }
    }

    /// Replace the HTTP transport
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = transport;
        self
    }

    /// Replace the clock used for expiry computation
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the request option provider
    #[must_use]
    pub const fn with_option_provider(mut self, option_provider: OptionProvider) -> Self {
        self.option_provider = option_provider;
        self
    }

    /// The provider configuration
    #[must_use]
    pub const fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// OAuth client identifier
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.config.client_id
    }

    /// OAuth client secret
    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.config.client_secret
    }

    /// Registered redirect URI
    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        &self.config.redirect_uri
    }

    /// The `state` value of the most recent authorization request.
    ///
    /// The redirect handler compares this against the state echoed back
    /// by the authorization server.
    #[must_use]
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    /// The PKCE code verifier generated by the most recent authorization
    /// request.
    ///
    /// Pass this into the authorization-code grant for the matching
    /// token exchange.
    #[must_use]
    pub fn pkce_code(&self) -> Option<&str> {
        self.pkce_code.as_deref()
    }

    /// Override the stored PKCE code verifier.
    ///
    /// Useful when the authorization request happened in another process
    /// and the verifier was persisted elsewhere.
    pub fn set_pkce_code(&mut self, pkce_code: impl Into<String>) {
        self.pkce_code = Some(pkce_code.into());
    }

    /// Joins scopes with the configured separator (`,` by default)
    #[must_use]
    pub fn join_scopes(&self, scopes: &[&str]) -> String {
        let separator = self
            .config
            .scope_separator
            .as_deref()
            .unwrap_or(authorization_defaults::DEFAULT_SCOPE_SEPARATOR);
        scopes.join(separator)
    }

    /// Builds authorization request parameters.
    ///
    /// `state` defaults to a securely random 32-character hex string and
    /// is stored for later comparison; `scope` defaults to the configured
    /// scopes; `redirect_uri` defaults to the configured one. When a
    /// PKCE method is configured, a fresh code verifier is generated,
    /// stored on the provider, and turned into the challenge fields.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::UnknownPkceMethod`] when the configured
    /// method is neither `S256` nor `plain`.
    pub fn authorization_parameters(
        &mut self,
        state: Option<&str>,
        scope: Option<&str>,
        redirect_uri: Option<&str>,
    ) -> Result<AuthorizationParameters> {
        let state = state.map_or_else(random_state, str::to_owned);
        let scope = scope
            .map(str::to_owned)
            .or_else(|| self.config.scopes.clone());
        let redirect_uri = redirect_uri.unwrap_or(&self.config.redirect_uri);

        let mut params = AuthorizationParameters::new(
            authorization_defaults::RESPONSE_TYPE_CODE,
            authorization_defaults::APPROVAL_PROMPT_AUTO,
            self.config.client_id.clone(),
            redirect_uri,
            state,
            scope,
        );
        // Kept for the redirect handler to compare against the callback.
        self.state = Some(params.state.clone());

        if let Some(configured) = &self.config.pkce_method {
            let method: PkceMethod = configured.parse()?;
            let verifier = random_code_verifier();
            params.code_challenge = Some(code_challenge(method, &verifier));
            params.code_challenge_method = Some(method.as_str().to_owned());
            self.pkce_code = Some(verifier);
        }

        Ok(params)
    }

    /// Builds the full authorization URL for the given parameters,
    /// preserving any query component already on the base URL.
    #[must_use]
    pub fn authorization_url(&self, params: &AuthorizationParameters) -> String {
        append_query(&self.config.url_authorize, &params.authorization_query())
    }

    /// Requests an access token using the given grant and options.
    ///
    /// The grant is prepared (fail-fast validation of required options),
    /// the token request is built by the option provider and executed by
    /// the transport, and the response is validated and parsed into an
    /// [`AccessToken`]. No retry happens at this layer.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::MissingParameter`] for incomplete options,
    /// [`OAuthError::Transport`] for HTTP failures,
    /// [`OAuthError::Provider`] when the server reports an error, and
    /// [`OAuthError::MalformedResponse`] / [`OAuthError::MissingAccessToken`] /
    /// [`OAuthError::InvalidExpiry`] for non-conforming responses.
    pub async fn request_access_token(
        &self,
        mut grant: Grant,
        options: &HashMap<String, String>,
    ) -> Result<AccessToken> {
        grant.prepare_request_parameters(options)?;

        let method = self.access_token_method();
        let url = self.access_token_url(&grant);
        debug!(
            "requesting access token via {} grant from {}",
            grant.name(),
            url
        );

        let request = self
            .option_provider
            .build_request(method, url, Some(&grant), None);
        let body = self.transport.execute(request).await?;

        self.check_response(&body)?;
        let token = self.create_access_token(&body)?;

        info!(
            "successfully obtained access token via {} grant",
            grant.name()
        );
        Ok(token)
    }

    /// Fetches and decodes the resource owner behind an access token.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Transport`] for HTTP failures and
    /// [`OAuthError::MalformedResponse`] when the response is not a JSON
    /// object.
    pub async fn resource_owner(&self, token: &AccessToken) -> Result<GenericResourceOwner> {
        let body = self
            .authenticated_request(
                HttpMethod::Get,
                self.config.url_resource_owner_details.clone(),
                token,
            )
            .await?;

        let parsed: Value =
            serde_json::from_str(&body).map_err(|_| OAuthError::MalformedResponse)?;
        let Value::Object(response) = parsed else {
            return Err(OAuthError::MalformedResponse);
        };

        info!("successfully fetched resource owner details");
        Ok(GenericResourceOwner::new(
            response,
            self.response_resource_owner_id_field().to_owned(),
        ))
    }

    /// Executes an arbitrary Bearer-authenticated request through the
    /// option provider and returns the raw response body.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Transport`] for HTTP failures.
    pub async fn authenticated_request(
        &self,
        method: HttpMethod,
        url: impl Into<String>,
        token: &AccessToken,
    ) -> Result<String> {
        let request = self
            .option_provider
            .build_request(method, url, None, Some(token));
        Ok(self.transport.execute(request).await?)
    }

    fn access_token_method(&self) -> HttpMethod {
        self.config.access_token_method.unwrap_or(HttpMethod::Post)
    }

    /// Token request URL; a GET token method folds the grant's wire
    /// parameters into the query string.
    fn access_token_url(&self, grant: &Grant) -> String {
        let url = &self.config.url_access_token;
        if self.access_token_method() == HttpMethod::Get {
            append_query(url, &encode_pairs(grant.request_parameters()))
        } else {
            url.clone()
        }
    }

    fn response_error_field(&self) -> &str {
        self.config
            .response_error
            .as_deref()
            .unwrap_or(fields::DEFAULT_RESPONSE_ERROR)
    }

    fn response_resource_owner_id_field(&self) -> &str {
        self.config
            .response_resource_owner_id
            .as_deref()
            .unwrap_or(fields::DEFAULT_RESOURCE_OWNER_ID)
    }

    /// Checks a token response body for a provider-reported error.
    fn check_response(&self, body: &str) -> Result<()> {
        // A body that does not decode to a JSON object is dealt with by
        // token parsing; only an explicit error field is checked here.
        let Ok(Value::Object(data)) = serde_json::from_str::<Value>(body) else {
            return Ok(());
        };
        let Some(value) = data.get(self.response_error_field()) else {
            return Ok(());
        };
        if is_empty_value(value) {
            return Ok(());
        }

        let message = match value {
            Value::String(message) => message.clone(),
            other => other.to_string(),
        };
        let code = self
            .config
            .response_code
            .as_deref()
            .and_then(|field| data.get(field))
            .map_or(0, coerce_code);

        warn!("authorization server reported error: {message}");
        Err(OAuthError::Provider { message, code })
    }

    /// Parses a validated token response body into an [`AccessToken`].
    fn create_access_token(&self, body: &str) -> Result<AccessToken> {
        let parsed: Value = serde_json::from_str(body).map_err(|_| OAuthError::MalformedResponse)?;
        let Value::Object(response) = parsed else {
            return Err(OAuthError::MalformedResponse);
        };

        let access_token = response
            .get(fields::ACCESS_TOKEN)
            .and_then(string_value)
            .filter(|token| !token.is_empty())
            .ok_or(OAuthError::MissingAccessToken)?;

        let refresh_token = response
            .get(fields::REFRESH_TOKEN)
            .and_then(string_value)
            .filter(|token| !token.is_empty());

        let expires = self.resolve_expiry(&response)?;

        let resource_owner_id = self
            .config
            .access_token_resource_owner_id
            .as_deref()
            .and_then(|key| response.get(key))
            .and_then(string_value);

        Ok(AccessToken::new(
            access_token,
            refresh_token,
            expires,
            resource_owner_id,
        ))
    }

    /// Resolves the token expiry.
    ///
    /// `expires_in` (RFC 6749 §5.1) takes priority and must be numeric;
    /// a zero lifetime leaves the expiry unset. The non-standard
    /// `expires` field holds either an absolute timestamp or a relative
    /// offset; values at or below the 2012-10-01 inception threshold are
    /// offsets and get `now` added.
    fn resolve_expiry(&self, response: &Map<String, Value>) -> Result<Option<DateTime<Utc>>> {
        let now = self.clock.now();

        if let Some(value) = response.get(fields::EXPIRES_IN) {
            let seconds = numeric_value(value).ok_or(OAuthError::InvalidExpiry)?;
            if seconds == 0 {
                return Ok(None);
            }
            return add_seconds(now, seconds).map(Some);
        }

        if let Some(value) = response
            .get(fields::EXPIRES)
            .filter(|value| !is_empty_value(value))
        {
            if let Some(seconds) = numeric_value(value).filter(|&seconds| seconds != 0) {
                if seconds > time::OAUTH2_INCEPTION_TIMESTAMP {
                    return DateTime::from_timestamp(seconds, 0)
                        .map(Some)
                        .ok_or(OAuthError::InvalidExpiry);
                }
                return add_seconds(now, seconds).map(Some);
            }
        }

        Ok(None)
    }
}

fn add_seconds(now: DateTime<Utc>, seconds: i64) -> Result<DateTime<Utc>> {
    let duration = Duration::try_seconds(seconds).ok_or(OAuthError::InvalidExpiry)?;
    now.checked_add_signed(duration)
        .ok_or(OAuthError::InvalidExpiry)
}

/// A securely random 32-character hex state string
fn random_state() -> String {
    let mut bytes = [0u8; pkce::STATE_LENGTH / 2];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// String view of a scalar JSON value, numeric values stringified
fn string_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Integer value of a number or numeric string, fractions truncated
fn numeric_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s
            .parse::<i64>()
            .ok()
            .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64)),
        _ => None,
    }
}

/// Error-code coercion: numbers and numeric strings, 0 otherwise
fn coerce_code(value: &Value) -> i64 {
    numeric_value(value).unwrap_or(0)
}

/// Emptiness in the PHP `empty()` sense: absent values, `null`, `false`,
/// zero, the empty string, `"0"`, and empty collections do not count as
/// provider-reported errors.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
