// ABOUTME: Authorization grant types and token request parameter preparation
// ABOUTME: Validates required grant fields before any network call is made
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Authorization Grants
//!
//! An authorization grant is a credential representing the resource
//! owner's authorization, used by the client to obtain an access token
//! (RFC 6749 §1.3). The four standard grant types are modeled as one
//! [`Grant`] value with a [`GrantKind`] tag; the variant-specific fields
//! are populated by [`Grant::prepare_request_parameters`], which fails
//! fast when a required option is missing so no partial request is ever
//! issued.

use crate::constants::grant_types;
use crate::errors::{OAuthError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Variant-specific grant data, tagged by grant type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrantKind {
    /// Authorization code grant (RFC 6749 §1.3.1)
    AuthorizationCode {
        /// Authorization code received from the authorization endpoint
        code: Option<String>,
    },
    /// Client credentials grant (RFC 6749 §1.3.4)
    ClientCredentials,
    /// Resource owner password credentials grant (RFC 6749 §1.3.3)
    Password {
        /// Resource owner username
        username: Option<String>,
        /// Resource owner password
        password: Option<String>,
    },
    /// Refresh token grant (RFC 6749 §6)
    RefreshToken {
        /// Refresh token issued alongside a previous access token
        refresh_token: Option<String>,
    },
}

/// A typed request-parameter bundle for one token request.
///
/// Constructed per token request and discarded after use. The common
/// client fields travel with every variant; `code_verifier` is only set
/// when the preceding authorization request used PKCE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    code_verifier: Option<String>,
    kind: GrantKind,
}

impl Grant {
    /// Create an authorization code grant
    #[must_use]
    pub fn authorization_code(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
        code_verifier: Option<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            code_verifier,
            kind: GrantKind::AuthorizationCode { code: None },
        }
    }

    /// Create a client credentials grant
    #[must_use]
    pub fn client_credentials(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            code_verifier: None,
            kind: GrantKind::ClientCredentials,
        }
    }

    /// Create a resource owner password credentials grant
    #[must_use]
    pub fn password(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            code_verifier: None,
            kind: GrantKind::Password {
                username: None,
                password: None,
            },
        }
    }

    /// Create a refresh token grant
    #[must_use]
    pub fn refresh_token(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            code_verifier: None,
            kind: GrantKind::RefreshToken {
                refresh_token: None,
            },
        }
    }

    /// The fixed `grant_type` wire name of this grant
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self.kind {
            GrantKind::AuthorizationCode { .. } => grant_types::AUTHORIZATION_CODE,
            GrantKind::ClientCredentials => grant_types::CLIENT_CREDENTIALS,
            GrantKind::Password { .. } => grant_types::PASSWORD,
            GrantKind::RefreshToken { .. } => grant_types::REFRESH_TOKEN,
        }
    }

    /// OAuth client identifier carried by this grant
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// OAuth client secret carried by this grant
    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Redirect URI carried by this grant
    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// PKCE code verifier, when the authorization request used PKCE
    #[must_use]
    pub fn code_verifier(&self) -> Option<&str> {
        self.code_verifier.as_deref()
    }

    /// Variant-specific grant data
    #[must_use]
    pub const fn kind(&self) -> &GrantKind {
        &self.kind
    }

    /// Checks that all required parameters for this grant type are present
    /// in `options` and stores them on the grant.
    ///
    /// Runs strictly before any request is issued.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::MissingParameter`] naming the first required
    /// key absent from `options`.
    pub fn prepare_request_parameters(&mut self, options: &HashMap<String, String>) -> Result<()> {
        match &mut self.kind {
            GrantKind::AuthorizationCode { code } => {
                *code = Some(require(options, "code")?);
            }
            GrantKind::ClientCredentials => {}
            GrantKind::Password { username, password } => {
                *username = Some(require(options, "username")?);
                *password = Some(require(options, "password")?);
            }
            GrantKind::RefreshToken { refresh_token } => {
                *refresh_token = Some(require(options, "refresh_token")?);
            }
        }
        Ok(())
    }

    /// Ordered wire parameters for the token request body or query string.
    ///
    /// Common fields come first, then `grant_type`, then the prepared
    /// variant fields. Unset optional fields are omitted.
    #[must_use]
    pub fn request_parameters(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("client_id", self.client_id.clone()),
            ("client_secret", self.client_secret.clone()),
            ("redirect_uri", self.redirect_uri.clone()),
        ];
        if let Some(verifier) = &self.code_verifier {
            params.push(("code_verifier", verifier.clone()));
        }
        params.push(("grant_type", self.name().to_owned()));
        match &self.kind {
            GrantKind::AuthorizationCode { code } => {
                if let Some(code) = code {
                    params.push(("code", code.clone()));
                }
            }
            GrantKind::ClientCredentials => {}
            GrantKind::Password { username, password } => {
                if let Some(username) = username {
                    params.push(("username", username.clone()));
                }
                if let Some(password) = password {
                    params.push(("password", password.clone()));
                }
            }
            GrantKind::RefreshToken { refresh_token } => {
                if let Some(refresh_token) = refresh_token {
                    params.push(("refresh_token", refresh_token.clone()));
                }
            }
        }
        params
    }
}

impl fmt::Display for Grant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn require(options: &HashMap<String, String>, key: &str) -> Result<String> {
    options
        .get(key)
        .cloned()
        .ok_or_else(|| OAuthError::MissingParameter(key.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_parameter_names_the_key() {
        let mut grant = Grant::password("id", "secret", "https://example.com/cb");
        let options = HashMap::from([("username".to_owned(), "alice".to_owned())]);

        let err = grant.prepare_request_parameters(&options).unwrap_err();
        assert!(matches!(err, OAuthError::MissingParameter(key) if key == "password"));
    }

    #[test]
    fn unprepared_variant_fields_are_omitted_from_wire_parameters() {
        let grant = Grant::authorization_code("id", "secret", "https://example.com/cb", None);
        let params = grant.request_parameters();

        assert!(params.iter().all(|(key, _)| *key != "code"));
        assert_eq!(params.last().unwrap().0, "grant_type");
    }
}
