// ABOUTME: OAuth-related constants and configuration defaults
// ABOUTME: Includes grant type names, PKCE parameters, and token response field names
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! OAuth protocol constants

/// Grant type identifiers sent as the `grant_type` wire field (RFC 6749 §1.3)
pub mod grant_types {
    /// Authorization code grant
    pub const AUTHORIZATION_CODE: &str = "authorization_code";
    /// Client credentials grant
    pub const CLIENT_CREDENTIALS: &str = "client_credentials";
    /// Resource owner password credentials grant
    pub const PASSWORD: &str = "password";
    /// Refresh token grant
    pub const REFRESH_TOKEN: &str = "refresh_token";
}

/// PKCE configuration (RFC 7636)
pub mod pkce {
    /// Code challenge hashed with SHA-256 (recommended)
    pub const METHOD_S256: &str = "S256";
    /// Code challenge sent as plain text, only for providers that support nothing else
    pub const METHOD_PLAIN: &str = "plain";
    /// Length of the generated code verifier, within the 43-128 range RFC 7636 allows
    pub const CODE_VERIFIER_LENGTH: usize = 64;
    /// Length of the generated hex `state` parameter
    pub const STATE_LENGTH: usize = 32;
}

/// Field names used in authorization and token exchanges
pub mod fields {
    /// Token response field holding the issued access token
    pub const ACCESS_TOKEN: &str = "access_token";
    /// Token response field holding the optional refresh token
    pub const REFRESH_TOKEN: &str = "refresh_token";
    /// Token response field holding the token lifetime in seconds (RFC 6749 §5.1)
    pub const EXPIRES_IN: &str = "expires_in";
    /// Non-standard token response field some providers use instead of `expires_in`
    pub const EXPIRES: &str = "expires";
    /// Default response field checked for a provider-reported error
    pub const DEFAULT_RESPONSE_ERROR: &str = "error";
    /// Default resource-owner details field holding the owner identifier
    pub const DEFAULT_RESOURCE_OWNER_ID: &str = "id";
}

/// Authorization request defaults
pub mod authorization {
    /// `response_type` requested in the authorization code flow
    pub const RESPONSE_TYPE_CODE: &str = "code";
    /// Default `approval_prompt` value
    pub const APPROVAL_PROMPT_AUTO: &str = "auto";
    /// Default separator when joining multiple scopes into one string
    pub const DEFAULT_SCOPE_SEPARATOR: &str = ",";
}

/// Time-related constants
pub mod time {
    /// 2012-10-01, predating RFC 6749. An `expires` value at or below this
    /// cannot be a legitimate absolute expiry and is treated as a
    /// seconds-until-expiry offset instead.
    pub const OAUTH2_INCEPTION_TIMESTAMP: i64 = 1_349_067_600;
}
