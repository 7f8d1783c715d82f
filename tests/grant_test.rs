// ABOUTME: Unit tests for grant parameter preparation and wire encoding
// ABOUTME: Validates fail-fast required-field checks across all four grant types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use oauth2_generic_client::{Grant, GrantKind, OAuthError};
use std::collections::HashMap;

fn options(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

// =============================================================================
// Grant Name Tests
// =============================================================================

#[test]
fn test_grant_names_match_wire_grant_types() {
    let cases = [
        (
            Grant::authorization_code("id", "secret", "https://app/cb", None),
            "authorization_code",
        ),
        (
            Grant::client_credentials("id", "secret", "https://app/cb"),
            "client_credentials",
        ),
        (Grant::password("id", "secret", "https://app/cb"), "password"),
        (
            Grant::refresh_token("id", "secret", "https://app/cb"),
            "refresh_token",
        ),
    ];

    for (grant, expected) in cases {
        assert_eq!(grant.name(), expected);
        assert_eq!(grant.to_string(), expected);
    }
}

// =============================================================================
// Required Parameter Tests
// =============================================================================

#[test]
fn test_authorization_code_requires_code() {
    let mut grant = Grant::authorization_code("id", "secret", "https://app/cb", None);

    let err = grant.prepare_request_parameters(&options(&[])).unwrap_err();
    assert!(matches!(err, OAuthError::MissingParameter(key) if key == "code"));
}

#[test]
fn test_authorization_code_stores_provided_code() {
    let mut grant = Grant::authorization_code("id", "secret", "https://app/cb", None);

    grant
        .prepare_request_parameters(&options(&[("code", "auth-code-123")]))
        .unwrap();

    assert_eq!(
        grant.kind(),
        &GrantKind::AuthorizationCode {
            code: Some("auth-code-123".to_owned())
        }
    );
}

#[test]
fn test_client_credentials_requires_nothing() {
    let mut grant = Grant::client_credentials("id", "secret", "https://app/cb");
    assert!(grant.prepare_request_parameters(&options(&[])).is_ok());
}

#[test]
fn test_password_requires_username_and_password() {
    let mut grant = Grant::password("id", "secret", "https://app/cb");
    let err = grant
        .prepare_request_parameters(&options(&[("password", "hunter2")]))
        .unwrap_err();
    assert!(matches!(err, OAuthError::MissingParameter(key) if key == "username"));

    let mut grant = Grant::password("id", "secret", "https://app/cb");
    let err = grant
        .prepare_request_parameters(&options(&[("username", "alice")]))
        .unwrap_err();
    assert!(matches!(err, OAuthError::MissingParameter(key) if key == "password"));

    let mut grant = Grant::password("id", "secret", "https://app/cb");
    grant
        .prepare_request_parameters(&options(&[("username", "alice"), ("password", "hunter2")]))
        .unwrap();
    assert_eq!(
        grant.kind(),
        &GrantKind::Password {
            username: Some("alice".to_owned()),
            password: Some("hunter2".to_owned()),
        }
    );
}

#[test]
fn test_refresh_token_requires_refresh_token() {
    let mut grant = Grant::refresh_token("id", "secret", "https://app/cb");

    let err = grant.prepare_request_parameters(&options(&[])).unwrap_err();
    assert!(matches!(err, OAuthError::MissingParameter(key) if key == "refresh_token"));
}

// =============================================================================
// Wire Parameter Tests
// =============================================================================

#[test]
fn test_request_parameters_order_and_content() {
    let mut grant = Grant::authorization_code("my-id", "my-secret", "https://app/cb", None);
    grant
        .prepare_request_parameters(&options(&[("code", "abc")]))
        .unwrap();

    let params = grant.request_parameters();
    let keys: Vec<&str> = params.iter().map(|(k, _)| *k).collect();

    assert_eq!(
        keys,
        vec![
            "client_id",
            "client_secret",
            "redirect_uri",
            "grant_type",
            "code"
        ]
    );
    assert_eq!(params[0].1, "my-id");
    assert_eq!(params[3].1, "authorization_code");
    assert_eq!(params[4].1, "abc");
}

#[test]
fn test_code_verifier_is_emitted_only_when_set() {
    let without = Grant::authorization_code("id", "secret", "https://app/cb", None);
    assert!(without
        .request_parameters()
        .iter()
        .all(|(k, _)| *k != "code_verifier"));

    let with = Grant::authorization_code(
        "id",
        "secret",
        "https://app/cb",
        Some("verifier-value".to_owned()),
    );
    let params = with.request_parameters();
    let verifier = params.iter().find(|(k, _)| *k == "code_verifier").unwrap();
    assert_eq!(verifier.1, "verifier-value");

    // Verifier travels with the client fields, ahead of grant_type.
    let keys: Vec<&str> = params.iter().map(|(k, _)| *k).collect();
    assert_eq!(
        keys,
        vec![
            "client_id",
            "client_secret",
            "redirect_uri",
            "code_verifier",
            "grant_type"
        ]
    );
}

#[test]
fn test_password_wire_parameters_follow_grant_type() {
    let mut grant = Grant::password("id", "secret", "https://app/cb");
    grant
        .prepare_request_parameters(&options(&[("username", "alice"), ("password", "hunter2")]))
        .unwrap();

    let keys: Vec<&str> = grant.request_parameters().iter().map(|(k, _)| *k).collect();
    assert_eq!(
        keys,
        vec![
            "client_id",
            "client_secret",
            "redirect_uri",
            "grant_type",
            "username",
            "password"
        ]
    );
}
