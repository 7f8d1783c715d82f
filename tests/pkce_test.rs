// ABOUTME: Unit tests for PKCE verifier and challenge generation
// ABOUTME: Pins the S256 transformation to the RFC 7636 appendix B vector
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use oauth2_generic_client::pkce::{code_challenge, random_code_verifier};
use oauth2_generic_client::{OAuthError, PkceMethod};

// =============================================================================
// Code Verifier Tests
// =============================================================================

#[test]
fn test_verifier_length_and_charset() {
    let verifier = random_code_verifier();

    assert_eq!(verifier.len(), 64);
    for c in verifier.chars() {
        assert!(
            c.is_ascii_alphanumeric() || c == '-' || c == '_',
            "invalid character in code verifier: {c}"
        );
    }
}

#[test]
fn test_verifiers_are_unique() {
    let verifiers: Vec<String> = (0..10).map(|_| random_code_verifier()).collect();

    for i in 0..verifiers.len() {
        for j in (i + 1)..verifiers.len() {
            assert_ne!(verifiers[i], verifiers[j]);
        }
    }
}

// =============================================================================
// Code Challenge Tests
// =============================================================================

#[test]
fn test_s256_challenge_matches_rfc_7636_vector() {
    // Appendix B of RFC 7636
    let verifier = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
    let challenge = code_challenge(PkceMethod::S256, verifier);

    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
}

#[test]
fn test_plain_challenge_is_the_verifier() {
    let verifier = random_code_verifier();
    assert_eq!(code_challenge(PkceMethod::Plain, &verifier), verifier);
}

#[test]
fn test_challenge_is_base64url_of_32_hash_bytes() {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

    let challenge = code_challenge(PkceMethod::S256, &random_code_verifier());
    let decoded = URL_SAFE_NO_PAD.decode(&challenge).unwrap();

    assert_eq!(decoded.len(), 32);
}

// =============================================================================
// Method Parsing Tests
// =============================================================================

#[test]
fn test_method_parsing_and_wire_names() {
    assert_eq!("S256".parse::<PkceMethod>().unwrap(), PkceMethod::S256);
    assert_eq!("plain".parse::<PkceMethod>().unwrap(), PkceMethod::Plain);
    assert_eq!(PkceMethod::S256.as_str(), "S256");
    assert_eq!(PkceMethod::Plain.as_str(), "plain");
}

#[test]
fn test_unknown_method_is_rejected_with_its_name() {
    let err = "s256".parse::<PkceMethod>().unwrap_err();
    assert!(matches!(err, OAuthError::UnknownPkceMethod(m) if m == "s256"));
}
