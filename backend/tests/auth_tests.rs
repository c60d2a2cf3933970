//! Authentication tests
//!
//! Tests for bearer token validation:
//! - Tokens signed with the shared secret round-trip their claims
//! - Expired tokens and wrong-secret tokens are rejected
//! - Claim parsing tolerates a missing display name

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::validation::validate_email;

/// Claims the identity provider puts in an access token
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    #[serde(default)]
    name: Option<String>,
    exp: i64,
    iat: i64,
}

const SECRET: &str = "test-signing-secret";

fn make_token(claims: &Claims, secret: &str) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn decode_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

fn claims_for(user_id: Uuid, email: &str, ttl_secs: i64) -> Claims {
    let now = Utc::now().timestamp();
    Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        name: Some("Workshop Owner".to_string()),
        exp: now + ttl_secs,
        iat: now,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// A freshly signed token decodes to the same identity
    #[test]
    fn test_token_round_trip() {
        let user_id = Uuid::new_v4();
        let claims = claims_for(user_id, "owner@example.com", 3600);
        let token = make_token(&claims, SECRET);

        let decoded = decode_token(&token, SECRET).unwrap();

        assert_eq!(decoded.sub, user_id.to_string());
        assert_eq!(decoded.email, "owner@example.com");
        assert_eq!(Uuid::parse_str(&decoded.sub).unwrap(), user_id);
    }

    /// An expired token is rejected
    #[test]
    fn test_expired_token_rejected() {
        let claims = claims_for(Uuid::new_v4(), "owner@example.com", -3600);
        let token = make_token(&claims, SECRET);

        assert!(decode_token(&token, SECRET).is_err());
    }

    /// A token signed with a different secret is rejected
    #[test]
    fn test_wrong_secret_rejected() {
        let claims = claims_for(Uuid::new_v4(), "owner@example.com", 3600);
        let token = make_token(&claims, "some-other-secret");

        assert!(decode_token(&token, SECRET).is_err());
    }

    /// Garbage is not a token
    #[test]
    fn test_malformed_token_rejected() {
        assert!(decode_token("not.a.token", SECRET).is_err());
        assert!(decode_token("", SECRET).is_err());
    }

    /// The display name claim is optional
    #[test]
    fn test_missing_name_claim_tolerated() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: "owner@example.com".to_string(),
            name: None,
            exp: now + 3600,
            iat: now,
        };
        let token = make_token(&claims, SECRET);

        let decoded = decode_token(&token, SECRET).unwrap();

        assert!(decoded.name.is_none());
    }

    /// A non-UUID subject must not map to a user
    #[test]
    fn test_non_uuid_subject_detected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "external|12345".to_string(),
            email: "owner@example.com".to_string(),
            name: None,
            exp: now + 3600,
            iat: now,
        };
        let token = make_token(&claims, SECRET);

        let decoded = decode_token(&token, SECRET).unwrap();

        assert!(Uuid::parse_str(&decoded.sub).is_err());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

/// Generate valid email addresses
fn email_strategy() -> impl Strategy<Value = String> {
    "[a-z]{5,10}@[a-z]{3,8}\\.(com|org|net)"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Any unexpired token round-trips its subject and email
    #[test]
    fn prop_token_round_trip(email in email_strategy(), ttl in 60i64..86_400) {
        let user_id = Uuid::new_v4();
        let claims = claims_for(user_id, &email, ttl);
        let token = make_token(&claims, SECRET);

        let decoded = decode_token(&token, SECRET).unwrap();

        prop_assert_eq!(decoded.sub, user_id.to_string());
        prop_assert_eq!(decoded.email, email);
    }

    /// Generated emails pass the same validation the sync endpoint applies
    #[test]
    fn prop_generated_emails_valid(email in email_strategy()) {
        prop_assert!(validate_email(&email).is_ok());
    }
}
