//! # Token Issuing
//!
//! Signed, expiring identity tokens (JWT, HMAC).
//!
//! A [`TokenIssuer`] owns the signing key and algorithm; neither is ever
//! written into a token. Callers choose the claim type: anything that
//! serializes to a JSON object works, and [`TokenIssuer::verify`] hands the
//! same claims back. The names `iat`, `exp`, and `jti` are reserved for the
//! envelope.

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use lib_utils::now_unix;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Claims carried by account tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountClaims {
    pub account_id: Uuid,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,
    #[error("Token is invalid")]
    Invalid,
    #[error("Failed to encode token: {0}")]
    Encode(String),
}

/// Caller claims plus the fields every token carries.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<C> {
    #[serde(flatten)]
    claims: C,
    /// Issued at (Unix seconds)
    iat: i64,
    /// Expiration (Unix seconds)
    exp: i64,
    /// Random nonce so tokens issued in the same second still differ
    jti: String,
}

/// Issues and verifies tokens with a process-wide key.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Create an HS256 issuer from a shared secret.
    pub fn new(secret: &str) -> Self {
        Self::with_algorithm(secret, Algorithm::HS256)
    }

    /// Create an issuer for one of the HMAC algorithms (HS256/HS384/HS512).
    pub fn with_algorithm(secret: &str, algorithm: Algorithm) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
        }
    }

    /// Sign `claims` into a token that expires `ttl` from now.
    ///
    /// Expiration is kept at second granularity.
    pub fn issue<C: Serialize>(&self, claims: &C, ttl: Duration) -> Result<String, TokenError> {
        let now = now_unix();
        let envelope = Envelope {
            claims,
            iat: now,
            exp: now + ttl.num_seconds(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(self.algorithm), &envelope, &self.encoding_key)
            .map_err(|e| TokenError::Encode(e.to_string()))
    }

    /// Check the signature and expiry of `token` and return its claims.
    ///
    /// # Errors
    ///
    /// * [`TokenError::Invalid`] - malformed token, wrong signature, wrong
    ///   algorithm, or claims that do not match `C`
    /// * [`TokenError::Expired`] - signature is good but `now >= exp`
    pub fn verify<C: DeserializeOwned>(&self, token: &str) -> Result<C, TokenError> {
        // Expiry is checked below without leeway.
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp"]);

        let data = decode::<Envelope<C>>(token, &self.decoding_key, &validation).map_err(|e| {
            debug!("[TOKEN] Rejected token: {}", e);
            TokenError::Invalid
        })?;

        if now_unix() >= data.claims.exp {
            debug!("[TOKEN] Token expired at {}", data.claims.exp);
            return Err(TokenError::Expired);
        }

        Ok(data.claims.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
    use std::collections::BTreeMap;

    const SECRET: &str = "test-secret-key-must-be-at-least-32-chars-long!";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(SECRET)
    }

    fn flip_char(c: char) -> char {
        if c == 'A' { 'B' } else { 'A' }
    }

    #[test]
    fn test_issue_verify_round_trip() {
        let claims = AccountClaims { account_id: Uuid::new_v4() };
        let token = issuer().issue(&claims, Duration::seconds(60)).unwrap();

        let decoded: AccountClaims = issuer().verify(&token).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_arbitrary_claim_map_round_trip() {
        let mut claims = BTreeMap::new();
        claims.insert("account_id".to_string(), "42".to_string());
        claims.insert("scope".to_string(), "read".to_string());

        let token = issuer().issue(&claims, Duration::seconds(60)).unwrap();
        let decoded: BTreeMap<String, String> = issuer().verify(&token).unwrap();

        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_zero_ttl_is_expired() {
        let claims = AccountClaims { account_id: Uuid::new_v4() };
        let token = issuer().issue(&claims, Duration::seconds(0)).unwrap();

        assert_eq!(issuer().verify::<AccountClaims>(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_past_expiry_is_expired() {
        let claims = AccountClaims { account_id: Uuid::new_v4() };
        let token = issuer().issue(&claims, Duration::seconds(-3600)).unwrap();

        assert_eq!(issuer().verify::<AccountClaims>(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_same_claims_give_distinct_tokens() {
        let claims = AccountClaims { account_id: Uuid::new_v4() };
        let first = issuer().issue(&claims, Duration::seconds(60)).unwrap();
        let second = issuer().issue(&claims, Duration::seconds(60)).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let claims = AccountClaims { account_id: Uuid::new_v4() };
        let token = issuer().issue(&claims, Duration::seconds(60)).unwrap();

        let other = TokenIssuer::new("another-secret-key-that-is-also-32-chars!!");
        assert_eq!(other.verify::<AccountClaims>(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_wrong_secret_on_expired_token_is_invalid() {
        let claims = AccountClaims { account_id: Uuid::new_v4() };
        let token = issuer().issue(&claims, Duration::seconds(-60)).unwrap();

        let other = TokenIssuer::new("another-secret-key-that-is-also-32-chars!!");
        assert_eq!(other.verify::<AccountClaims>(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_flipped_characters_are_invalid() {
        let claims = AccountClaims { account_id: Uuid::new_v4() };
        let token = issuer().issue(&claims, Duration::seconds(60)).unwrap();

        let mut offset = 0;
        for segment in token.split('.') {
            let target = offset + segment.len() / 2;
            let tampered: String = token
                .chars()
                .enumerate()
                .map(|(i, c)| if i == target { flip_char(c) } else { c })
                .collect();

            assert_eq!(
                issuer().verify::<AccountClaims>(&tampered),
                Err(TokenError::Invalid),
                "tampered at {target}"
            );
            offset += segment.len() + 1;
        }
    }

    #[test]
    fn test_rewritten_payload_is_invalid() {
        let claims = AccountClaims { account_id: Uuid::new_v4() };
        let token = issuer().issue(&claims, Duration::seconds(60)).unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let payload = URL_SAFE_NO_PAD.decode(parts[1]).unwrap();
        let mut json: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        json["account_id"] = serde_json::Value::String(Uuid::new_v4().to_string());
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&json).unwrap());

        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);
        assert_eq!(issuer().verify::<AccountClaims>(&forged), Err(TokenError::Invalid));
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert_eq!(issuer().verify::<AccountClaims>(""), Err(TokenError::Invalid));
        assert_eq!(issuer().verify::<AccountClaims>("a.b.c"), Err(TokenError::Invalid));
    }

    #[test]
    fn test_claims_of_wrong_shape_are_invalid() {
        let mut claims = BTreeMap::new();
        claims.insert("scope".to_string(), "read".to_string());
        let token = issuer().issue(&claims, Duration::seconds(60)).unwrap();

        assert_eq!(issuer().verify::<AccountClaims>(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let rendered = format!("{:?}", issuer());
        assert!(!rendered.contains(SECRET));
    }
}
