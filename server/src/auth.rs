//! Authentication Primitives
//!
//! Passwords are salted iterated SHA-256 in a `sha256$iter$salt$hash`
//! format. Bearer tokens are opaque 32-byte values handed to the client
//! in hex; only their SHA-256 lands in the database. Access tokens live
//! 24 hours, refresh tokens 30 days, and refreshing rotates the refresh
//! token.

use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::domain::DomainResult;
use crate::repository::{TokenKind, TokenRepository};

pub const ACCESS_TOKEN_HOURS: i64 = 24;
pub const REFRESH_TOKEN_DAYS: i64 = 30;
pub const OTP_MINUTES: i64 = 10;
pub const RESET_TOKEN_HOURS: i64 = 72;

const HASH_ITERATIONS: u32 = 10_000;

/// The body returned by token/ and token/refresh/
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

pub fn hash_password(password: &str) -> String {
    let salt: [u8; 16] = rand::thread_rng().gen();
    let salt_hex = hex::encode(salt);
    let digest = iterate_sha256(password, &salt_hex, HASH_ITERATIONS);
    format!("sha256${}${}${}", HASH_ITERATIONS, salt_hex, digest)
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (algo, iterations, salt, digest) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(i), Some(s), Some(d)) => (a, i, s, d),
        _ => return false,
    };
    if algo != "sha256" {
        return false;
    }
    let iterations: u32 = match iterations.parse() {
        Ok(n) => n,
        Err(_) => return false,
    };
    iterate_sha256(password, salt, iterations) == digest
}

fn iterate_sha256(password: &str, salt: &str, iterations: u32) -> String {
    let mut hash = Sha256::digest(format!("{salt}{password}").as_bytes()).to_vec();
    for _ in 1..iterations {
        hash = Sha256::digest(&hash).to_vec();
    }
    hex::encode(hash)
}

/// Fresh opaque token as sent to the client
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(bytes)
}

/// Stored form of a token
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Six-digit registration code
pub fn generate_otp() -> String {
    format!("{:06}", rand::thread_rng().gen_range(0..1_000_000))
}

pub fn otp_expiry() -> DateTime<Utc> {
    Utc::now() + Duration::minutes(OTP_MINUTES)
}

/// Password-reset links carry the user id base64-encoded next to the token
pub fn encode_uid(user_id: u32) -> String {
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(user_id.to_string())
}

pub fn decode_uid(encoded: &str) -> Option<u32> {
    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(encoded)
        .ok()?;
    String::from_utf8(bytes).ok()?.parse().ok()
}

/// Mint and store an access/refresh pair for a user
pub async fn issue_token_pair(tokens: &TokenRepository, user_id: u32) -> DomainResult<TokenPair> {
    let access = generate_token();
    let refresh = generate_token();
    tokens
        .insert(
            user_id,
            &hash_token(&access),
            TokenKind::Access,
            Utc::now() + Duration::hours(ACCESS_TOKEN_HOURS),
        )
        .await?;
    tokens
        .insert(
            user_id,
            &hash_token(&refresh),
            TokenKind::Refresh,
            Utc::now() + Duration::days(REFRESH_TOKEN_DAYS),
        )
        .await?;
    Ok(TokenPair { access, refresh })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_roundtrip() {
        let stored = hash_password("Secret123");
        assert!(stored.starts_with("sha256$"));
        assert!(verify_password("Secret123", &stored));
        assert!(!verify_password("Secret124", &stored));
    }

    #[test]
    fn test_distinct_salts() {
        assert_ne!(hash_password("Secret123"), hash_password("Secret123"));
    }

    #[test]
    fn test_verify_rejects_malformed() {
        assert!(!verify_password("x", "nonsense"));
        assert!(!verify_password("x", "md5$1$ab$cd"));
        assert!(!verify_password("x", "sha256$abc$salt$digest"));
    }

    #[test]
    fn test_token_shape() {
        let token = generate_token();
        assert_eq!(token.len(), 64);
        assert_ne!(token, generate_token());
        assert_eq!(hash_token(&token).len(), 64);
    }

    #[test]
    fn test_otp_shape() {
        let otp = generate_otp();
        assert_eq!(otp.len(), 6);
        assert!(otp.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_uid_roundtrip() {
        assert_eq!(decode_uid(&encode_uid(42)), Some(42));
        assert_eq!(decode_uid("@@@"), None);
    }
}
