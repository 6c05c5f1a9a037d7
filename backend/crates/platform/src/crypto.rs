//! Token and ID Generation
//!
//! All randomness comes from the OS CSPRNG.

use chrono::Utc;
use rand::{Rng, RngCore, rngs::OsRng};

const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of each half of a CSRF token
pub const TOKEN_FRAGMENT_LEN: usize = 13;

/// Length of the random suffix of a secure ID
pub const SECURE_ID_SUFFIX_LEN: usize = 11;

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Random lowercase base-36 string of exactly `len` characters
pub fn random_base36(len: usize) -> String {
    (0..len)
        .map(|_| BASE36_ALPHABET[OsRng.gen_range(0..BASE36_ALPHABET.len())] as char)
        .collect()
}

/// Lowercase base-36 rendering of `n`
pub fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36_ALPHABET[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

/// CSRF token: two random base-36 fragments
pub fn generate_token() -> String {
    let mut token = random_base36(TOKEN_FRAGMENT_LEN);
    token.push_str(&random_base36(TOKEN_FRAGMENT_LEN));
    token
}

/// Roughly time-ordered ID: base-36 millisecond timestamp followed by a
/// random base-36 suffix
pub fn generate_secure_id() -> String {
    let now_ms = Utc::now().timestamp_millis().max(0) as u64;
    let mut id = to_base36(now_ms);
    id.push_str(&random_base36(SECURE_ID_SUFFIX_LEN));
    id
}

/// Constant-time comparison to prevent timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_base36(s: &str) -> bool {
        s.bytes().all(|b| BASE36_ALPHABET.contains(&b))
    }

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        assert!(bytes.iter().any(|&b| b != 0));
        assert!(random_bytes(0).is_empty());
    }

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_295), "zz");
        assert_eq!(to_base36(u64::MAX), "3w5e11264sgsf");
    }

    #[test]
    fn test_generate_token_shape() {
        let token = generate_token();
        assert_eq!(token.len(), TOKEN_FRAGMENT_LEN * 2);
        assert!(is_base36(&token));
    }

    #[test]
    fn test_tokens_differ() {
        assert_ne!(generate_token(), generate_token());
    }

    #[test]
    fn test_secure_id_starts_with_timestamp() {
        let before = to_base36(Utc::now().timestamp_millis() as u64);
        let id = generate_secure_id();
        assert!(is_base36(&id));
        assert_eq!(id.len(), before.len() + SECURE_ID_SUFFIX_LEN);
        assert!(id[..before.len()] >= before[..]);
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abcd", b"abcd"));
        assert!(!constant_time_eq(b"abcd", b"abce"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
    }
}
