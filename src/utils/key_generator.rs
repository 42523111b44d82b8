//! Opaque identifier, API key, and slug generation.
//!
//! All randomness comes from the operating system RNG via `getrandom`.
//! Identifiers are hex-encoded; secrets and slugs use URL-safe base64
//! without padding.

use base64::Engine as _;

/// Random bytes behind an entity identifier (32 hex characters).
const ID_LENGTH_BYTES: usize = 16;

/// Random bytes behind an API key secret (43 base64 characters).
const API_KEY_LENGTH_BYTES: usize = 32;

/// Random bytes behind a short-link slug (8 base64 characters).
const SLUG_LENGTH_BYTES: usize = 6;

/// Prefix distinguishing API keys from other opaque strings in logs and configs.
const API_KEY_PREFIX: &str = "pm_";

/// Number of trailing characters left visible when masking an API key.
const MASK_VISIBLE_SUFFIX: usize = 4;

/// Placeholder shown instead of a masked secret for revoked keys.
pub const REVOKED_KEY_PLACEHOLDER: &str = "revoked";

fn random_bytes<const N: usize>() -> [u8; N] {
    let mut buffer = [0u8; N];
    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");
    buffer
}

/// Generates an opaque unique identifier for an entity row.
///
/// 128 bits of OS entropy, hex-encoded to 32 characters.
pub fn generate_id() -> String {
    hex::encode(random_bytes::<ID_LENGTH_BYTES>())
}

/// Generates a high-entropy API key secret.
///
/// 256 bits of OS entropy, URL-safe base64 without padding, prefixed with
/// `pm_` so keys are recognizable when they leak into logs or tickets.
pub fn generate_api_key() -> String {
    let encoded =
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(random_bytes::<API_KEY_LENGTH_BYTES>());
    format!("{API_KEY_PREFIX}{encoded}")
}

/// Generates a random 8-character short-link slug.
pub fn generate_slug() -> String {
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(random_bytes::<SLUG_LENGTH_BYTES>())
}

/// Masks an API key for listing responses, keeping a fixed-length suffix.
///
/// A key shorter than the visible suffix is fully masked.
pub fn mask_api_key(api_key: &str) -> String {
    if api_key.len() <= MASK_VISIBLE_SUFFIX {
        return "****".to_string();
    }

    let suffix = &api_key[api_key.len() - MASK_VISIBLE_SUFFIX..];
    format!("****{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_id_length_and_charset() {
        let id = generate_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_id_unique() {
        let mut ids = HashSet::new();
        for _ in 0..1000 {
            ids.insert(generate_id());
        }
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_generate_api_key_prefix_and_length() {
        let key = generate_api_key();
        assert!(key.starts_with("pm_"));
        assert_eq!(key.len(), API_KEY_PREFIX.len() + 43);
        assert!(!key.contains('='));
    }

    #[test]
    fn test_generate_api_key_unique() {
        let a = generate_api_key();
        let b = generate_api_key();
        assert_ne!(a, b);
    }

    #[test]
    fn test_generate_slug_length_and_charset() {
        let slug = generate_slug();
        assert_eq!(slug.len(), 8);
        assert!(
            slug.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_mask_api_key_keeps_suffix() {
        let masked = mask_api_key("pm_abcdefghij1234");
        assert_eq!(masked, "****1234");
    }

    #[test]
    fn test_mask_api_key_short_input() {
        assert_eq!(mask_api_key("ab"), "****");
        assert_eq!(mask_api_key(""), "****");
    }

    #[test]
    fn test_mask_api_key_never_reveals_full_key() {
        let key = generate_api_key();
        let masked = mask_api_key(&key);
        assert!(!masked.contains(&key[..10]));
    }
}
