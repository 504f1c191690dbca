//! Opaque API token generation

use rand::RngCore;

/// Generate an opaque machine-to-machine API token
///
/// 32 bytes of cryptographically secure randomness, hex encoded (64 chars).
#[must_use]
pub fn generate_api_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_shape() {
        let token = generate_api_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(generate_api_token(), generate_api_token());
    }
}
