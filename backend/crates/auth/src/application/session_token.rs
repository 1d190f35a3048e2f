//! Session Token Codec
//!
//! The token handed to clients is `<session_id>.<base64url(signature)>`
//! where the signature is an HMAC-SHA256 over the session id string.
//! The database row referenced by the id is the source of truth, so a
//! deleted session invalidates its token immediately.

use platform::crypto::{constant_time_eq, from_base64_url, hmac_sha256, to_base64_url};
use uuid::Uuid;

use crate::error::{AuthError, AuthResult};

/// Generate a signed session token for a session id
pub fn generate(secret: &[u8; 32], session_id: Uuid) -> String {
    let id = session_id.to_string();
    let signature = hmac_sha256(secret, id.as_bytes());
    format!("{}.{}", id, to_base64_url(&signature))
}

/// Parse and verify a session token, returning the session id
pub fn parse(secret: &[u8; 32], token: &str) -> AuthResult<Uuid> {
    let (id_part, signature_part) = token.split_once('.').ok_or(AuthError::SessionInvalid)?;

    let signature = from_base64_url(signature_part).map_err(|_| AuthError::SessionInvalid)?;
    let expected = hmac_sha256(secret, id_part.as_bytes());

    if !constant_time_eq(&signature, &expected) {
        return Err(AuthError::SessionInvalid);
    }

    id_part.parse().map_err(|_| AuthError::SessionInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [9u8; 32];

    #[test]
    fn test_roundtrip() {
        let session_id = Uuid::new_v4();
        let token = generate(&SECRET, session_id);
        let parsed = parse(&SECRET, &token).unwrap();
        assert_eq!(parsed, session_id);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = generate(&SECRET, Uuid::new_v4());
        let other = [10u8; 32];
        assert!(matches!(
            parse(&other, &token),
            Err(AuthError::SessionInvalid)
        ));
    }

    #[test]
    fn test_tampered_id_rejected() {
        let token = generate(&SECRET, Uuid::new_v4());
        let (_, sig) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", Uuid::new_v4(), sig);
        assert!(parse(&SECRET, &forged).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        for garbage in ["", "no-dot", "a.b", "a.b.c"] {
            assert!(parse(&SECRET, garbage).is_err(), "accepted {garbage:?}");
        }
    }
}
