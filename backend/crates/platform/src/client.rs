//! Client identification utilities
//!
//! Derives a per-client fingerprint from request headers so sessions can
//! be bound to the browser that opened them.

use axum::http::{HeaderMap, header};
use std::net::IpAddr;

use crate::crypto::sha256;

/// Header-derived client identity
#[derive(Debug, Clone)]
pub struct ClientFingerprint {
    /// SHA-256 of the User-Agent value
    pub hash: [u8; 32],
    /// Best-guess client address
    pub ip: Option<IpAddr>,
    /// Raw User-Agent, kept for session records
    pub user_agent: Option<String>,
}

impl ClientFingerprint {
    pub fn ip_string(&self) -> Option<String> {
        self.ip.map(|ip| ip.to_string())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum FingerprintError {
    #[error("Missing required header: {0}")]
    MissingHeader(String),
}

/// Fingerprint the client. A request without a User-Agent cannot be
/// fingerprinted and is rejected.
pub fn extract_fingerprint(
    headers: &HeaderMap,
    client_ip: Option<IpAddr>,
) -> Result<ClientFingerprint, FingerprintError> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| FingerprintError::MissingHeader("User-Agent".to_string()))?;

    Ok(ClientFingerprint {
        hash: sha256(user_agent.as_bytes()),
        ip: client_ip,
        user_agent: Some(user_agent.to_string()),
    })
}

/// Client address: the first entry of X-Forwarded-For when a proxy set
/// one, otherwise the socket peer address.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|xff| xff.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok())
        .or(direct_ip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_fingerprint_hashes_user_agent() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static("Mozilla/5.0 Test Browser"),
        );

        let fp = extract_fingerprint(&headers, None).unwrap();
        assert_eq!(fp.hash, sha256(b"Mozilla/5.0 Test Browser"));
        assert_eq!(fp.user_agent.as_deref(), Some("Mozilla/5.0 Test Browser"));
    }

    #[test]
    fn test_fingerprint_requires_user_agent() {
        let headers = HeaderMap::new();
        assert!(matches!(
            extract_fingerprint(&headers, None),
            Err(FingerprintError::MissingHeader(_))
        ));
    }

    #[test]
    fn test_forwarded_header_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("192.168.1.1, 10.0.0.1"),
        );

        let direct: IpAddr = "127.0.0.1".parse().unwrap();
        assert_eq!(
            extract_client_ip(&headers, Some(direct)),
            Some("192.168.1.1".parse().unwrap())
        );
    }

    #[test]
    fn test_falls_back_to_peer_address() {
        let headers = HeaderMap::new();
        let direct: IpAddr = "127.0.0.1".parse().unwrap();
        assert_eq!(extract_client_ip(&headers, Some(direct)), Some(direct));
    }
}
