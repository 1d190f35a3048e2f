//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, HMAC, Base64)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Signed single-purpose tokens (email verification, password reset)
//! - Cookie management
//! - Client identification (fingerprint, IP extraction)

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod password;
pub mod signed_token;
