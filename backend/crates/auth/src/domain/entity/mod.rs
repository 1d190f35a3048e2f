//! Entity Module

pub mod credentials;
pub mod profile;
pub mod session;
pub mod user;
