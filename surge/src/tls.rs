//! TLS parameters: cipher suites, version ranges and client certificates.

pub use self::{
    auth::{domain_matches, TlsAuth, TlsAuthFields},
    cipher::{cipher_suite_id, cipher_suite_name, TlsCipherSuites, SUPPORTED_TLS_CIPHER_SUITES},
    version::{TlsVersion, TlsVersions},
};

mod auth;
mod cipher;
mod version;

#[cfg(test)]
pub(crate) use self::auth::fixture;
