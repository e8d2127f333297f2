use std::io;

/// Errors produced while assembling run options.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read options: {0}")]
    Io(#[from] io::Error),
    #[error("malformed JSON options: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed YAML options: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported cipher suite: {0}")]
    UnsupportedCipherSuite(String),
    #[error("unsupported TLS version: {0}")]
    UnsupportedTlsVersion(String),
    #[error("invalid duration: {0:?}")]
    InvalidDuration(String),
    #[error("invalid stage {segment:?}: {reason}")]
    InvalidStage { segment: String, reason: String },
    /// Environment variable is set, but its value can't be parsed.
    #[error("invalid value {value:?} for {var}: {reason}")]
    Env { var: String, value: String, reason: String },
    #[error("invalid TLS client certificate: {0}")]
    Certificate(String),
}
