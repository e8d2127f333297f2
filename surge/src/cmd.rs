use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::env::ENV_PREFIX;

/// Prints the effective options of a load-test run.
///
/// Options are layered in order: compiled-in defaults, option files, then
/// environment variables.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Cmd {
    /// Path to the options file in JSON or YAML format.
    ///
    /// May be given multiple times, later files override earlier ones field
    /// by field.
    #[clap(short, long = "config", value_name = "PATH")]
    pub configs: Vec<PathBuf>,
    /// Ignore options set via environment variables.
    #[clap(long)]
    pub no_env: bool,
    /// Prefix of the environment variables to bind, e.g. "SURGE" for
    /// "SURGE_VUS".
    #[clap(long, value_name = "PREFIX", default_value = ENV_PREFIX)]
    pub env_prefix: String,
    /// Parse all TLS client certificates up front, failing on broken ones.
    #[clap(long)]
    pub eager_tls: bool,
    /// Report the TLS client certificate and address override applied to
    /// this host.
    #[clap(long, value_name = "NAME")]
    pub host: Option<String>,
    /// Pretty-print the resulting JSON.
    #[clap(long)]
    pub pretty: bool,
    /// Be verbose in terms of logging.
    #[clap(short, action = ArgAction::Count)]
    pub verbose: u8,
}
