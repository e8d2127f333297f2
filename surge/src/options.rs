use core::{mem, net::IpAddr};
use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    duration::Duration,
    env::{EnvBinder, ENV_PREFIX},
    error::Error,
    null::Nullable,
    stage::Stage,
    threshold::Thresholds,
    tls::{TlsAuth, TlsCipherSuites, TlsVersions},
};

/// Every tunable parameter of a load-test run.
///
/// Each field may be absent, meaning "use the consumer's default". Instances
/// coming from different sources (compiled defaults, option files,
/// environment) are layered with [`Options::apply`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Start the run in paused state.
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub paused: Nullable<bool>,
    /// Number of active VUs.
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub vus: Nullable<i64>,
    /// Number of VUs to allocate.
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub vus_max: Nullable<i64>,
    /// Total run duration.
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub duration: Nullable<Duration>,
    /// Total number of script iterations.
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub iterations: Nullable<i64>,
    /// Ramp profile. Replaces `vus` and `duration` when non-empty.
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_empty")]
    pub stages: Vec<Stage>,

    /// Maximum number of HTTP redirects to follow.
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub max_redirects: Nullable<i64>,
    /// Accept any server certificate.
    #[serde(rename = "insecureSkipTLSVerify", skip_serializing_if = "Nullable::is_absent")]
    pub insecure_skip_tls_verify: Nullable<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_cipher_suites: Option<TlsCipherSuites>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_version: Option<TlsVersions>,
    /// Client certificates. The first entry matching a host wins.
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_empty")]
    pub tls_auth: Vec<TlsAuth>,
    /// Open a new connection for every request.
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub no_connection_reuse: Nullable<bool>,
    /// User-Agent header sent with HTTP requests.
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub user_agent: Nullable<String>,
    /// Turn failed requests into script exceptions.
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub throw: Nullable<bool>,

    /// Threshold expressions by metric name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<BTreeMap<String, Thresholds>>,
    /// Host name overrides, bypassing DNS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosts: Option<BTreeMap<String, IpAddr>>,
    /// Free-form settings for extensions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external: Option<BTreeMap<String, serde_json::Value>>,
}

impl Options {
    /// Compiled-in defaults, meant to be the bottom layer.
    pub fn defaults() -> Self {
        Self {
            paused: false.into(),
            vus: 1.into(),
            vus_max: 1.into(),
            max_redirects: 10.into(),
            throw: false.into(),
            ..Default::default()
        }
    }

    /// Layers `opts` on top of `self`.
    ///
    /// Every field provided by `opts` replaces the one from `self` as a whole.
    /// Lists and maps are never merged element-wise: a non-empty stage list
    /// replaces the entire ramp profile, a hosts map replaces all overrides.
    pub fn apply(self, opts: Options) -> Options {
        Options {
            paused: self.paused.apply(opts.paused),
            vus: self.vus.apply(opts.vus),
            vus_max: self.vus_max.apply(opts.vus_max),
            duration: self.duration.apply(opts.duration),
            iterations: self.iterations.apply(opts.iterations),
            stages: non_empty_or(opts.stages, self.stages),
            max_redirects: self.max_redirects.apply(opts.max_redirects),
            insecure_skip_tls_verify: self.insecure_skip_tls_verify.apply(opts.insecure_skip_tls_verify),
            tls_cipher_suites: opts.tls_cipher_suites.or(self.tls_cipher_suites),
            tls_version: opts.tls_version.or(self.tls_version),
            tls_auth: non_empty_or(opts.tls_auth, self.tls_auth),
            no_connection_reuse: self.no_connection_reuse.apply(opts.no_connection_reuse),
            user_agent: self.user_agent.apply(opts.user_agent),
            throw: self.throw.apply(opts.throw),
            thresholds: opts.thresholds.or(self.thresholds),
            hosts: opts.hosts.or(self.hosts),
            external: opts.external.or(self.external),
        }
    }

    pub fn from_json(data: &[u8]) -> Result<Self, Error> {
        let m = serde_json::from_slice(data)?;

        Ok(m)
    }

    pub fn from_yaml(data: &[u8]) -> Result<Self, Error> {
        let m = serde_yaml::from_slice(data)?;

        Ok(m)
    }

    /// Loads options from a file, YAML for ".yaml" and ".yml" extensions,
    /// JSON otherwise.
    pub fn from_file<P>(path: P) -> Result<Self, Error>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        log::debug!("loading options from '{}' ...", path.display());

        let data = fs::read(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml(&data),
            _ => Self::from_json(&data),
        }
    }

    /// Decodes a JSON payload and layers it on top of `self`.
    ///
    /// Fields missing from the payload keep their current values. Nothing is
    /// applied if the payload fails to decode.
    pub fn overlay_json(&mut self, data: &[u8]) -> Result<(), Error> {
        let opts = Self::from_json(data)?;
        log::debug!("overlaying {} bytes of JSON options ...", data.len());

        *self = mem::take(self).apply(opts);

        Ok(())
    }

    pub fn to_json(&self) -> Result<String, Error> {
        let m = serde_json::to_string(self)?;

        Ok(m)
    }

    /// Binds scalar options from the process environment using the default
    /// prefix.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_env_lookup(ENV_PREFIX, |key| std::env::var(key).ok())
    }

    /// Binds scalar options from an environment snapshot.
    ///
    /// Structured fields (TLS settings, thresholds, hosts, external) have no
    /// environment binding and stay absent.
    pub fn from_env_lookup<F>(prefix: &str, lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = EnvBinder::new(prefix, lookup);

        let m = Self {
            paused: env.bool("paused")?,
            vus: env.int("vus")?,
            vus_max: env.int("vus_max")?,
            duration: env.duration("duration")?,
            iterations: env.int("iterations")?,
            stages: env.stages("stages")?,
            max_redirects: env.int("max_redirects")?,
            insecure_skip_tls_verify: env.bool("insecure_skip_tls_verify")?,
            no_connection_reuse: env.bool("no_connection_reuse")?,
            user_agent: env.string("user_agent")?,
            throw: env.bool("throw")?,
            ..Default::default()
        };

        Ok(m)
    }

    /// Returns the client certificate bundle to present to the given host.
    pub fn tls_auth_for(&self, host: &str) -> Option<&TlsAuth> {
        self.tls_auth.iter().find(|auth| auth.matches(host))
    }

    /// Returns the address overriding DNS resolution of the given host.
    pub fn resolve_host(&self, host: &str) -> Option<IpAddr> {
        self.hosts.as_ref()?.get(host).copied()
    }

    /// Parses every client certificate up front.
    ///
    /// Afterwards the options can be shared by concurrent readers without any
    /// of them paying for the first parse.
    pub fn finalize(self) -> Result<Self, Error> {
        for auth in &self.tls_auth {
            auth.certificate()?;
        }

        Ok(self)
    }
}

/// Decodes a list where `null` means the same as a missing field.
fn null_as_empty<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let v = Option::<Vec<T>>::deserialize(de)?;

    Ok(v.unwrap_or_default())
}

#[inline]
fn non_empty_or<T>(v: Vec<T>, or: Vec<T>) -> Vec<T> {
    if v.is_empty() {
        or
    } else {
        v
    }
}
