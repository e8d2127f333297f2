use core::error::Error;

use crate::{cmd::Cmd, options::Options};

/// Effective configuration of a single invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Options after layering every source.
    pub options: Options,
    /// Host to report TLS client certificate and address override for.
    pub host: Option<String>,
    /// Pretty-print the resulting JSON.
    pub pretty: bool,
}

impl TryFrom<Cmd> for Config {
    type Error = Box<dyn Error>;

    fn try_from(cmd: Cmd) -> Result<Self, Self::Error> {
        let Cmd {
            configs,
            no_env,
            env_prefix,
            eager_tls,
            host,
            pretty,
            verbose: _,
        } = cmd;

        let mut options = Options::defaults();
        for path in &configs {
            let opts = Options::from_file(path).map_err(|err| format!("{}: {err}", path.display()))?;
            options = options.apply(opts);
        }

        if !no_env {
            let opts = Options::from_env_lookup(&env_prefix, |key| std::env::var(key).ok())?;
            options = options.apply(opts);
        }

        if eager_tls {
            options = options.finalize()?;
        }

        let m = Self { options, host, pretty };

        Ok(m)
    }
}

impl Config {
    /// Renders the effective options as JSON.
    pub fn render(&self) -> Result<String, Box<dyn Error>> {
        let out = if self.pretty {
            serde_json::to_string_pretty(&self.options)?
        } else {
            self.options.to_json()?
        };

        Ok(out)
    }

    /// Describes which per-host settings apply to the configured host, if any.
    pub fn host_report(&self) -> Option<String> {
        let host = self.host.as_deref()?;

        let tls_auth = match self.options.tls_auth_for(host) {
            Some(auth) => format!("client certificate for {:?}", auth.fields().domains),
            None => "no client certificate".to_owned(),
        };
        let addr = match self.options.resolve_host(host) {
            Some(addr) => format!("resolves to {addr}"),
            None => "resolved via DNS".to_owned(),
        };

        Some(format!("{host}: {tls_auth}, {addr}"))
    }
}
