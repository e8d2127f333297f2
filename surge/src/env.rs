//! Environment variable binding.
//!
//! Each scalar option maps to `<PREFIX>_<FIELD>`, where `FIELD` is the
//! upper-cased snake case field name, e.g. `SURGE_VUS_MAX`.
//!
//! An unset variable and a variable set to the empty string both leave the
//! option absent. Anything else must parse as the option's type. Booleans
//! are exactly "true" or "false", so `SURGE_PAUSED=1` is an error.

use core::{fmt::Display, str::FromStr};

use crate::{
    duration::Duration,
    error::Error,
    null::Nullable,
    stage::{self, Stage},
};

/// Default variable name prefix.
pub const ENV_PREFIX: &str = "SURGE";

/// Returns the variable name bound to the given option field.
pub fn var_name(prefix: &str, field: &str) -> String {
    format!("{prefix}_{}", field.to_ascii_uppercase())
}

/// Reads typed option values from an environment snapshot.
pub struct EnvBinder<F> {
    prefix: String,
    lookup: F,
}

impl<F> EnvBinder<F>
where
    F: Fn(&str) -> Option<String>,
{
    pub fn new<P>(prefix: P, lookup: F) -> Self
    where
        P: Into<String>,
    {
        Self { prefix: prefix.into(), lookup }
    }

    /// Returns the raw value of the variable bound to `field`, treating an
    /// empty value as unset.
    fn raw(&self, field: &str) -> Option<(String, String)> {
        let var = var_name(&self.prefix, field);
        let value = (self.lookup)(&var)?;
        if value.is_empty() {
            return None;
        }

        log::debug!("binding {var}={value:?}");
        Some((var, value))
    }

    fn parse<T>(&self, field: &str) -> Result<Nullable<T>, Error>
    where
        T: FromStr + Default,
        T::Err: Display,
    {
        let Some((var, value)) = self.raw(field) else {
            return Ok(Nullable::default());
        };

        match value.parse() {
            Ok(v) => Ok(Nullable::new(v)),
            Err(err) => Err(Error::Env {
                var,
                reason: err.to_string(),
                value,
            }),
        }
    }

    /// Binds a boolean, accepting "true" or "false".
    #[inline]
    pub fn bool(&self, field: &str) -> Result<Nullable<bool>, Error> {
        self.parse(field)
    }

    /// Binds a decimal integer.
    #[inline]
    pub fn int(&self, field: &str) -> Result<Nullable<i64>, Error> {
        self.parse(field)
    }

    #[inline]
    pub fn duration(&self, field: &str) -> Result<Nullable<Duration>, Error> {
        self.parse(field)
    }

    /// Binds a string verbatim.
    #[inline]
    pub fn string(&self, field: &str) -> Result<Nullable<String>, Error> {
        Ok(self.raw(field).map(|(_, value)| value).into())
    }

    /// Binds a stage list, see [`stage::parse_stages`].
    pub fn stages(&self, field: &str) -> Result<Vec<Stage>, Error> {
        let Some((var, value)) = self.raw(field) else {
            return Ok(Vec::new());
        };

        stage::parse_stages(&value).map_err(|err| Error::Env {
            var,
            reason: err.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use super::*;

    fn binder(vars: &[(&str, &str)]) -> EnvBinder<impl Fn(&str) -> Option<String>> {
        let vars: HashMap<String, String> = vars.iter().map(|&(k, v)| (k.to_owned(), v.to_owned())).collect();

        EnvBinder::new("TEST", move |key: &str| vars.get(key).cloned())
    }

    #[test]
    fn test_var_name() {
        assert_eq!("SURGE_VUS_MAX", var_name(ENV_PREFIX, "vus_max"));
        assert_eq!("SURGE_INSECURE_SKIP_TLS_VERIFY", var_name(ENV_PREFIX, "insecure_skip_tls_verify"));
    }

    #[test]
    fn test_unset_is_absent() {
        let env = binder(&[]);

        assert!(env.bool("paused").unwrap().is_absent());
        assert!(env.int("vus").unwrap().is_absent());
        assert!(env.duration("duration").unwrap().is_absent());
        assert!(env.string("user_agent").unwrap().is_absent());
        assert!(env.stages("stages").unwrap().is_empty());
    }

    #[test]
    fn test_empty_is_absent() {
        let env = binder(&[
            ("TEST_PAUSED", ""),
            ("TEST_VUS", ""),
            ("TEST_DURATION", ""),
            ("TEST_USER_AGENT", ""),
            ("TEST_STAGES", ""),
        ]);

        assert!(env.bool("paused").unwrap().is_absent());
        assert!(env.int("vus").unwrap().is_absent());
        assert!(env.duration("duration").unwrap().is_absent());
        assert!(env.string("user_agent").unwrap().is_absent());
        assert!(env.stages("stages").unwrap().is_empty());
    }

    #[test]
    fn test_values() {
        let env = binder(&[
            ("TEST_PAUSED", "true"),
            ("TEST_THROW", "false"),
            ("TEST_VUS", "123"),
            ("TEST_DURATION", "10s"),
            ("TEST_USER_AGENT", "Hi!"),
            ("TEST_STAGES", "1s,2s:100"),
        ]);

        assert_eq!(Nullable::new(true), env.bool("paused").unwrap());
        assert_eq!(Nullable::new(false), env.bool("throw").unwrap());
        assert_eq!(Nullable::new(123), env.int("vus").unwrap());
        assert_eq!(Nullable::new(Duration::from_secs(10)), env.duration("duration").unwrap());
        assert_eq!(Nullable::from("Hi!"), env.string("user_agent").unwrap());
        assert_eq!(
            vec![
                Stage::new(Duration::from_secs(1), None),
                Stage::new(Duration::from_secs(2), Some(100)),
            ],
            env.stages("stages").unwrap()
        );
    }

    #[test]
    fn test_invalid_names_variable_and_value() {
        let env = binder(&[
            ("TEST_PAUSED", "yes"),
            ("TEST_THROW", "1"),
            ("TEST_VUS", "12x"),
            ("TEST_DURATION", "10"),
            ("TEST_STAGES", "1s:many"),
        ]);

        let cases = [
            ("TEST_PAUSED", "yes", env.bool("paused").map(|_| ())),
            ("TEST_THROW", "1", env.bool("throw").map(|_| ())),
            ("TEST_VUS", "12x", env.int("vus").map(|_| ())),
            ("TEST_DURATION", "10", env.duration("duration").map(|_| ())),
            ("TEST_STAGES", "1s:many", env.stages("stages").map(|_| ())),
        ];

        for (expected_var, expected_value, result) in cases {
            match result {
                Err(Error::Env { var, value, .. }) => {
                    assert_eq!(expected_var, var);
                    assert_eq!(expected_value, value);
                }
                v => panic!("unexpected result for {expected_var}: {v:?}"),
            }
        }
    }
}
