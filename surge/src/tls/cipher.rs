use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{
    de::{self, SeqAccess, Visitor},
    ser::{self, SerializeSeq},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::error::Error;

/// Cipher suites that can be requested by name, with their IANA identifiers.
pub const SUPPORTED_TLS_CIPHER_SUITES: &[(&str, u16)] = &[
    ("TLS_RSA_WITH_RC4_128_SHA", 0x0005),
    ("TLS_RSA_WITH_3DES_EDE_CBC_SHA", 0x000a),
    ("TLS_RSA_WITH_AES_128_CBC_SHA", 0x002f),
    ("TLS_RSA_WITH_AES_256_CBC_SHA", 0x0035),
    ("TLS_RSA_WITH_AES_128_CBC_SHA256", 0x003c),
    ("TLS_RSA_WITH_AES_128_GCM_SHA256", 0x009c),
    ("TLS_RSA_WITH_AES_256_GCM_SHA384", 0x009d),
    ("TLS_ECDHE_ECDSA_WITH_RC4_128_SHA", 0xc007),
    ("TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA", 0xc009),
    ("TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA", 0xc00a),
    ("TLS_ECDHE_RSA_WITH_RC4_128_SHA", 0xc011),
    ("TLS_ECDHE_RSA_WITH_3DES_EDE_CBC_SHA", 0xc012),
    ("TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA", 0xc013),
    ("TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA", 0xc014),
    ("TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA256", 0xc023),
    ("TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA256", 0xc027),
    ("TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256", 0xc02f),
    ("TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256", 0xc02b),
    ("TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384", 0xc030),
    ("TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384", 0xc02c),
    ("TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305", 0xcca8),
    ("TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305", 0xcca9),
];

static SUITE_BY_NAME: Lazy<HashMap<&'static str, u16>> =
    Lazy::new(|| SUPPORTED_TLS_CIPHER_SUITES.iter().copied().collect());

static SUITE_BY_ID: Lazy<HashMap<u16, &'static str>> =
    Lazy::new(|| SUPPORTED_TLS_CIPHER_SUITES.iter().map(|&(name, id)| (id, name)).collect());

/// Returns the identifier of the cipher suite with the given canonical name.
#[inline]
pub fn cipher_suite_id(name: &str) -> Option<u16> {
    SUITE_BY_NAME.get(name).copied()
}

/// Returns the canonical name of the cipher suite with the given identifier.
#[inline]
pub fn cipher_suite_name(id: u16) -> Option<&'static str> {
    SUITE_BY_ID.get(&id).copied()
}

/// Ordered list of cipher suites to offer, by identifier.
///
/// Encoded as an array of canonical suite names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TlsCipherSuites(pub Vec<u16>);

impl TlsCipherSuites {
    /// Resolves a list of suite names, failing on the first unknown one.
    pub fn from_names<I, S>(names: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids = names
            .into_iter()
            .map(|name| {
                let name = name.as_ref();
                cipher_suite_id(name).ok_or_else(|| Error::UnsupportedCipherSuite(name.to_owned()))
            })
            .collect::<Result<_, _>>()?;

        Ok(Self(ids))
    }

    /// Returns canonical suite names in order, failing on an unknown id.
    pub fn names(&self) -> Result<Vec<&'static str>, Error> {
        self.0
            .iter()
            .map(|&id| cipher_suite_name(id).ok_or_else(|| Error::UnsupportedCipherSuite(format!("{id:#06x}"))))
            .collect()
    }

    #[inline]
    pub fn ids(&self) -> &[u16] {
        &self.0
    }
}

impl Serialize for TlsCipherSuites {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let names = self.names().map_err(ser::Error::custom)?;

        let mut seq = ser.serialize_seq(Some(names.len()))?;
        for name in names {
            seq.serialize_element(name)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for TlsCipherSuites {
    fn deserialize<D>(de: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SuitesVisitor;

        impl<'de> Visitor<'de> for SuitesVisitor {
            type Value = TlsCipherSuites;

            fn expecting(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
                fmt.write_str("an array of cipher suite names")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut ids = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(name) = seq.next_element::<String>()? {
                    match cipher_suite_id(&name) {
                        Some(id) => ids.push(id),
                        None => return Err(de::Error::custom(Error::UnsupportedCipherSuite(name))),
                    }
                }

                Ok(TlsCipherSuites(ids))
            }
        }

        de.deserialize_seq(SuitesVisitor)
    }
}
