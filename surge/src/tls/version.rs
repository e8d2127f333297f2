use core::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::{
    de::{self, MapAccess, Visitor},
    ser::SerializeStruct,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::error::Error;

/// TLS protocol version, represented by its wire identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum TlsVersion {
    Ssl30 = 0x0300,
    Tls10 = 0x0301,
    Tls11 = 0x0302,
    Tls12 = 0x0303,
}

const TLS_VERSIONS: &[(&str, TlsVersion)] = &[
    ("ssl3.0", TlsVersion::Ssl30),
    ("tls1.0", TlsVersion::Tls10),
    ("tls1.1", TlsVersion::Tls11),
    ("tls1.2", TlsVersion::Tls12),
];

impl TlsVersion {
    /// Protocol version identifier as sent on the wire.
    #[inline]
    pub const fn id(self) -> u16 {
        self as u16
    }

    /// Canonical lowercase name, e.g. "tls1.2".
    pub fn name(self) -> &'static str {
        TLS_VERSIONS
            .iter()
            .find_map(|&(name, v)| if v == self { Some(name) } else { None })
            .unwrap_or_default()
    }

    pub fn from_id(id: u16) -> Option<Self> {
        TLS_VERSIONS.iter().map(|&(_, v)| v).find(|v| v.id() == id)
    }
}

impl Display for TlsVersion {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        fmt.write_str(self.name())
    }
}

impl FromStr for TlsVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TLS_VERSIONS
            .iter()
            .find_map(|&(name, v)| if name == s { Some(v) } else { None })
            .ok_or_else(|| Error::UnsupportedTlsVersion(s.to_owned()))
    }
}

/// Inclusive range of negotiable TLS versions.
///
/// Missing bounds leave the choice to the TLS library, so the default value
/// is an unconstrained range.
///
/// Decodes from either `{"min": "<name>", "max": "<name>"}`, a single version
/// name that pins both bounds, or an empty string meaning "unconstrained".
/// Always encodes to the object form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TlsVersions {
    pub min: Option<TlsVersion>,
    pub max: Option<TlsVersion>,
}

impl TlsVersions {
    #[inline]
    pub const fn new(min: TlsVersion, max: TlsVersion) -> Self {
        Self { min: Some(min), max: Some(max) }
    }

    /// Range containing exactly the given version.
    #[inline]
    pub const fn exact(v: TlsVersion) -> Self {
        Self::new(v, v)
    }

    #[inline]
    pub const fn is_unconstrained(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Checks whether the given version is allowed by this range.
    pub fn contains(&self, v: TlsVersion) -> bool {
        self.min.is_none_or(|min| min <= v) && self.max.is_none_or(|max| v <= max)
    }
}

/// Empty names map to a missing bound.
fn parse_bound(s: &str) -> Result<Option<TlsVersion>, Error> {
    if s.is_empty() {
        Ok(None)
    } else {
        s.parse().map(Some)
    }
}

impl Serialize for TlsVersions {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut v = ser.serialize_struct("TlsVersions", 2)?;
        v.serialize_field("min", self.min.map_or("", TlsVersion::name))?;
        v.serialize_field("max", self.max.map_or("", TlsVersion::name))?;
        v.end()
    }
}

impl<'de> Deserialize<'de> for TlsVersions {
    fn deserialize<D>(de: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct VersionsVisitor;

        impl<'de> Visitor<'de> for VersionsVisitor {
            type Value = TlsVersions;

            fn expecting(&self, fmt: &mut Formatter) -> fmt::Result {
                fmt.write_str("a TLS version name or an object with \"min\" and \"max\" names")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                let v = parse_bound(v).map_err(E::custom)?;

                Ok(TlsVersions { min: v, max: v })
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut out = TlsVersions::default();

                while let Some(key) = map.next_key::<String>()? {
                    let slot = match key.as_str() {
                        "min" => &mut out.min,
                        "max" => &mut out.max,
                        key => return Err(de::Error::unknown_field(key, &["min", "max"])),
                    };
                    let name: String = map.next_value()?;
                    *slot = parse_bound(&name).map_err(de::Error::custom)?;
                }

                Ok(out)
            }
        }

        de.deserialize_any(VersionsVisitor)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_ids() {
        assert_eq!(0x0300, TlsVersion::Ssl30.id());
        assert_eq!(0x0303, TlsVersion::Tls12.id());
        assert_eq!(Some(TlsVersion::Tls11), TlsVersion::from_id(0x0302));
        assert_eq!(None, TlsVersion::from_id(0x0304));
    }

    #[test]
    fn test_names() {
        for &(name, v) in TLS_VERSIONS {
            assert_eq!(name, v.to_string());
            assert_eq!(v, name.parse().unwrap());
        }
        assert!(matches!(
            "tls9".parse::<TlsVersion>(),
            Err(Error::UnsupportedTlsVersion(name)) if name == "tls9"
        ));
    }

    #[test]
    fn test_decode_object() {
        let v: TlsVersions = serde_json::from_str(r#"{"min":"ssl3.0","max":"tls1.2"}"#).unwrap();

        assert_eq!(TlsVersions::new(TlsVersion::Ssl30, TlsVersion::Tls12), v);
    }

    #[test]
    fn test_decode_string() {
        let v: TlsVersions = serde_json::from_str(r#""tls1.2""#).unwrap();

        assert_eq!(TlsVersions::exact(TlsVersion::Tls12), v);
    }

    #[test]
    fn test_decode_blank() {
        let v: TlsVersions = serde_json::from_str(r#""""#).unwrap();

        assert_eq!(TlsVersions::default(), v);
        assert!(v.is_unconstrained());
    }

    #[test]
    fn test_decode_unknown() {
        for data in [r#""tls2.0""#, r#"{"min":"tls1.0","max":"bogus"}"#] {
            let err = serde_json::from_str::<TlsVersions>(data).unwrap_err().to_string();
            assert!(err.contains("unsupported TLS version"), "{err}");
        }
        assert!(serde_json::from_str::<TlsVersions>(r#"{"lo":"tls1.0"}"#).is_err());
        assert!(serde_json::from_str::<TlsVersions>("12").is_err());
    }

    #[test]
    fn test_encode_object_form() {
        let v = TlsVersions::new(TlsVersion::Ssl30, TlsVersion::Tls12);
        let data = serde_json::to_string(&v).unwrap();

        assert_eq!(r#"{"min":"ssl3.0","max":"tls1.2"}"#, data);
        assert_eq!(v, serde_json::from_str(&data).unwrap());
    }

    #[test]
    fn test_roundtrip_all_ranges() {
        for &(_, min) in TLS_VERSIONS {
            for &(_, max) in TLS_VERSIONS.iter().filter(|(_, max)| min <= *max) {
                let v = TlsVersions::new(min, max);
                assert_eq!(v, serde_json::from_str(&serde_json::to_string(&v).unwrap()).unwrap());
            }
        }
    }

    #[test]
    fn test_contains() {
        let v = TlsVersions::new(TlsVersion::Tls10, TlsVersion::Tls11);

        assert!(!v.contains(TlsVersion::Ssl30));
        assert!(v.contains(TlsVersion::Tls10));
        assert!(v.contains(TlsVersion::Tls11));
        assert!(!v.contains(TlsVersion::Tls12));
        assert!(TlsVersions::default().contains(TlsVersion::Ssl30));
    }
}
