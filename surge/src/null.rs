use core::fmt::{self, Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A value that remembers whether it was ever provided.
///
/// Unlike a bare value this distinguishes "not provided" from "explicitly set
/// to zero", which is what makes layering configuration sources possible.
///
/// On the wire there is no wrapper: a present value is encoded as the value
/// itself, while an absent one must be skipped by the containing struct (see
/// [`Nullable::is_absent`]). Decoding `null` yields an absent value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Nullable<T> {
    value: T,
    present: bool,
}

impl<T> Nullable<T> {
    /// Constructs a present value.
    #[inline]
    pub const fn new(value: T) -> Self {
        Self { value, present: true }
    }

    #[inline]
    pub const fn is_present(&self) -> bool {
        self.present
    }

    #[inline]
    pub const fn is_absent(&self) -> bool {
        !self.present
    }

    /// Returns the value if it was provided.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        if self.present {
            Some(&self.value)
        } else {
            None
        }
    }

    /// Replaces the value, marking it as present.
    #[inline]
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.present = true;
    }

    /// Returns the value if present, otherwise the given default.
    #[inline]
    pub fn unwrap_or(self, default: T) -> T {
        if self.present {
            self.value
        } else {
            default
        }
    }

    /// Returns `other` if it is present, `self` otherwise.
    #[inline]
    pub fn apply(self, other: Self) -> Self {
        if other.present {
            other
        } else {
            self
        }
    }

    #[inline]
    pub fn into_option(self) -> Option<T> {
        if self.present {
            Some(self.value)
        } else {
            None
        }
    }
}

impl<T: Default> Nullable<T> {
    /// Constructs an absent value.
    #[inline]
    pub fn absent() -> Self {
        Self::default()
    }
}

impl<T> From<T> for Nullable<T> {
    #[inline]
    fn from(v: T) -> Self {
        Self::new(v)
    }
}

impl From<&str> for Nullable<String> {
    #[inline]
    fn from(v: &str) -> Self {
        Self::new(v.to_owned())
    }
}

impl<T: Default> From<Option<T>> for Nullable<T> {
    #[inline]
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => Self::new(v),
            None => Self::default(),
        }
    }
}

impl<T: Display> Display for Nullable<T> {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        match self.get() {
            Some(v) => v.fmt(fmt),
            None => fmt.write_str("null"),
        }
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.get() {
            Some(v) => v.serialize(ser),
            None => ser.serialize_none(),
        }
    }
}

impl<'de, T> Deserialize<'de> for Nullable<T>
where
    T: Deserialize<'de> + Default,
{
    fn deserialize<D>(de: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v: Option<T> = Deserialize::deserialize(de)?;
        Ok(v.into())
    }
}
