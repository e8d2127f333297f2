//! Signed time span with nanosecond resolution.
//!
//! Text form is a sequence of decimal numbers, each with optional fraction and
//! a unit suffix, such as "300ms", "-1.5h" or "2h45m". Valid units are "ns",
//! "us" (or "µs"), "ms", "s", "m", "h". Formatting always produces the
//! canonical compound form: "2m0s", "1h0m10.5s", "150ms".

use core::{
    fmt::{self, Display, Formatter, Write},
    str::FromStr,
    time::Duration as StdDuration,
};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

const UNITS: &[(&str, u64)] = &[
    ("ns", NANOSECOND),
    ("us", MICROSECOND),
    ("µs", MICROSECOND), // U+00B5 micro sign
    ("μs", MICROSECOND), // U+03BC greek mu
    ("ms", MILLISECOND),
    ("s", SECOND),
    ("m", MINUTE),
    ("h", HOUR),
];

/// Signed time span, stored as nanoseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(i64);

impl Duration {
    pub const ZERO: Self = Self(0);

    #[inline]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis.saturating_mul(MILLISECOND as i64))
    }

    #[inline]
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs.saturating_mul(SECOND as i64))
    }

    #[inline]
    pub const fn as_nanos(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Converts into the standard library duration.
    ///
    /// Returns `None` for negative spans.
    #[inline]
    pub fn to_std(&self) -> Option<StdDuration> {
        u64::try_from(self.0).ok().map(StdDuration::from_nanos)
    }

    #[inline]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }
}

impl From<StdDuration> for Duration {
    /// Saturates at the maximum representable span.
    fn from(v: StdDuration) -> Self {
        Self(i64::try_from(v.as_nanos()).unwrap_or(i64::MAX))
    }
}

impl Display for Duration {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        let mut u = self.0.unsigned_abs();
        if u == 0 {
            return fmt.write_str("0s");
        }

        if self.0 < 0 {
            fmt.write_char('-')?;
        }

        if u < SECOND {
            // Sub-second spans use the smallest unit that keeps the integer
            // part non-zero.
            let (unit, scale) = match u {
                u if u < MICROSECOND => ("ns", NANOSECOND),
                u if u < MILLISECOND => ("µs", MICROSECOND),
                _ => ("ms", MILLISECOND),
            };
            write_fraction(fmt, u / scale, u % scale, scale)?;
            return fmt.write_str(unit);
        }

        let hours = u / HOUR;
        u %= HOUR;
        let minutes = u / MINUTE;
        u %= MINUTE;

        if hours > 0 {
            write!(fmt, "{hours}h")?;
        }
        if hours > 0 || minutes > 0 {
            write!(fmt, "{minutes}m")?;
        }
        write_fraction(fmt, u / SECOND, u % SECOND, SECOND)?;
        fmt.write_char('s')
    }
}

/// Writes `int.frac` where `frac` is expressed in units of `1/scale`, with
/// trailing zeroes removed.
fn write_fraction(fmt: &mut Formatter, int: u64, frac: u64, scale: u64) -> Result<(), fmt::Error> {
    write!(fmt, "{int}")?;
    if frac == 0 {
        return Ok(());
    }

    let width = scale.ilog10() as usize;
    let digits = format!("{frac:0width$}");
    write!(fmt, ".{}", digits.trim_end_matches('0'))
}

impl FromStr for Duration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s).ok_or_else(|| Error::InvalidDuration(s.to_owned()))
    }
}

fn parse(s: &str) -> Option<Duration> {
    let (neg, mut rest) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    if rest == "0" {
        return Some(Duration::ZERO);
    }
    if rest.is_empty() {
        return None;
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int, tail) = rest.split_at(int_len);
        rest = tail;

        let mut frac = "";
        if let Some(tail) = rest.strip_prefix('.') {
            let frac_len = tail.bytes().take_while(u8::is_ascii_digit).count();
            (frac, rest) = tail.split_at(frac_len);
        }
        if int.is_empty() && frac.is_empty() {
            return None;
        }

        let unit_len = rest
            .char_indices()
            .find(|(_, c)| *c == '.' || c.is_ascii_digit())
            .map_or(rest.len(), |(idx, _)| idx);
        let (unit, tail) = rest.split_at(unit_len);
        rest = tail;

        let (_, scale) = UNITS.iter().find(|(name, _)| *name == unit)?;

        let mut v = if int.is_empty() { 0 } else { int.parse::<u64>().ok()?.checked_mul(*scale)? };
        if !frac.is_empty() {
            // Digits beyond nanosecond resolution are truncated.
            let mut f = 0u64;
            let mut div = 1u64;
            for d in frac.bytes().take(19) {
                f = f * 10 + u64::from(d - b'0');
                div *= 10;
            }
            v = v.checked_add((f as u128 * *scale as u128 / div as u128) as u64)?;
        }

        total = total.checked_add(v)?;
    }

    if neg {
        if total > i64::MAX as u64 + 1 {
            return None;
        }
        Some(Duration((total as i64).wrapping_neg()))
    } else {
        i64::try_from(total).ok().map(Duration)
    }
}

impl Serialize for Duration {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ser.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(de: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v: String = Deserialize::deserialize(de)?;
        v.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_format() {
        let cases = [
            (0, "0s"),
            (1, "1ns"),
            (1_100, "1.1µs"),
            (2_200_000, "2.2ms"),
            (3_300_000_000, "3.3s"),
            (10 * SECOND as i64, "10s"),
            (2 * MINUTE as i64, "2m0s"),
            (4 * MINUTE as i64 + 5 * SECOND as i64, "4m5s"),
            (5 * HOUR as i64 + 6 * MINUTE as i64 + 7_001_000_000, "5h6m7.001s"),
            (HOUR as i64, "1h0m0s"),
            (-1_500_000_000, "-1.5s"),
            (-1, "-1ns"),
        ];

        for (nanos, expected) in cases {
            assert_eq!(expected, Duration::from_nanos(nanos).to_string());
        }
    }

    #[test]
    fn test_format_extremes() {
        assert_eq!("2562047h47m16.854775807s", Duration::from_nanos(i64::MAX).to_string());
        assert_eq!("-2562047h47m16.854775808s", Duration::from_nanos(i64::MIN).to_string());
    }

    #[test]
    fn test_parse() {
        let cases = [
            ("0", 0),
            ("0s", 0),
            ("-0", 0),
            ("10s", 10 * SECOND as i64),
            ("+5s", 5 * SECOND as i64),
            ("-5s", -5 * SECOND as i64),
            ("1.5s", 1_500_000_000),
            (".5s", 500_000_000),
            ("1.s", SECOND as i64),
            ("300ms", 300 * MILLISECOND as i64),
            ("2m0s", 2 * MINUTE as i64),
            ("1h15m30.918273645s", 4_530_918_273_645),
            ("100us", 100_000),
            ("100µs", 100_000),
            ("100μs", 100_000),
            ("7ns", 7),
            ("1.0000000009s", 1_000_000_000),
        ];

        for (text, nanos) in cases {
            assert_eq!(Duration::from_nanos(nanos), text.parse::<Duration>().unwrap(), "{text}");
        }
    }

    #[test]
    fn test_parse_invalid() {
        for text in ["", "3", "-", "s", ".s", "1x", "1.2.3s", "1s2", "9223372036854775808ns", "1e3s"] {
            assert!(text.parse::<Duration>().is_err(), "{text}");
        }
    }

    #[test]
    fn test_parse_negative_min() {
        assert_eq!(Duration::from_nanos(i64::MIN), "-9223372036854775808ns".parse().unwrap());
    }

    #[test]
    fn test_format_parse_agree() {
        for nanos in [1, 999, 1_001, 61 * SECOND as i64, 90 * MINUTE as i64 + 1, -3_723_000_000_000] {
            let v = Duration::from_nanos(nanos);
            assert_eq!(v, v.to_string().parse().unwrap());
        }
    }

    #[test]
    fn test_json_is_text() {
        let v = Duration::from_secs(120);

        assert_eq!(r#""2m0s""#, serde_json::to_string(&v).unwrap());
        assert_eq!(v, serde_json::from_str::<Duration>(r#""2m""#).unwrap());
        assert!(serde_json::from_str::<Duration>("120").is_err());
    }

    #[test]
    fn test_to_std() {
        assert_eq!(Some(StdDuration::from_millis(1500)), Duration::from_millis(1500).to_std());
        assert_eq!(None, Duration::from_secs(-1).to_std());
    }

    #[test]
    fn test_constructors_saturate() {
        assert_eq!(i64::MAX, Duration::from_secs(i64::MAX).as_nanos());
        assert_eq!(i64::MIN, Duration::from_secs(i64::MIN).as_nanos());
        assert_eq!(i64::MAX, Duration::from_millis(i64::MAX).as_nanos());
        assert_eq!(i64::MAX, Duration::from(StdDuration::MAX).as_nanos());
    }
}
