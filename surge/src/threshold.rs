use serde::{Deserialize, Serialize};

/// Single threshold expression attached to a metric.
///
/// Stored verbatim. Usually this is the expression source, e.g. "p(95)<500",
/// but structured forms are kept as well for the evaluator to interpret.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Threshold(pub serde_json::Value);

impl Threshold {
    /// Returns the expression source, if this threshold is a plain string.
    #[inline]
    pub fn source(&self) -> Option<&str> {
        self.0.as_str()
    }
}

impl From<&str> for Threshold {
    #[inline]
    fn from(v: &str) -> Self {
        Self(serde_json::Value::String(v.to_owned()))
    }
}

/// Ordered thresholds of one metric.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Thresholds(pub Vec<Threshold>);

impl Thresholds {
    pub fn new<I, T>(v: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Threshold>,
    {
        Self(v.into_iter().map(Into::into).collect())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_json_preserves_order_and_form() {
        let data = r#"["p(95)<500",{"abortOnFail":true,"threshold":"rate<0.01"}]"#;
        let v: Thresholds = serde_json::from_str(data).unwrap();

        assert_eq!(2, v.0.len());
        assert_eq!(Some("p(95)<500"), v.0[0].source());
        assert_eq!(None, v.0[1].source());
        assert_eq!(data, serde_json::to_string(&v).unwrap());
    }
}
