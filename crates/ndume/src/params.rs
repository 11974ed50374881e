//! Positional path params

use serde::Serialize;
use serde_json::Value;

use crate::body::value_to_text;
use crate::error::Error;

/// Ordered key/value params
///
/// Only the values reach the URL, as slash separated path segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    /// Create empty params
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a param
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.entries.push((key.into(), value.to_string()));
        self
    }

    /// Build params from a serializable mapping or struct, in field order
    pub fn from_serializable<T>(params: &T) -> Result<Self, Error>
    where
        T: Serialize + ?Sized,
    {
        match serde_json::to_value(params) {
            Ok(Value::Object(map)) => Ok(map
                .iter()
                .map(|(key, value)| (key.clone(), value_to_text(value)))
                .collect()),
            Ok(Value::Null) => Err(Error::InvalidParams("params are missing".to_string())),
            Ok(_) => Err(Error::InvalidParams(
                "params need to be a mapping, e.g. {key1: value1, key2: value2}".to_string(),
            )),
            Err(e) => Err(Error::InvalidParams(e.to_string())),
        }
    }

    /// Iterate over `(key, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of params
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no params
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: ToString,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        }
    }
}

/// Format params as `/v1/v2/.../vN/`
///
/// Keys are dropped and values are not URL-encoded.
pub fn format_params(params: Option<&Params>) -> Result<String, Error> {
    let params = match params {
        Some(params) if !params.is_empty() => params,
        _ => {
            tracing::warn!("Rejecting empty params");
            return Err(Error::InvalidParams(
                "params need to be a mapping, e.g. {key1: value1, key2: value2}".to_string(),
            ));
        }
    };

    Ok(params.iter().fold("/".to_string(), |mut path, (_, value)| {
        path.push_str(value);
        path.push('/');
        path
    }))
}
