//! Authorization credential

use std::fmt;

use serde::{Deserialize, Serialize};

/// Token type and secret used to build the `Authorization` header
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Token type, e.g. `Bearer`
    #[serde(rename = "type")]
    pub kind: String,
    /// Token
    #[serde(rename = "token", alias = "secret")]
    pub secret: String,
}

impl Credential {
    /// Create new [`Credential`]
    pub fn new(kind: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            secret: secret.into(),
        }
    }

    /// Bearer credential
    pub fn bearer(secret: impl Into<String>) -> Self {
        Self::new("Bearer", secret)
    }

    /// Value of the `Authorization` header
    pub fn header_value(&self) -> String {
        format!("{} {}", self.kind, self.secret)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("kind", &self.kind)
            .field("secret", &"<redacted>")
            .finish()
    }
}
