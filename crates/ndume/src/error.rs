//! Error types

use thiserror::Error;

/// Failures raised while talking to the network
///
/// These are produced by a [`Transport`](crate::Transport) and handed to the
/// caller untouched. A non-2xx status is not one of them.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),
    /// Request timeout
    #[error("Request timeout")]
    Timeout,
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Proxy error
    #[error("Proxy error: {0}")]
    Proxy(String),
    /// Request or client could not be built
    #[error("Client build error: {0}")]
    Build(String),
    /// Other error
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            HttpError::Timeout
        } else if err.is_builder() {
            HttpError::Build(err.to_string())
        } else if err.is_connect() {
            HttpError::Connection(err.to_string())
        } else if err.is_decode() {
            HttpError::Serialization(err.to_string())
        } else {
            HttpError::Other(err.to_string())
        }
    }
}

impl From<serde_json::Error> for HttpError {
    fn from(err: serde_json::Error) -> Self {
        HttpError::Serialization(err.to_string())
    }
}

/// Discriminant of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A body-bearing call received no usable body
    InvalidBody,
    /// Params were missing or empty
    InvalidParams,
    /// The network call failed
    Network,
}

/// Errors returned by [`RequestClient`](crate::RequestClient)
#[derive(Debug, Error)]
pub enum Error {
    /// Body missing, falsy or not encodable with the requested encoding
    #[error("Invalid body: {0}")]
    InvalidBody(String),
    /// Params missing or without any key
    #[error("Invalid params: {0}")]
    InvalidParams(String),
    /// Network layer failure
    #[error(transparent)]
    Network(#[from] HttpError),
}

impl Error {
    /// Kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidBody(_) => ErrorKind::InvalidBody,
            Self::InvalidParams(_) => ErrorKind::InvalidParams,
            Self::Network(_) => ErrorKind::Network,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_connection_display() {
        let error = HttpError::Connection("connection refused".to_string());
        assert_eq!(format!("{}", error), "Connection error: connection refused");
    }

    #[test]
    fn test_http_error_timeout_display() {
        let error = HttpError::Timeout;
        assert_eq!(format!("{}", error), "Request timeout");
    }

    #[test]
    fn test_http_error_build_display() {
        let error = HttpError::Build("invalid config".to_string());
        assert_eq!(format!("{}", error), "Client build error: invalid config");
    }

    #[test]
    fn test_from_serde_json_error() {
        let result: Result<String, _> = serde_json::from_str("not valid json");
        let json_error = result.expect_err("Invalid JSON should produce an error");
        let http_error: HttpError = json_error.into();

        match http_error {
            HttpError::Serialization(msg) => {
                assert!(
                    msg.contains("expected"),
                    "Error message should describe JSON error"
                );
            }
            _ => panic!("Expected HttpError::Serialization"),
        }
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(
            Error::InvalidBody("empty".to_string()).kind(),
            ErrorKind::InvalidBody
        );
        assert_eq!(
            Error::InvalidParams("empty".to_string()).kind(),
            ErrorKind::InvalidParams
        );
        assert_eq!(
            Error::from(HttpError::Timeout).kind(),
            ErrorKind::Network
        );
    }

    #[test]
    fn test_network_error_display_is_transparent() {
        let error = Error::from(HttpError::Connection("refused".to_string()));
        assert_eq!(format!("{}", error), "Connection error: refused");
    }

    #[test]
    fn test_invalid_params_display() {
        let error = Error::InvalidParams("no keys".to_string());
        assert_eq!(format!("{}", error), "Invalid params: no keys");
    }
}
