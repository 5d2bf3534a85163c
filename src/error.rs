//! Error types for the gas price integration
//!
//! Every fallible operation in the crate returns [`GasPriceError`]. The
//! refresh path only produces the transport and protocol variants plus
//! whatever the HTTP client reports; the remaining variants belong to
//! configuration and logging setup.

use serde_json::Value;
use thiserror::Error;

/// Result type alias for gas price operations
pub type Result<T> = std::result::Result<T, GasPriceError>;

/// Main error type for the gas price integration
#[derive(Debug, Error)]
pub enum GasPriceError {
    /// The pricing API answered with a status other than 200
    #[error("Transport error: HTTP {status}: {body}")]
    Transport { status: u16, body: String },

    /// The GraphQL payload carried a top-level `errors` list
    #[error("GraphQL error: {}", graphql_messages(.errors))]
    GraphQl { errors: Vec<Value> },

    /// Well-formed HTTP response whose body is not a usable GraphQL payload
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    /// Connection-level failures reported by the HTTP client
    #[error("Network error: {message}")]
    Network { message: String },

    /// Timeout errors
    #[error("Timeout error: {message}")]
    Timeout { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Validation errors
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// File I/O errors
    #[error("I/O error: {message}")]
    Io { message: String },

    /// The fetcher was torn down and has no HTTP client anymore
    #[error("Price fetcher is shut down")]
    Closed,
}

impl GasPriceError {
    /// Create a new transport error
    pub fn transport<S: Into<String>>(status: u16, body: S) -> Self {
        GasPriceError::Transport {
            status,
            body: body.into(),
        }
    }

    /// Create a new GraphQL error from the payload's error list
    pub fn graphql(errors: Vec<Value>) -> Self {
        GasPriceError::GraphQl { errors }
    }

    /// Create a new malformed-response error
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        GasPriceError::MalformedResponse {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        GasPriceError::Network {
            message: message.into(),
        }
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        GasPriceError::Timeout {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        GasPriceError::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        GasPriceError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        GasPriceError::Io {
            message: message.into(),
        }
    }

    /// Non-200 answer from the pricing API
    pub fn is_transport(&self) -> bool {
        matches!(self, GasPriceError::Transport { .. })
    }

    /// HTTP exchange succeeded but the GraphQL payload was unusable
    pub fn is_protocol(&self) -> bool {
        matches!(
            self,
            GasPriceError::GraphQl { .. } | GasPriceError::MalformedResponse { .. }
        )
    }

    /// HTTP status carried by a transport error
    pub fn status(&self) -> Option<u16> {
        match self {
            GasPriceError::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Join the `message` of every GraphQL error, falling back to the raw JSON
fn graphql_messages(errors: &[Value]) -> String {
    if errors.is_empty() {
        return "empty error list".to_string();
    }
    errors
        .iter()
        .map(|e| match e.get("message").and_then(Value::as_str) {
            Some(msg) => msg.to_string(),
            None => e.to_string(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<std::io::Error> for GasPriceError {
    fn from(err: std::io::Error) -> Self {
        GasPriceError::io(err.to_string())
    }
}

impl From<serde_yaml::Error> for GasPriceError {
    fn from(err: serde_yaml::Error) -> Self {
        GasPriceError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for GasPriceError {
    fn from(err: serde_json::Error) -> Self {
        GasPriceError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for GasPriceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GasPriceError::timeout(err.to_string())
        } else {
            GasPriceError::network(err.to_string())
        }
    }
}
