//! # Error Definitions
//!
//! The taxonomy every public operation reports in. The transport only ever
//! signals an opaque failure; each call site classifies it by the operation
//! that was being attempted and keeps it as the error source.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required connection parameter is missing. Fix the configuration.
    #[error("incomplete configuration: {0}")]
    IncompleteConfig(String),

    /// The transport rejected the connection attempt or the connection is gone.
    #[error("connection failed: {message}")]
    ConnectionFailed {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    /// The remote system has no function of that name.
    #[error("unknown function {function}")]
    UnknownFunction {
        function: String,
        #[source]
        source: anyhow::Error,
    },

    /// The remote signature could not be read or mapped.
    #[error("the API of {function} behaved unexpectedly")]
    ApiIntrospection {
        function: String,
        #[source]
        source: anyhow::Error,
    },

    /// A mandatory input was not supplied.
    #[error("missing parameter '{parameter}' for function call '{function}'")]
    MissingParameter { parameter: String, function: String },

    /// The remote call itself failed, or returned a malformed result.
    #[error("function call {function} failed")]
    FunctionCall {
        function: String,
        #[source]
        source: anyhow::Error,
    },
}

impl Error {
    /// True when repeating the same operation unchanged may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::ConnectionFailed { .. })
    }

    pub(crate) fn connection(message: impl Into<String>, source: anyhow::Error) -> Self {
        Error::ConnectionFailed { message: message.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
