//! Error types for chainfetch.

use derive_more::{Display, Error, From};

use crate::{Options, RequestInfo};

/// Main error type for chainfetch operations.
///
/// Errors raised anywhere in a chain surface to the caller unchanged, except
/// where a middleware deliberately wraps them (see
/// [`Error::WithRequestInfo`]).
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// A transport failure that carries no detail.
    #[display("request failed")]
    #[from(skip)]
    Unspecified,

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// Request body content is not text.
    #[display("invalid body: {_0}")]
    #[from(skip)]
    InvalidBody(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
    },

    /// The response body could not be parsed as JSON.
    #[display("invalid JSON response body: {message}")]
    #[from(skip)]
    JsonParse {
        /// Diagnostic of the underlying parser.
        message: String,
        /// The parser error.
        source: serde_json::Error,
    },

    /// The response body is not valid UTF-8.
    #[display("response body is not valid UTF-8: {_0}")]
    #[from]
    TextDecode(std::string::FromUtf8Error),

    /// Query string serialization error.
    #[display("query serialization error: {_0}")]
    #[from]
    QuerySerialization(serde_html_form::ser::Error),

    /// An error annotated with the request that caused it.
    #[display("request to '{}' failed: {source}", info.request_url())]
    #[from(skip)]
    WithRequestInfo {
        /// The failed request.
        #[error(not(source))]
        info: RequestInfo,
        /// The original error.
        source: Box<Error>,
    },
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create an invalid body error.
    #[must_use]
    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::InvalidBody(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Wrap a JSON parser failure, keeping it as the source.
    #[must_use]
    pub fn json_parse(source: serde_json::Error) -> Self {
        Self::JsonParse {
            message: source.to_string(),
            source,
        }
    }

    /// Annotate this error with the request that caused it.
    ///
    /// An error that is already annotated gets its metadata replaced rather
    /// than wrapped twice.
    #[must_use]
    pub fn with_request_info(self, info: RequestInfo) -> Self {
        let source = match self {
            Self::WithRequestInfo { source, .. } => source,
            other => Box::new(other),
        };
        Self::WithRequestInfo { info, source }
    }

    /// Request metadata, if this error was annotated.
    #[must_use]
    pub const fn request_info(&self) -> Option<&RequestInfo> {
        match self {
            Self::WithRequestInfo { info, .. } => Some(info),
            _ => None,
        }
    }

    /// URL of the failed request, if this error was annotated.
    #[must_use]
    pub fn request_url(&self) -> Option<&str> {
        self.request_info().map(RequestInfo::request_url)
    }

    /// Options of the failed request, if this error was annotated.
    #[must_use]
    pub fn request_options(&self) -> Option<&Options> {
        self.request_info().map(RequestInfo::request_options)
    }

    /// The error beneath any request annotation.
    #[must_use]
    pub fn inner(&self) -> &Self {
        match self {
            Self::WithRequestInfo { source, .. } => source.inner(),
            other => other,
        }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self.inner(), Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self.inner(), Self::Connection(_))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn error_display() {
        let err = Error::Timeout;
        assert_eq!(err.to_string(), "request timeout");

        let err = Error::connection("failed to connect");
        assert_eq!(err.to_string(), "connection error: failed to connect");

        let err = Error::invalid_body("not text");
        assert_eq!(err.to_string(), "invalid body: not text");
    }

    #[test]
    fn error_kind_queries_see_through_annotation() {
        let info = RequestInfo::new("/x", Options::default());
        let err = Error::connection("refused").with_request_info(info);

        assert!(err.is_connection());
        assert!(!err.is_timeout());
    }

    #[test]
    fn json_parse_keeps_source() {
        let parse_err =
            serde_json::from_str::<serde_json::Value>("{oops").expect_err("invalid json");
        let expected = parse_err.to_string();

        let err = Error::json_parse(parse_err);

        assert!(err.to_string().contains("JSON"));
        assert!(err.to_string().contains(&expected));
        let source = err.source().expect("source");
        assert!(source.is::<serde_json::Error>());
    }

    #[test]
    fn request_info_annotation() {
        let info = RequestInfo::new("/users", Options::with_method("DELETE"));
        let err = Error::Timeout.with_request_info(info);

        assert_eq!(err.request_url(), Some("/users"));
        assert_eq!(
            err.request_options().and_then(Options::method),
            Some("DELETE")
        );
        assert!(err.is_timeout());
        assert_eq!(
            err.to_string(),
            "request to '/users' failed: request timeout"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn request_info_annotation_does_not_nest() {
        let first = RequestInfo::new("/a", Options::default());
        let second = RequestInfo::new("/b", Options::default());

        let err = Error::Unspecified
            .with_request_info(first)
            .with_request_info(second);

        assert_eq!(err.request_url(), Some("/b"));
        assert!(matches!(err.inner(), Error::Unspecified));
    }

    #[test]
    fn unannotated_error_has_no_request_info() {
        assert!(Error::Unspecified.request_url().is_none());
        assert!(Error::Unspecified.request_options().is_none());
    }
}
