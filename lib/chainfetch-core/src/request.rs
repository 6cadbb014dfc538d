//! Request descriptor: the `(url, options)` pair a chain threads toward the
//! transport.
//!
//! # Example
//!
//! ```
//! use chainfetch_core::{Options, Request, set_header};
//!
//! let mut options = Options::default();
//! set_header(&mut options, "Accept", "application/json");
//!
//! let request = Request::new("/users", options);
//! assert_eq!(request.header("Accept"), Some("application/json"));
//! ```

use std::collections::HashMap;

use crate::Method;

/// Per-call request options.
///
/// Every field is optional: a transport applies its own defaults (`GET`, no
/// headers, no body) for whatever is left unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// HTTP verb, compared case-insensitively by consumers.
    pub method: Option<String>,
    /// Request headers. Absent until the first header is set.
    pub headers: Option<HashMap<String, String>>,
    /// Textual request body.
    pub body: Option<String>,
}

impl Options {
    /// Empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with the given method.
    #[must_use]
    pub fn with_method(method: impl Into<String>) -> Self {
        Self {
            method: Some(method.into()),
            ..Self::default()
        }
    }

    /// The method, if one was set.
    #[must_use]
    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    /// The method, or `GET` when none was set.
    #[must_use]
    pub fn method_or_default(&self) -> &str {
        self.method().unwrap_or(Method::Get.as_str())
    }

    /// Single header value by exact (case-sensitive) name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .as_ref()
            .and_then(|headers| headers.get(name))
            .map(String::as_str)
    }

    /// The body, if one was set.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

/// Set a single header on `options`.
///
/// Creates the header map if it is absent, then stores `value` under `name`,
/// replacing any prior value for that exact key. Names are not normalized:
/// `Accept` and `accept` are distinct entries.
pub fn set_header(options: &mut Options, name: impl Into<String>, value: impl Into<String>) {
    options
        .headers
        .get_or_insert_with(HashMap::new)
        .insert(name.into(), value.into());
}

/// A request descriptor: URL plus options.
///
/// Created fresh for every call of a composed fetch and moved through the
/// chain. Each middleware owns the descriptor it receives and hands it on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// Target URL, absolute or relative depending on the chain.
    pub url: String,
    /// Request options.
    pub options: Options,
}

impl Request {
    /// Creates a request descriptor.
    #[must_use]
    pub fn new(url: impl Into<String>, options: Options) -> Self {
        Self {
            url: url.into(),
            options,
        }
    }

    /// Creates a request descriptor with default options.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url, Options::default())
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request options.
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// Mutable access to the options.
    #[must_use]
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    /// The method, if one was set.
    #[must_use]
    pub fn method(&self) -> Option<&str> {
        self.options.method()
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.options.header(name)
    }

    /// Sets a header through [`set_header`].
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        set_header(&mut self.options, name, value);
    }

    /// Consume into (url, options).
    #[must_use]
    pub fn into_parts(self) -> (String, Options) {
        (self.url, self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_header_creates_map() {
        let mut options = Options::default();
        assert!(options.headers.is_none());

        set_header(&mut options, "X-Trace", "abc");

        assert_eq!(options.header("X-Trace"), Some("abc"));
    }

    #[test]
    fn set_header_overwrites_same_name() {
        let mut options = Options::default();
        set_header(&mut options, "X", "v");
        set_header(&mut options, "X", "w");

        assert_eq!(options.header("X"), Some("w"));
        assert_eq!(options.headers.as_ref().map(HashMap::len), Some(1));
    }

    #[test]
    fn set_header_is_case_sensitive() {
        let mut options = Options::default();
        set_header(&mut options, "Accept", "text/plain");
        set_header(&mut options, "accept", "application/json");

        assert_eq!(options.header("Accept"), Some("text/plain"));
        assert_eq!(options.header("accept"), Some("application/json"));
    }

    #[test]
    fn method_defaults_to_get() {
        assert_eq!(Options::default().method_or_default(), "GET");
        assert_eq!(Options::with_method("post").method_or_default(), "post");
    }

    #[test]
    fn request_accessors() {
        let mut request = Request::get("/users");
        request.set_header("Accept", "application/json");
        request.options_mut().body = Some("{}".to_string());

        assert_eq!(request.url(), "/users");
        assert_eq!(request.method(), None);
        assert_eq!(request.header("Accept"), Some("application/json"));
        assert_eq!(request.options().body(), Some("{}"));

        let (url, options) = request.into_parts();
        assert_eq!(url, "/users");
        assert_eq!(options.body(), Some("{}"));
    }
}
