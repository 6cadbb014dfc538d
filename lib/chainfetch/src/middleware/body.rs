//! Request body middleware.
//!
//! Bodies are text. [`body`] only accepts string-like content, and
//! [`body_bytes`] checks raw bytes up front, so a chain can never be
//! built around a non-textual body.

use std::sync::Arc;

use bytes::Bytes;

use crate::{ContentType, Error, Middleware, Next, Options, Request, Response, Result, set_header};

/// Store `content` as the body and describe it with `Content-Type` and
/// `Content-Length`.
///
/// `Content-Length` is the UTF-8 byte length of `content`, i.e. what goes on
/// the wire.
pub(crate) fn attach_body(options: &mut Options, content: &str, content_type: &str) {
    options.body = Some(content.to_string());
    set_header(options, "Content-Type", content_type);
    set_header(options, "Content-Length", content.len().to_string());
}

/// Middleware that attaches a fixed textual body.
#[derive(Debug, Clone)]
pub struct Body {
    content: Arc<str>,
    content_type: Arc<str>,
}

impl Body {
    /// Body content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Body MIME type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

impl Middleware for Body {
    async fn handle(&self, mut request: Request, next: Next) -> Result<Response> {
        attach_body(&mut request.options, &self.content, &self.content_type);
        next.run(request).await
    }
}

/// Attach `content` with the given MIME type.
///
/// `Content-Length` is the UTF-8 byte length of `content`, not its character
/// count: `body("héllo", ..)` sends `Content-Length: 6`.
///
/// # Example
///
/// ```ignore
/// use chainfetch::middleware::body;
///
/// let hello = body("hello", "text/plain");
/// // Content-Type: text/plain, Content-Length: 5
/// ```
pub fn body(content: impl Into<String>, content_type: impl Into<String>) -> Body {
    Body {
        content: Arc::from(content.into()),
        content_type: Arc::from(content_type.into()),
    }
}

/// Attach raw bytes, which must be UTF-8 text.
///
/// # Errors
///
/// Returns [`Error::InvalidBody`] if `content` is not valid UTF-8.
pub fn body_bytes(content: impl Into<Bytes>, content_type: impl Into<String>) -> Result<Body> {
    let content = content.into();
    let text = std::str::from_utf8(&content)
        .map_err(|e| Error::invalid_body(format!("body content must be text: {e}")))?;
    Ok(body(text, content_type))
}

/// Serialize `value` to JSON and attach it as `application/json`.
///
/// Serialization happens here, once, not per request. A string `value` is
/// taken as already-serialized JSON and sent as is, like [`json_raw`].
///
/// # Errors
///
/// Returns an error if `value` cannot be serialized.
pub fn json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Body> {
    let serialized = crate::to_json(value)?;
    // Only a string serializes to a leading quote
    let content = if serialized.starts_with('"') {
        serde_json::from_str::<String>(&serialized)?
    } else {
        serialized
    };
    Ok(json_raw(content))
}

/// Attach an already-serialized JSON string as `application/json`.
pub fn json_raw(serialized: impl Into<String>) -> Body {
    body(serialized, ContentType::Json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_body_sets_headers() {
        let mut options = Options::default();
        attach_body(&mut options, "hello", "text/plain");

        assert_eq!(options.body(), Some("hello"));
        assert_eq!(options.header("Content-Type"), Some("text/plain"));
        assert_eq!(options.header("Content-Length"), Some("5"));
    }

    #[test]
    fn content_length_counts_utf8_bytes() {
        let mut options = Options::default();
        attach_body(&mut options, "héllo", "text/plain");

        assert_eq!(options.header("Content-Length"), Some("6"));
    }

    #[test]
    fn body_bytes_accepts_text() {
        let body = body_bytes(Bytes::from_static(b"abc"), "text/plain").expect("text");
        assert_eq!(body.content(), "abc");
    }

    #[test]
    fn body_bytes_rejects_non_text() {
        let err = body_bytes(vec![0xff, 0x00, 0xfe], "application/octet-stream")
            .expect_err("not text");
        assert!(matches!(err, Error::InvalidBody(_)));
    }

    #[test]
    fn json_serializes_once() {
        #[derive(serde::Serialize)]
        struct User {
            name: &'static str,
        }

        let body = json(&User { name: "Alice" }).expect("serialize");
        assert_eq!(body.content(), r#"{"name":"Alice"}"#);
        assert_eq!(body.content_type(), "application/json");
    }

    #[test]
    fn json_takes_strings_as_serialized() {
        let body = json(r#"{"a":1}"#).expect("str");
        assert_eq!(body.content(), r#"{"a":1}"#);

        let body = json(&"[1,2]".to_string()).expect("String");
        assert_eq!(body.content(), "[1,2]");
        assert_eq!(body.content_type(), "application/json");
    }

    #[test]
    fn json_raw_keeps_string() {
        let body = json_raw(r#"{"already":"json"}"#);
        assert_eq!(body.content(), r#"{"already":"json"}"#);
    }
}
