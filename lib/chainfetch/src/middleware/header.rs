//! Header middleware.
//!
//! [`header`] sets one header on every request passing through. [`auth`],
//! [`bearer_auth`] and [`accept`] are presets for the common ones.

use std::sync::Arc;

use crate::{Middleware, Next, Request, Response, Result, set_header};

/// Middleware that sets a single request header.
///
/// Later header middleware for the same name win: the value closest to the
/// transport is the one sent.
///
/// # Example
///
/// ```ignore
/// use chainfetch::middleware::header;
///
/// let fetch = Compose::new(transport)
///     .with(header("X-Request-Id", "42"))
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct SetHeader {
    name: Arc<str>,
    value: Arc<str>,
}

impl SetHeader {
    /// Create a header middleware.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Arc::from(name.into()),
            value: Arc::from(value.into()),
        }
    }

    /// Header name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Header value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Middleware for SetHeader {
    async fn handle(&self, mut request: Request, next: Next) -> Result<Response> {
        set_header(&mut request.options, &*self.name, &*self.value);
        next.run(request).await
    }
}

/// Set `name: value` on every request.
pub fn header(name: impl Into<String>, value: impl Into<String>) -> SetHeader {
    SetHeader::new(name, value)
}

/// Set the `Authorization` header to `credentials` verbatim.
pub fn auth(credentials: impl Into<String>) -> SetHeader {
    SetHeader::new("Authorization", credentials)
}

/// Set `Authorization: Bearer <token>`.
pub fn bearer_auth(token: impl AsRef<str>) -> SetHeader {
    SetHeader::new("Authorization", format!("Bearer {}", token.as_ref()))
}

/// Set the `Accept` header.
pub fn accept(content_type: impl Into<String>) -> SetHeader {
    SetHeader::new("Accept", content_type)
}
