//! Base URL middleware.

use std::sync::Arc;

use crate::{Middleware, Next, Request, Response, Result};

/// Middleware that prefixes the request URL.
///
/// The prefix is joined by plain concatenation: no slash is added or
/// removed, so `base("https://api.example.com")` expects URLs starting with
/// `/`.
#[derive(Debug, Clone)]
pub struct BaseUrl {
    prefix: Arc<str>,
}

impl BaseUrl {
    /// The configured prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Middleware for BaseUrl {
    async fn handle(&self, mut request: Request, next: Next) -> Result<Response> {
        request.url.insert_str(0, &self.prefix);
        next.run(request).await
    }
}

/// Prepend `base_url` to every request URL.
pub fn base(base_url: impl Into<String>) -> BaseUrl {
    BaseUrl {
        prefix: Arc::from(base_url.into()),
    }
}
