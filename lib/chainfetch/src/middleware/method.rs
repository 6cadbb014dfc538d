//! Request method middleware.

use std::sync::Arc;

use crate::{Middleware, Next, Request, Response, Result};

/// Middleware that sets the request method.
#[derive(Debug, Clone)]
pub struct SetMethod {
    verb: Arc<str>,
}

impl SetMethod {
    /// The verb this middleware sets.
    #[must_use]
    pub fn verb(&self) -> &str {
        &self.verb
    }
}

impl Middleware for SetMethod {
    async fn handle(&self, mut request: Request, next: Next) -> Result<Response> {
        request.options.method = Some(self.verb.to_string());
        next.run(request).await
    }
}

/// Set the request method.
///
/// Accepts a verb string or a [`Method`](crate::Method):
///
/// ```ignore
/// use chainfetch::{Method, middleware::method};
///
/// let post = method(Method::Post);
/// let purge = method("PURGE");
/// ```
pub fn method(verb: impl Into<String>) -> SetMethod {
    SetMethod {
        verb: Arc::from(verb.into()),
    }
}
