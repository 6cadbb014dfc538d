//! Query string and parameter middleware.
//!
//! [`query`] always appends to the URL. [`params`] picks the URL or the body
//! depending on the request method at the time it runs, so it has to come
//! *after* any [`method`](super::method) middleware in the chain:
//!
//! ```ignore
//! // POST with a form body
//! middlewares![method("POST"), params(&form)?]
//!
//! // GET with a query string: `params` ran before `method`
//! middlewares![params(&form)?, method("POST")]
//! ```

use std::sync::Arc;

use tracing::trace;

use super::body::attach_body;
use crate::{ContentType, Error, Method, Middleware, Next, Request, Response, Result};

/// Append `query` to `url`, with `?` if the URL has none yet, `&` otherwise.
pub(crate) fn append_query(url: &mut String, query: &str) {
    url.push(if url.contains('?') { '&' } else { '?' });
    url.push_str(query);
}

/// Middleware that appends a fixed query string to the URL.
#[derive(Debug, Clone)]
pub struct Query {
    query: Arc<str>,
}

impl Query {
    /// The encoded query string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.query
    }
}

impl Middleware for Query {
    async fn handle(&self, mut request: Request, next: Next) -> Result<Response> {
        append_query(&mut request.url, &self.query);
        next.run(request).await
    }
}

/// Append the query-string encoding of `value` to every request URL.
///
/// A string `value` is used as is, like [`query_raw`].
///
/// # Errors
///
/// Returns an error if `value` is neither a string nor a map or struct of
/// scalar fields.
///
/// # Example
///
/// ```ignore
/// use std::collections::BTreeMap;
/// use chainfetch::middleware::query;
///
/// let page = query(&[("page", 2)])?;
/// // "/users" -> "/users?page=2"
/// ```
pub fn query<T: serde::Serialize + ?Sized>(value: &T) -> Result<Query> {
    let query = crate::to_query_string(value)?;
    Ok(query_raw(query))
}

/// Append an already-encoded query string, untouched.
pub fn query_raw(query: impl Into<String>) -> Query {
    Query {
        query: Arc::from(query.into()),
    }
}

/// Middleware that sends parameters in the query string or the body,
/// depending on the request method.
///
/// For `GET` and `HEAD` (compared ignoring case) the parameters go to the
/// query string. For any other method they become an
/// `application/x-www-form-urlencoded` body. A request without a method
/// counts as `GET`, unless [`Params::require_method`] is set.
#[derive(Debug, Clone)]
pub struct Params {
    encoded: Arc<str>,
    require_method: bool,
}

impl Params {
    /// Fail with [`Error::InvalidRequest`] instead of assuming `GET` when no
    /// earlier middleware set a method.
    #[must_use]
    pub const fn require_method(mut self) -> Self {
        self.require_method = true;
        self
    }

    /// The encoded parameters.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.encoded
    }
}

impl Middleware for Params {
    async fn handle(&self, mut request: Request, next: Next) -> Result<Response> {
        let verb = match request.options.method() {
            Some(verb) => verb,
            None if self.require_method => {
                return Err(Error::invalid_request(
                    "params needs a method set by an earlier middleware",
                ));
            }
            None => Method::Get.as_str(),
        };

        if Method::from_verb(verb).is_some_and(|method| method.uses_query()) {
            trace!(verb, "params sent as query string");
            append_query(&mut request.url, &self.encoded);
        } else {
            trace!(verb, "params sent as form body");
            let content_type = ContentType::FormUrlEncoded.as_str();
            attach_body(&mut request.options, &self.encoded, content_type);
        }

        next.run(request).await
    }
}

/// Send `value` as query string or form body, depending on the method.
///
/// `value` is encoded once, here. A string `value` is taken as already
/// encoded, like [`params_raw`].
///
/// # Errors
///
/// Returns an error if `value` cannot be encoded as a query string.
pub fn params<T: serde::Serialize + ?Sized>(value: &T) -> Result<Params> {
    let encoded = crate::to_query_string(value)?;
    Ok(params_raw(encoded))
}

/// Send already-encoded parameters as query string or form body, untouched.
pub fn params_raw(encoded: impl Into<String>) -> Params {
    Params {
        encoded: Arc::from(encoded.into()),
        require_method: false,
    }
}
