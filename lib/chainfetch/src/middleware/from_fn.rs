//! Closure-backed middleware.

use std::fmt;
use std::future::Future;

use crate::{Middleware, Next, Request, Response, Result};

/// Middleware built from an async closure. See [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F> {
    f: F,
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn")
            .field("f", &std::any::type_name::<F>())
            .finish()
    }
}

impl<F, Fut> Middleware for FromFn<F>
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response>> + Send,
{
    fn handle(
        &self,
        request: Request,
        next: Next,
    ) -> impl Future<Output = Result<Response>> + Send {
        (self.f)(request, next)
    }
}

/// Turn an async closure `(request, next) -> Result<Response>` into a
/// middleware.
///
/// # Example
///
/// ```ignore
/// use chainfetch::middleware::from_fn;
///
/// let stamp = from_fn(|mut request, next| async move {
///     request.set_header("X-Stamp", "1");
///     next.run(request).await
/// });
/// ```
pub fn from_fn<F, Fut>(f: F) -> FromFn<F>
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response>> + Send,
{
    FromFn { f }
}
