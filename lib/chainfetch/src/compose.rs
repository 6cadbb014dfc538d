//! Middleware composition.
//!
//! [`compose`] folds an ordered list of middleware around a [`Transport`]
//! into a single [`ComposedFetch`]. The fold runs right to left: the last
//! middleware wraps the transport, the one before it wraps that, and so on,
//! so the first middleware in the list is the outermost.
//!
//! Calling the result runs request-side logic in list order and
//! response-side logic (anything after `next.run(..).await`) in reverse list
//! order:
//!
//! ```text
//! compose(t, [a, b, c])
//!
//!   a ─▶ b ─▶ c ─▶ t
//!   a ◀─ b ◀─ c ◀─ t
//! ```
//!
//! # Example
//!
//! ```ignore
//! use chainfetch::{compose, middlewares, middleware::{base, method, parse_json}};
//!
//! let fetch = compose(
//!     HyperTransport::new(),
//!     middlewares![base("https://api.example.com"), method("GET"), parse_json()],
//! );
//! let response = fetch.get("/users/1").await?;
//! ```

use std::any::type_name;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::task::{Context, Poll};

use tower_service::Service;
use tracing::debug;

use crate::{FetchFuture, Options, Request, Response, Result, Transport};

// ============================================================================
// Middleware Contract
// ============================================================================

/// A composable unit wrapping one call of the chain.
///
/// A middleware receives the request descriptor and the rest of the chain
/// ([`Next`]). It must do exactly one of:
/// - call `next.run(request)` once and return (or post-process) its result,
/// - return a response or error without calling `next` (short-circuit).
///
/// [`Next`] is consumed by [`Next::run`], so calling through twice does not
/// compile.
///
/// # Example
///
/// ```ignore
/// use chainfetch::{Middleware, Next, Request, Response, Result};
///
/// struct Stamp;
///
/// impl Middleware for Stamp {
///     async fn handle(&self, mut request: Request, next: Next) -> Result<Response> {
///         request.set_header("X-Stamp", "1");
///         next.run(request).await
///     }
/// }
/// ```
pub trait Middleware: Send + Sync + 'static {
    /// Process one call of the chain.
    fn handle(
        &self,
        request: Request,
        next: Next,
    ) -> impl Future<Output = Result<Response>> + Send;
}

trait ErasedMiddleware: Send + Sync {
    fn handle_boxed(&self, request: Request, next: Next) -> FetchFuture<'_>;

    fn name(&self) -> &'static str;
}

impl<M: Middleware> ErasedMiddleware for M {
    fn handle_boxed(&self, request: Request, next: Next) -> FetchFuture<'_> {
        Box::pin(self.handle(request, next))
    }

    fn name(&self) -> &'static str {
        type_name::<M>()
    }
}

/// Type-erased middleware, so that differently typed middleware can share
/// one list.
#[derive(Clone)]
pub struct AnyMiddleware(Arc<dyn ErasedMiddleware>);

impl AnyMiddleware {
    /// Erase the type of `middleware`.
    pub fn new(middleware: impl Middleware) -> Self {
        Self(Arc::new(middleware))
    }

    /// Type name of the wrapped middleware.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.0.name()
    }
}

impl fmt::Debug for AnyMiddleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnyMiddleware[{}]", self.name())
    }
}

impl Middleware for AnyMiddleware {
    fn handle(
        &self,
        request: Request,
        next: Next,
    ) -> impl Future<Output = Result<Response>> + Send {
        self.0.handle_boxed(request, next)
    }
}

/// Build a `Vec<AnyMiddleware>` from middleware of mixed types.
///
/// ```ignore
/// let list = middlewares![method("POST"), json(&payload)?, parse_json()];
/// ```
#[macro_export]
macro_rules! middlewares {
    ($($middleware:expr),* $(,)?) => {
        ::std::vec![$($crate::AnyMiddleware::new($middleware)),*]
    };
}

// ============================================================================
// Chain Links
// ============================================================================

trait Link: Send + Sync {
    fn call(&self, request: Request) -> FetchFuture<'_>;
}

/// Innermost link: the base transport.
struct Endpoint<T>(T);

impl<T: Transport> Link for Endpoint<T> {
    fn call(&self, request: Request) -> FetchFuture<'_> {
        Box::pin(self.0.fetch(request))
    }
}

/// One fold step: `(request) => middleware(next, request)`.
struct Layered {
    middleware: AnyMiddleware,
    next: Arc<dyn Link>,
}

impl Link for Layered {
    fn call(&self, request: Request) -> FetchFuture<'_> {
        let next = Next {
            link: Arc::clone(&self.next),
        };
        self.middleware.0.handle_boxed(request, next)
    }
}

/// The remainder of a chain, as seen from one middleware.
pub struct Next {
    link: Arc<dyn Link>,
}

impl Next {
    /// Hand the request to the rest of the chain.
    pub async fn run(self, request: Request) -> Result<Response> {
        self.link.call(request).await
    }
}

impl fmt::Debug for Next {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next").finish_non_exhaustive()
    }
}

// ============================================================================
// Composition
// ============================================================================

/// Fold `middlewares` around `transport`.
///
/// The first middleware is the outermost wrapper: its request-side logic runs
/// first and its response-side logic runs last. An empty list yields a fetch
/// that behaves exactly like `transport`.
pub fn compose<T, I>(transport: T, middlewares: I) -> ComposedFetch
where
    T: Transport + 'static,
    I: IntoIterator<Item = AnyMiddleware>,
{
    let middlewares: Vec<AnyMiddleware> = middlewares.into_iter().collect();
    let len = middlewares.len();

    let endpoint: Arc<dyn Link> = Arc::new(Endpoint(transport));
    let head = middlewares
        .into_iter()
        .rev()
        .fold(endpoint, |next, middleware| -> Arc<dyn Link> {
            Arc::new(Layered { middleware, next })
        });

    ComposedFetch { head, len }
}

/// Builder alternative to [`compose`].
///
/// # Example
///
/// ```ignore
/// let fetch = Compose::new(transport)
///     .with(base("https://api.example.com"))
///     .with(auth("token"))
///     .build();
/// ```
pub struct Compose<T> {
    transport: T,
    middlewares: Vec<AnyMiddleware>,
}

impl<T> fmt::Debug for Compose<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compose")
            .field("transport", &type_name::<T>())
            .field("middlewares", &self.middlewares)
            .finish()
    }
}

impl<T: Transport + 'static> Compose<T> {
    /// Start a chain ending in `transport`.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            middlewares: Vec::new(),
        }
    }

    /// Append a middleware. Middleware added first runs first.
    #[must_use]
    pub fn with(mut self, middleware: impl Middleware) -> Self {
        self.middlewares.push(AnyMiddleware::new(middleware));
        self
    }

    /// Fold the chain.
    #[must_use]
    pub fn build(self) -> ComposedFetch {
        compose(self.transport, self.middlewares)
    }
}

/// A transport wrapped in middleware.
///
/// Cheap to clone; the chain is shared and never changes once built.
#[derive(Clone)]
pub struct ComposedFetch {
    head: Arc<dyn Link>,
    len: usize,
}

impl fmt::Debug for ComposedFetch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposedFetch")
            .field("middlewares", &self.len)
            .finish_non_exhaustive()
    }
}

impl ComposedFetch {
    /// Number of middleware in the chain.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the chain has no middleware.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Run the chain for a prepared request descriptor.
    pub fn execute(&self, request: Request) -> FetchFuture<'_> {
        debug!(url = %request.url, middlewares = self.len, "composed fetch");
        self.head.call(request)
    }

    /// Run the chain for `url` with `options`.
    pub async fn fetch(&self, url: impl Into<String>, options: Options) -> Result<Response> {
        self.execute(Request::new(url, options)).await
    }

    /// Run the chain for `url` with default options.
    pub async fn get(&self, url: impl Into<String>) -> Result<Response> {
        self.execute(Request::get(url)).await
    }
}

impl Transport for ComposedFetch {
    fn fetch(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        self.execute(request)
    }
}

impl Service<Request> for ComposedFetch {
    type Response = Response;
    type Error = crate::Error;
    type Future = FetchFuture<'static>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let fetch = self.clone();
        Box::pin(async move { fetch.execute(request).await })
    }
}
