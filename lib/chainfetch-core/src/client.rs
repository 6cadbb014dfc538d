//! The transport contract.
//!
//! A [`Transport`] performs the actual network call. It is the innermost
//! link of every middleware chain, and a composed chain is itself a
//! transport.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::{Request, Response, Result};

/// Boxed future returned by type-erased transports and middleware.
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<Response>> + Send + 'a>>;

/// Core fetch contract: `(url, options) -> future of response`.
///
/// Implementations own retries, timeouts and connection management; the
/// composition layer adds none of those.
pub trait Transport: Send + Sync {
    /// Execute a request and resolve with its response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any reason:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    /// - Invalid request descriptor
    fn fetch(&self, request: Request) -> impl Future<Output = Result<Response>> + Send;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn fetch(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        (**self).fetch(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn fetch(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        (**self).fetch(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn fetch(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        (**self).fetch(request)
    }
}
