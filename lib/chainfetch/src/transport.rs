//! Transport adapters.
//!
//! - [`ServiceTransport`] - Any tower [`Service`] as a [`Transport`]
//! - [`transport_fn`] - An async closure as a [`Transport`]

use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex};

use tower::ServiceExt;
use tower_service::Service;

use crate::{Error, Request, Response, Result, Transport};

/// A tower service used as the transport of a chain.
///
/// The service only has to be `Send`: it is kept behind a mutex and cloned
/// for every call, so boxed services such as
/// [`BoxCloneService`](tower::util::BoxCloneService) fit.
///
/// # Example
///
/// ```ignore
/// use chainfetch::{ServiceTransport, compose};
/// use tower::ServiceBuilder;
///
/// let service = ServiceBuilder::new()
///     .concurrency_limit(4)
///     .service(HyperTransport::new());
/// let fetch = compose(ServiceTransport::new(service), vec![]);
/// ```
pub struct ServiceTransport<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> Clone for ServiceTransport<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> fmt::Debug for ServiceTransport<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceTransport")
            .field("service", &std::any::type_name::<S>())
            .finish()
    }
}

impl<S> ServiceTransport<S> {
    /// Wrap `service`.
    pub fn new(service: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }
}

impl<S> Transport for ServiceTransport<S>
where
    S: Service<Request, Response = Response, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    fn fetch(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        // Lock, clone the service, and release the lock immediately
        let service = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone();

        service.oneshot(request)
    }
}

/// Transport built from an async closure. See [`transport_fn`].
#[derive(Clone)]
pub struct TransportFn<F> {
    f: F,
}

impl<F> fmt::Debug for TransportFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportFn")
            .field("f", &std::any::type_name::<F>())
            .finish()
    }
}

impl<F, Fut> Transport for TransportFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response>> + Send,
{
    fn fetch(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        (self.f)(request)
    }
}

/// Turn an async closure `(request) -> Result<Response>` into a transport.
///
/// Handy for stubs and tests:
///
/// ```ignore
/// use chainfetch::{Response, transport_fn};
///
/// let stub = transport_fn(|request| async move { Ok(Response::ok(request.url)) });
/// ```
pub fn transport_fn<F, Fut>(f: F) -> TransportFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response>> + Send,
{
    TransportFn { f }
}
