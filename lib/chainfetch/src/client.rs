//! HTTP transport implementation using hyper-util.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::task::{Context, Poll};

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use tower_service::Service;
use tracing::trace;

use crate::{
    Error, FetchFuture, Method, Request, Response, Result, Transport, TransportConfig,
    connector::https_connector,
};

/// Transport over hyper-util with connection pooling and rustls TLS.
///
/// This is the transport most chains end in. URLs reaching it must be
/// absolute, typically thanks to a [`base`](crate::middleware::base)
/// middleware earlier in the chain.
///
/// # Example
///
/// ```ignore
/// use chainfetch::{HyperTransport, compose, middlewares, middleware::{base, parse_json}};
///
/// let fetch = compose(
///     HyperTransport::new(),
///     middlewares![base("https://api.example.com"), parse_json()],
/// );
/// ```
#[derive(Clone)]
pub struct HyperTransport {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    config: TransportConfig,
}

impl fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HyperTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperTransport {
    /// Create a transport with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TransportConfig::default())
    }

    /// Create a transport with custom configuration.
    #[must_use]
    pub fn with_config(config: TransportConfig) -> Self {
        let connector = https_connector(&config);

        let inner = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(connector);

        Self { inner, config }
    }

    /// Get the transport configuration.
    #[must_use]
    pub const fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Build a hyper request from a request descriptor.
    ///
    /// Headers set by the chain win over the configured defaults.
    fn build_hyper_request(
        request: Request,
        config: &TransportConfig,
    ) -> Result<http::Request<Full<Bytes>>> {
        let (url, options) = request.into_parts();

        let verb = options.method_or_default();
        let method = match Method::from_verb(verb) {
            Some(known) => http::Method::from_bytes(known.as_str().as_bytes()),
            None => http::Method::from_bytes(verb.as_bytes()),
        }
        .map_err(|e| Error::invalid_request(format!("invalid method '{verb}': {e}")))?;

        let mut builder = http::Request::builder().method(method).uri(url.as_str());

        for (name, value) in options.headers.iter().flatten() {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let defaults = config
            .default_headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .chain(
                config
                    .user_agent
                    .as_deref()
                    .map(|agent| ("user-agent", agent)),
            );
        for (name, value) in defaults {
            let present = builder
                .headers_ref()
                .is_some_and(|headers| headers.contains_key(name));
            if !present {
                builder = builder.header(name, value);
            }
        }

        let body = options.body.map_or_else(Full::default, |body| {
            Full::new(Bytes::from(body.into_bytes()))
        });

        builder
            .body(body)
            .map_err(|e| Error::invalid_request(format!("invalid request to '{url}': {e}")))
    }

    /// Extract response headers as a `HashMap`.
    fn extract_headers(headers: &http::HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    async fn execute(&self, request: Request) -> Result<Response> {
        let hyper_request = Self::build_hyper_request(request, &self.config)?;
        trace!(method = %hyper_request.method(), uri = %hyper_request.uri(), "hyper request");

        let exchange = async {
            let response = self
                .inner
                .request(hyper_request)
                .await
                .map_err(Self::map_hyper_error)?;

            let status = response.status().as_u16();
            let headers = Self::extract_headers(response.headers());

            let body = response
                .into_body()
                .collect()
                .await
                .map_err(|e| Error::connection(e.to_string()))?
                .to_bytes();

            Ok::<_, Error>(Response::new(status, headers, body))
        };

        tokio::time::timeout(self.config.timeout, exchange)
            .await
            .map_err(|_| Error::Timeout)?
    }

    #[allow(clippy::needless_pass_by_value)]
    fn map_hyper_error(err: hyper_util::client::legacy::Error) -> Error {
        let msg = err.to_string();

        if err.is_connect() {
            return Error::connection(msg);
        }

        if msg.contains("ssl") || msg.contains("tls") || msg.contains("certificate") {
            return Error::tls(msg);
        }

        Error::connection(msg)
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HyperTransport {
    fn fetch(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        self.execute(request)
    }
}

// ============================================================================
// Tower Service Implementation
// ============================================================================

impl Service<Request> for HyperTransport {
    type Response = Response;
    type Error = Error;
    type Future = FetchFuture<'static>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let transport = self.clone();
        Box::pin(async move { transport.execute(request).await })
    }
}
