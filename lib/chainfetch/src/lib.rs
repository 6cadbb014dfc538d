//! Compose a customized fetch from reusable middleware.
//!
//! A chain is an ordered list of [`Middleware`] folded around a
//! [`Transport`]. Each middleware handles one concern: setting the method or
//! a header, prefixing the URL, attaching a body, parsing the response, and
//! so on. The result, a [`ComposedFetch`], is called like the transport
//! itself.
//!
//! # Example
//!
//! ```ignore
//! use chainfetch::prelude::*;
//! use chainfetch::middleware::{accept, base, method, params, parse_json};
//!
//! let fetch = compose(
//!     HyperTransport::new(),
//!     middlewares![
//!         base("https://api.example.com"),
//!         accept("application/json"),
//!         method("POST"),
//!         params(&[("name", "Alice")])?,
//!         parse_json(),
//!     ],
//! );
//!
//! let response = fetch.get("/users").await?;
//! let created = response.json_data();
//! ```
//!
//! # Ordering
//!
//! Request-side logic runs in list order, response-side logic in reverse
//! list order. Order matters for [`middleware::params`], which reads the
//! method set by an earlier [`middleware::method`].

#[cfg(feature = "hyper")]
mod client;
mod compose;
#[cfg(feature = "hyper")]
mod config;
#[cfg(feature = "hyper")]
mod connector;
pub mod middleware;
pub mod prelude;
mod transport;

// Re-export composition types
pub use compose::{AnyMiddleware, Compose, ComposedFetch, Middleware, Next, compose};
pub use transport::{ServiceTransport, TransportFn, transport_fn};

// Re-export the bundled transport
#[cfg(feature = "hyper")]
pub use client::HyperTransport;
#[cfg(feature = "hyper")]
pub use config::{DEFAULT_USER_AGENT, TransportConfig, TransportConfigBuilder};

// Re-export tower for service composition
pub use tower;

// Re-export core types
pub use chainfetch_core::{
    ContentType, Error, FetchFuture, Method, Options, Request, RequestInfo, Response, Result,
    Transport, from_json, set_header, to_json, to_query_string,
};
