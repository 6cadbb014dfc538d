//! Prelude module for convenient imports.
//!
//! ```ignore
//! use chainfetch::prelude::*;
//! ```

#[cfg(feature = "hyper")]
pub use crate::HyperTransport;
pub use crate::{
    AnyMiddleware, Compose, ComposedFetch, Error, Method, Middleware, Next, Options, Request,
    Response, Result, Transport, compose, middlewares, set_header,
};
