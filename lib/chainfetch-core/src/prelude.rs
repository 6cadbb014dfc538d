//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use chainfetch_core::prelude::*;
//! ```

pub use crate::{
    ContentType, Error, Method, Options, Request, RequestInfo, Response, Result, Transport,
    set_header, to_json, to_query_string,
};
