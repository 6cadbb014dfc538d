//! Core types and contracts for the chainfetch middleware composition layer.
//!
//! This crate provides the foundational types used by chainfetch:
//! - [`Request`] and [`Options`] - The request descriptor threaded through a chain
//! - [`set_header`] - Lazily create the header map and set one header
//! - [`Response`] and [`RequestInfo`] - Response type and its annotations
//! - [`Transport`] - The fetch contract every chain ends in
//! - [`Error`] and [`Result`] - Error handling
//! - [`Method`] and [`ContentType`] - Common verbs and MIME types
//! - [`to_query_string`], [`to_json`], [`from_json`] - Serializers

mod body;
mod client;
mod error;
mod method;
pub mod prelude;
mod request;
mod response;

pub use body::{ContentType, from_json, to_json, to_query_string};
pub use client::{FetchFuture, Transport};
pub use error::{Error, Result};
pub use method::Method;
pub use request::{Options, Request, set_header};
pub use response::{RequestInfo, Response};
