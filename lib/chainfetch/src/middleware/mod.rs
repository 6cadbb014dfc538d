//! The middleware catalog.
//!
//! Each factory returns a small struct holding its configuration and
//! implementing [`Middleware`](crate::Middleware). Configuration is fixed at
//! construction; per-call state lives in the [`Request`](crate::Request)
//! moving through the chain.
//!
//! # Request side
//!
//! | Factory | Effect |
//! |---------|--------|
//! | [`method`] | Sets the request method |
//! | [`header`] | Sets one header |
//! | [`auth`] | Sets `Authorization` verbatim |
//! | [`bearer_auth`] | Sets `Authorization: Bearer <token>` |
//! | [`accept`] | Sets `Accept` |
//! | [`base`] | Prefixes the URL |
//! | [`query`], [`query_raw`] | Appends a query string to the URL |
//! | [`body`], [`body_bytes`] | Attaches a text body with `Content-Type` and `Content-Length` |
//! | [`json`], [`json_raw`] | Attaches an `application/json` body |
//! | [`params`], [`params_raw`] | Query string for `GET`/`HEAD`, form body otherwise |
//!
//! # Response side
//!
//! | Factory | Effect |
//! |---------|--------|
//! | [`parse_text`] | Stores the body text on the response |
//! | [`parse_json`] | Stores the parsed JSON body on the response |
//! | [`request_info`] | Stores the request URL and options on the response or error |
//!
//! # Other
//!
//! - [`logging`] - Logs requests and outcomes with `tracing`
//! - [`from_fn`] - Middleware from an async closure

mod base;
mod body;
mod from_fn;
mod header;
mod logging;
mod method;
mod parse;
mod query;
mod request_info;

pub use base::{BaseUrl, base};
pub use body::{Body, body, body_bytes, json, json_raw};
pub use from_fn::{FromFn, from_fn};
pub use header::{SetHeader, accept, auth, bearer_auth, header};
pub use logging::{LogLevel, Logging, logging};
pub use method::{SetMethod, method};
pub use parse::{ParseJson, ParseText, parse_json, parse_text};
pub use query::{Params, Query, params, params_raw, query, query_raw};
pub use request_info::{AttachRequestInfo, request_info};
