//! Response parsing middleware.
//!
//! Both run after the rest of the chain resolves and annotate the same
//! response they received: [`parse_text`] sets
//! [`Response::text_string`], [`parse_json`] sets [`Response::json_data`].

use crate::{Error, Middleware, Next, Request, Response, Result};

/// Middleware that reads the response body as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseText;

impl Middleware for ParseText {
    async fn handle(&self, request: Request, next: Next) -> Result<Response> {
        let mut response = next.run(request).await?;
        let text = response.text()?;
        response.set_text_string(text);
        Ok(response)
    }
}

/// Attach the response body as text.
///
/// Fails with [`Error::TextDecode`] if the body is not UTF-8.
#[must_use]
pub const fn parse_text() -> ParseText {
    ParseText
}

/// Middleware that parses the response body as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseJson;

impl Middleware for ParseJson {
    async fn handle(&self, request: Request, next: Next) -> Result<Response> {
        let mut response = next.run(request).await?;
        let value = serde_json::from_slice(response.body()).map_err(Error::json_parse)?;
        response.set_json_data(value);
        Ok(response)
    }
}

/// Attach the response body parsed as JSON.
///
/// A body that is not JSON fails with [`Error::JsonParse`]; the parser's own
/// error stays reachable through [`std::error::Error::source`].
#[must_use]
pub const fn parse_json() -> ParseJson {
    ParseJson
}
