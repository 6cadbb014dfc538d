//! HTTP response handling.
//!
//! [`Response`] is what a transport resolves with. Response-side middleware
//! annotate it in place: parsed text ([`Response::text_string`]), parsed JSON
//! ([`Response::json_data`]) and the request that produced it
//! ([`Response::request_info`]).

use std::collections::HashMap;

use bytes::Bytes;

use crate::Options;

/// The URL and options a request was issued with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    url: String,
    options: Options,
}

impl RequestInfo {
    /// Creates request metadata.
    #[must_use]
    pub fn new(url: impl Into<String>, options: Options) -> Self {
        Self {
            url: url.into(),
            options,
        }
    }

    /// URL of the request.
    #[must_use]
    pub fn request_url(&self) -> &str {
        &self.url
    }

    /// Options of the request.
    #[must_use]
    pub const fn request_options(&self) -> &Options {
        &self.options
    }
}

/// HTTP response with status, headers, buffered body and annotations.
#[derive(Debug, Clone, Default)]
pub struct Response {
    status: u16,
    headers: HashMap<String, String>,
    body: Bytes,
    text_string: Option<String>,
    json_data: Option<serde_json::Value>,
    request_info: Option<RequestInfo>,
}

impl Response {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
            ..Self::default()
        }
    }

    /// A `200` response with the given body and no headers.
    #[must_use]
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self::new(200, HashMap::new(), body)
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Raw response body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }

    /// Read the body as UTF-8 text.
    ///
    /// The body stays in place, so it can be read again.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid UTF-8.
    pub fn text(&self) -> crate::Result<String> {
        String::from_utf8(self.body.to_vec()).map_err(Into::into)
    }

    /// Deserialize the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> crate::Result<T> {
        crate::from_json(&self.body)
    }

    /// Text payload attached by a text-parsing middleware.
    #[must_use]
    pub fn text_string(&self) -> Option<&str> {
        self.text_string.as_deref()
    }

    /// Attach a parsed text payload.
    pub fn set_text_string(&mut self, text: impl Into<String>) {
        self.text_string = Some(text.into());
    }

    /// JSON payload attached by a JSON-parsing middleware.
    #[must_use]
    pub const fn json_data(&self) -> Option<&serde_json::Value> {
        self.json_data.as_ref()
    }

    /// Attach a parsed JSON payload.
    pub fn set_json_data(&mut self, value: serde_json::Value) {
        self.json_data = Some(value);
    }

    /// Request metadata attached by the request-info middleware.
    #[must_use]
    pub const fn request_info(&self) -> Option<&RequestInfo> {
        self.request_info.as_ref()
    }

    /// URL of the request that produced this response, when annotated.
    #[must_use]
    pub fn request_url(&self) -> Option<&str> {
        self.request_info.as_ref().map(RequestInfo::request_url)
    }

    /// Options of the request that produced this response, when annotated.
    #[must_use]
    pub fn request_options(&self) -> Option<&Options> {
        self.request_info.as_ref().map(RequestInfo::request_options)
    }

    /// Attach request metadata.
    pub fn set_request_info(&mut self, info: RequestInfo) {
        self.request_info = Some(info);
    }
}
