//! Request/response logging middleware.
//!
//! This middleware logs requests and their outcome using the `tracing` crate.
//! Its position in the chain decides what it sees: placed last it logs the
//! request exactly as the transport receives it.

use std::time::Instant;

use tracing::{Instrument, Level, debug, info, span, warn};

use crate::{Middleware, Next, Request, Response, Result};

/// Log level for the logging middleware.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Log at debug level (request/response details).
    Debug,
    /// Log at info level (summary only).
    #[default]
    Info,
}

/// Middleware that logs requests and responses.
///
/// # Example
///
/// ```ignore
/// use chainfetch::middleware::logging;
///
/// let fetch = Compose::new(transport)
///     .with(base("https://api.example.com"))
///     .with(logging())
///     .build();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Logging {
    level: LogLevel,
}

impl Logging {
    /// Create a logging middleware with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log at debug level, including headers and body size.
    #[must_use]
    pub const fn debug(mut self) -> Self {
        self.level = LogLevel::Debug;
        self
    }

    /// Configured level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

impl Middleware for Logging {
    async fn handle(&self, request: Request, next: Next) -> Result<Response> {
        let method = request.options.method_or_default().to_string();
        let url = request.url.clone();
        let span = span!(Level::INFO, "fetch", %method, %url);

        async move {
            let start = Instant::now();

            match self.level {
                LogLevel::Debug => {
                    debug!(
                        method = %method,
                        url = %url,
                        headers = ?request.options.headers,
                        body_len = request.options.body().map_or(0, str::len),
                        "sending request"
                    );
                }
                LogLevel::Info => {
                    info!(method = %method, url = %url, "sending request");
                }
            }

            let result = next.run(request).await;

            // Saturating conversion to u64 (truncates after ~584 million years)
            let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            match &result {
                Ok(response) => {
                    let status = response.status();
                    if response.is_success() {
                        info!(status, elapsed_ms, "request completed");
                    } else {
                        warn!(status, elapsed_ms, "request completed with HTTP error");
                    }
                }
                Err(err) => {
                    warn!(error = %err, elapsed_ms, "request failed");
                }
            }

            result
        }
        .instrument(span)
        .await
    }
}

/// Log every request at info level.
#[must_use]
pub fn logging() -> Logging {
    Logging::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_default() {
        assert_eq!(logging().level(), LogLevel::Info);
    }

    #[test]
    fn logging_debug() {
        assert_eq!(logging().debug().level(), LogLevel::Debug);
    }
}
