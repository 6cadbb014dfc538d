//! Request metadata middleware.

use tracing::debug;

use crate::{Middleware, Next, Request, RequestInfo, Response, Result};

/// Middleware that records the request on its outcome.
///
/// The URL and options are captured as this middleware sees them, before the
/// rest of the chain runs. On success they are attached to the response
/// ([`Response::request_info`]); on failure the error is wrapped as
/// [`Error::WithRequestInfo`](crate::Error::WithRequestInfo), whatever the
/// original error was.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttachRequestInfo;

impl Middleware for AttachRequestInfo {
    async fn handle(&self, request: Request, next: Next) -> Result<Response> {
        let info = RequestInfo::new(request.url.clone(), request.options.clone());

        match next.run(request).await {
            Ok(mut response) => {
                response.set_request_info(info);
                Ok(response)
            }
            Err(err) => {
                debug!(url = info.request_url(), error = %err, "annotating failed request");
                Err(err.with_request_info(info))
            }
        }
    }
}

/// Attach the request URL and options to the response or error.
#[must_use]
pub const fn request_info() -> AttachRequestInfo {
    AttachRequestInfo
}
