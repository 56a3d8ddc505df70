//! Response descriptor and serialization.
//!
//! Handlers stay pure: they produce a [`Reply`] (status, content type,
//! body) and never touch the socket. `into_bytes` is the single place the
//! textual HTTP response is assembled.

use crate::http::types::{ContentType, StatusCode};

/// One complete response: status line, a single `Content-Type` header, and
/// the body. Created per request, serialized once, then discarded.
///
/// # Examples
/// ```
/// use funweb::{Reply, StatusCode};
///
/// let reply = Reply::html(StatusCode::Ok, "Result is: 12");
/// let bytes = reply.into_bytes();
/// assert!(bytes.starts_with(b"HTTP/1.1 200 OK\n"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    status: StatusCode,
    content_type: ContentType,
    body: String,
}

impl Reply {
    /// Creates a reply from its three parts.
    #[inline]
    pub fn new(status: StatusCode, content_type: ContentType, body: impl Into<String>) -> Self {
        Reply {
            status,
            content_type,
            body: body.into(),
        }
    }

    /// An HTML reply.
    #[inline]
    pub fn html(status: StatusCode, body: impl Into<String>) -> Self {
        Reply::new(status, ContentType::Html, body)
    }

    /// A JSON reply.
    #[inline]
    pub fn json(status: StatusCode, body: impl Into<String>) -> Self {
        Reply::new(status, ContentType::Json, body)
    }

    /// The fixed answer for requests whose header block yielded no GET line.
    #[inline]
    pub(crate) fn illegal_request() -> Self {
        Reply::html(StatusCode::BadRequest, "Illegal request: no GET")
    }

    /// The fixed answer when a handler cannot decode the query string.
    #[inline]
    pub(crate) fn undecodable_query() -> Self {
        Reply::html(
            StatusCode::BadRequest,
            "Error Code 400: Could not decode the query parameters\n",
        )
    }

    #[inline]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[inline]
    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    #[inline]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Serializes the response for the wire.
    ///
    /// Line endings are a bare `\n` throughout, preserved from the original
    /// wire format rather than normalized to CRLF.
    pub fn into_bytes(self) -> Vec<u8> {
        let status_line = self.status.status_line();
        let content_type = self.content_type.header_line();

        let mut buffer =
            Vec::with_capacity(status_line.len() + content_type.len() + 1 + self.body.len());
        buffer.extend_from_slice(status_line.as_bytes());
        buffer.extend_from_slice(content_type.as_bytes());
        buffer.push(b'\n');
        buffer.extend_from_slice(self.body.as_bytes());
        buffer
    }
}
