//! Line-oriented request parsing.
//!
//! The header block is consumed one `\n`-terminated line at a time until the
//! empty line that ends it. Only the line starting with the literal `GET`
//! token is interpreted; every other header line is read to advance the
//! stream and then discarded.

use crate::errors::ErrorKind;
use memchr::memchr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

/// A parsed GET request.
///
/// Immutable once built. The target is kept exactly as it appeared on the
/// request line - no percent-decoding happens here. Query decoding is each
/// handler's job via [`QueryParams`](crate::query::QueryParams); the path
/// side stays literal because the file-lookup endpoints operate on raw
/// path text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    target: String,
    // Byte offset of the first '?' in `route_key`, if any.
    query_split: Option<usize>,
}

impl Request {
    pub(crate) fn new(target: String) -> Self {
        let key = target.strip_prefix('/').unwrap_or(&target);
        let query_split = memchr(b'?', key.as_bytes());

        Request {
            target,
            query_split,
        }
    }

    /// The raw request target: everything between the first and second
    /// space of the request line, query included (e.g. `/multiply?num1=3`).
    #[inline]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The string the router matches: the target with one leading `/`
    /// stripped and the query kept (e.g. `multiply?num1=3`).
    #[inline]
    pub fn route_key(&self) -> &str {
        self.target.strip_prefix('/').unwrap_or(&self.target)
    }

    /// The path portion of the route key, up to the first `?`.
    #[inline]
    pub fn path(&self) -> &str {
        let key = self.route_key();
        match self.query_split {
            Some(split) => &key[..split],
            None => key,
        }
    }

    /// The raw query string after the first `?`, un-decoded.
    /// `None` when the target has no `?` at all.
    #[inline]
    pub fn raw_query(&self) -> Option<&str> {
        self.query_split.map(|split| &self.route_key()[split + 1..])
    }
}

/// Reads one header block and extracts the request.
///
/// Lines are read until an empty line or end of stream. A `GET` line yields
/// the target as the substring strictly between its first and second space;
/// a `GET` line with no second space is skipped like any other header line.
///
/// # Errors
///
/// - [`ErrorKind::UnexpectedEof`]: the stream closed before any line
/// - [`ErrorKind::NoRequestLine`]: the block ended without a usable GET line
/// - [`ErrorKind::Io`]: the socket read failed
pub(crate) async fn read_request<R>(reader: &mut R) -> Result<Request, ErrorKind>
where
    R: AsyncBufRead + Unpin,
{
    let mut target = None;
    let mut line = String::new();
    let mut first_line = true;

    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            if first_line {
                return Err(ErrorKind::UnexpectedEof);
            }
            break;
        }
        first_line = false;

        let trimmed = line.trim_end_matches(['\r', '\n']);
        debug!(line = trimmed, "received");

        if trimmed.is_empty() {
            break;
        }
        if trimmed.starts_with("GET") {
            if let Some(found) = extract_target(trimmed) {
                target = Some(found);
            }
        }
    }

    match target {
        Some(target) => Ok(Request::new(target)),
        None => Err(ErrorKind::NoRequestLine),
    }
}

// `GET <target> HTTP/1.1` -> the substring between the two spaces.
fn extract_target(line: &str) -> Option<String> {
    let bytes = line.as_bytes();
    let first_space = memchr(b' ', bytes)?;
    let second_space = memchr(b' ', &bytes[first_space + 1..])? + first_space + 1;

    Some(line[first_space + 1..second_space].to_owned())
}
