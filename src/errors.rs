use std::{error, fmt, io};

/// Failures while reading a request off the socket.
///
/// None of these are fatal to the process. The connection still gets a
/// best-effort response: the I/O and no-GET variants both map to the fixed
/// illegal-request reply, they only differ in how they are logged.
#[derive(Debug, PartialEq)]
pub(crate) enum ErrorKind {
    /// The stream closed before a single line could be read.
    UnexpectedEof,
    /// The header block ended without a usable `GET` line.
    NoRequestLine,
    /// The socket read itself failed.
    Io(IoError),
}

impl error::Error for ErrorKind {}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::UnexpectedEof => write!(f, "stream closed before a request line"),
            ErrorKind::NoRequestLine => write!(f, "header block contained no GET line"),
            ErrorKind::Io(err) => write!(f, "socket read failed: {}", err.0),
        }
    }
}

impl From<io::Error> for ErrorKind {
    fn from(err: io::Error) -> Self {
        ErrorKind::Io(IoError(err))
    }
}

// Compared by kind only; `io::Error` itself is not `PartialEq`.
#[derive(Debug)]
pub(crate) struct IoError(pub(crate) io::Error);

impl PartialEq for IoError {
    fn eq(&self, other: &Self) -> bool {
        self.0.kind() == other.0.kind()
    }
}
