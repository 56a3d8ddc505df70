//! Status codes and content types used on the wire.
//!
//! The server intentionally speaks a very small subset of HTTP/1.1 and the
//! status lines are prebuilt as static text. Line endings are a bare `\n`,
//! not CRLF - the original wire format is preserved for existing clients.

macro_rules! set_status_codes {
    ($(
        $(#[$docs:meta])*
        $name:ident = ($num:expr, $str:expr);
    )+) => {
        /// The HTTP status codes this server emits.
        ///
        /// No other codes ever appear in a response.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum StatusCode { $(
            #[doc = concat!(stringify!($num), " ", $str)]
            $(#[$docs])*
            $name = $num,
        )+ }

        impl StatusCode {
            /// Returns the full status line, terminator included
            /// (e.g. `"HTTP/1.1 200 OK\n"`).
            #[inline]
            pub const fn status_line(&self) -> &'static str {
                match self { $(
                    StatusCode::$name => concat!("HTTP/1.1 ", $num, " ", $str, "\n"),
                )+ }
            }

            /// Returns the numeric code.
            #[inline]
            pub const fn code(&self) -> u16 {
                *self as u16
            }
        }
    }
}

set_status_codes! {
    /// Successful request.
    Ok = (200, "OK");
    /// Valid request with nothing to report (an empty repository list).
    NoContent = (204, "No Content");
    /// Missing parameters, undecodable query strings, unmatched routes.
    BadRequest = (400, "Bad Request");
    /// Absent files and failed upstream fetches.
    NotFound = (404, "Not Found");
    /// Parameters present but not parseable as the required numeric type.
    NotAcceptable = (406, "Not Acceptable");
}

/// The body media type of a [`Reply`](crate::Reply).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// `text/html; charset=utf-8`
    Html,
    /// `application/json; charset=utf-8`
    Json,
}

impl ContentType {
    /// Returns the complete header line, terminator included.
    #[inline]
    pub const fn header_line(&self) -> &'static str {
        match self {
            ContentType::Html => "Content-Type: text/html; charset=utf-8\n",
            ContentType::Json => "Content-Type: application/json; charset=utf-8\n",
        }
    }
}
